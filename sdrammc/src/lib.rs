// Licensed under the Apache-2.0 license

//! AST2700 SDRAM controller and DDR PHY bring-up.
//!
//! [`Sdrammc::probe`] runs the whole sequence: AC timing programming, PHY
//! power/reset and training, DDR4 mode register setup, self-refresh exit,
//! BIST, and capacity detection. Once the "DRAM trained" scratch bit is set,
//! later boots only redo the capacity probe.

#![cfg_attr(not(test), no_std)]

mod bist;
mod bus;
mod capacity;
mod dram_type;
mod phy;
mod program;
mod sequencer;
mod timing;

pub use bist::default_bist_config;
pub use capacity::Capacity;
pub use dram_type::{Ddr4, Ddr5, DramProtocol, DramType};
pub use phy::{
    PhyInitHooks, PhyInitStep, PhyTraining, TrainingFirmware, TrainingOutcome, TrainingPass,
    TrainingScript, SKELETON,
};
pub use program::{ac_timing_registers, ddr4_mode_registers, dfi_timing, ModeRegisters};
pub use sequencer::BringupStage;
pub use timing::AcTiming;

use bus::SdramBus;
use log::{info, warn};
use phy::PhyHooks;
use poll_common::Delay;
use sdram_config::{SdramMemoryMap, SdramParams};
use sdram_error::{PollSite, SdramResult};
use sdram_registers::dramc::{self, ProtKey};
use sdram_registers::scu::{self, IoHwStrap1, Vga0Scratch};
use sdram_registers::RegisterFile;
use tock_registers::LocalRegisterCopy;

/// Usable DRAM once the controller is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamInfo {
    pub base: u64,
    pub size: u64,
}

/// What the rest of the boot firmware sees of a RAM controller.
pub trait RamDriver {
    /// `None` until a probe has succeeded.
    fn get_info(&self) -> Option<RamInfo>;
}

pub struct Sdrammc<'a, R, D, T = TrainingScript<'static>> {
    bus: SdramBus<R, D>,
    trainer: T,
    firmware: TrainingFirmware<'a>,
    dram_type: Option<DramType>,
    info: Option<RamInfo>,
}

impl<'a, R: RegisterFile, D: Delay> Sdrammc<'a, R, D> {
    /// A driver that replays the vendor step skeleton for training.
    pub fn new(regs: R, delay: D, map: SdramMemoryMap, params: SdramParams) -> Self {
        Self::with_trainer(regs, delay, map, params, TrainingScript::default())
    }
}

impl<'a, R: RegisterFile, D: Delay, T: PhyTraining> Sdrammc<'a, R, D, T> {
    pub fn with_trainer(
        regs: R,
        delay: D,
        map: SdramMemoryMap,
        params: SdramParams,
        trainer: T,
    ) -> Self {
        Self {
            bus: SdramBus {
                regs,
                delay,
                map,
                params,
            },
            trainer,
            firmware: TrainingFirmware::default(),
            dram_type: None,
            info: None,
        }
    }

    pub fn with_firmware(mut self, firmware: TrainingFirmware<'a>) -> Self {
        self.firmware = firmware;
        self
    }

    /// DRAM type selected by the last probe.
    pub fn dram_type(&self) -> Option<DramType> {
        self.dram_type
    }

    /// Capacity the controller currently decodes, read back from MCFG.
    pub fn configured_capacity(&mut self) -> SdramResult<Capacity> {
        self.bus.configured_capacity()
    }

    pub fn regs(&self) -> &R {
        &self.bus.regs
    }

    pub fn regs_mut(&mut self) -> &mut R {
        &mut self.bus.regs
    }

    pub fn delay(&self) -> &D {
        &self.bus.delay
    }

    /// Gives back the register file and delay source.
    pub fn release(self) -> (R, D) {
        (self.bus.regs, self.bus.delay)
    }

    /// Brings up the controller, or only re-detects the capacity if DRAM
    /// was already trained on an earlier boot. The controller registers are
    /// locked again afterwards whether or not bring-up succeeded.
    pub fn probe(&mut self) -> SdramResult<RamInfo> {
        self.unlock()?;
        let result = self.bringup();
        let locked = self.lock();
        let info = result?;
        locked?;
        self.info = Some(info);
        Ok(info)
    }

    fn bringup(&mut self) -> SdramResult<RamInfo> {
        let strap = LocalRegisterCopy::<u32, IoHwStrap1::Register>::new(
            self.bus.scu_io_read(scu::IO_HWSTRAP1),
        );
        let dram_type = DramType::from_strap(
            strap.is_set(IoHwStrap1::DDR4),
            self.bus.params.ddr4_speed,
        );
        self.dram_type = Some(dram_type);
        let proto = dram_type.protocol();

        if self.is_trained() {
            info!("[sdrammc] {} already trained, skipping bring-up", dram_type);
        } else {
            info!("[sdrammc] bringing up {}", dram_type);
            self.cold_bringup(dram_type)?;
            self.set_trained();
        }

        let capacity = self.bus.probe_capacity(proto)?;
        let vga = self.bus.vga_reserved();
        let info = RamInfo {
            base: self.bus.map.dram_offset,
            size: capacity.bytes() - vga,
        };
        info!(
            "[sdrammc] {} MB usable at 0x{:x} ({} MB reserved for VGA)",
            info.size >> 20,
            info.base,
            vga >> 20
        );
        Ok(info)
    }

    fn cold_bringup(&mut self, dram_type: DramType) -> SdramResult<()> {
        let proto = dram_type.protocol();
        let timing = dram_type.timing();
        let mode_registers = proto.compute_mode_registers(timing)?;
        let dfi = dfi_timing(timing, proto)?;

        self.bus.common_init(proto);
        self.bus.apply_ac_timing(timing);
        self.bus.apply_dfi_timing(dfi);

        let mut hooks = PhyHooks {
            bus: &mut self.bus,
            dram_type,
            firmware: self.firmware,
        };
        if phy::run_training(&mut self.trainer, &mut hooks)? == TrainingOutcome::Failed {
            warn!("[sdrammc] continuing after failed training");
        }

        if let Some(mr) = mode_registers {
            self.bus
                .program_mode_registers(&mr, proto.mrs_issue_order())?;
        }
        self.bus.exit_self_refresh()?;
        self.bus.enable_refresh();
        self.bus.verify_with_bist()
    }

    fn is_trained(&mut self) -> bool {
        let scratch = LocalRegisterCopy::<u32, Vga0Scratch::Register>::new(
            self.bus.scu_cpu_read(scu::CPU_VGA0_SCRATCH),
        );
        scratch.is_set(Vga0Scratch::DRAM_INIT_READY)
    }

    fn set_trained(&mut self) {
        let val = self.bus.scu_cpu_read(scu::CPU_VGA0_SCRATCH);
        self.bus.scu_cpu_write(
            scu::CPU_VGA0_SCRATCH,
            val | Vga0Scratch::DRAM_INIT_READY::SET.value,
        );
    }

    fn unlock(&mut self) -> SdramResult<()> {
        self.bus.dramc_write(dramc::PROT_KEY, dramc::UNLOCK_KEY);
        let timeout = self.bus.params.timeouts.protection_key_us;
        self.bus
            .poll_dramc(PollSite::ProtectionUnlock, timeout, dramc::PROT_KEY, |k| {
                k & ProtKey::UNLOCKED::SET.value != 0
            })
    }

    fn lock(&mut self) -> SdramResult<()> {
        self.bus.dramc_write(dramc::PROT_KEY, 0);
        let timeout = self.bus.params.timeouts.protection_key_us;
        self.bus
            .poll_dramc(PollSite::ProtectionLock, timeout, dramc::PROT_KEY, |k| {
                k & ProtKey::UNLOCKED::SET.value == 0
            })
    }
}

impl<R, D, T> RamDriver for Sdrammc<'_, R, D, T> {
    fn get_info(&self) -> Option<RamInfo> {
        self.info
    }
}
