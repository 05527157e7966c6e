// Licensed under the Apache-2.0 license

//! Controller-side bring-up stages around PHY training.

use crate::bus::SdramBus;
use crate::dram_type::DramProtocol;
use crate::program::ModeRegisters;
use core::fmt;
use log::{debug, info};
use num_enum::IntoPrimitive;
use poll_common::Delay;
use sdram_error::{PollSite, SdramResult};
use sdram_registers::dramc::{self, Intr, Mctl, Mrctl, Refctl};
use sdram_registers::RegisterFile;

/// PHY power and reset pulse settle time.
const POWER_RESET_DELAY_US: u32 = 2;
const SELF_REFRESH_SETTLE_US: u32 = 1;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive)]
pub enum BringupStage {
    PowerReset = 1,
    TrainingInvoke = 2,
    MissionModeEntry = 3,
    ModeRegisterProgram = 4,
    SelfRefreshExit = 5,
    RefreshEnable = 6,
    Bist = 7,
    CapacityProbe = 8,
}

impl fmt::Display for BringupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BringupStage::PowerReset => "power/reset",
            BringupStage::TrainingInvoke => "PHY training",
            BringupStage::MissionModeEntry => "mission mode entry",
            BringupStage::ModeRegisterProgram => "mode register programming",
            BringupStage::SelfRefreshExit => "self-refresh exit",
            BringupStage::RefreshEnable => "refresh enable",
            BringupStage::Bist => "BIST",
            BringupStage::CapacityProbe => "capacity probe",
        };
        f.write_str(name)
    }
}

pub(crate) fn enter(stage: BringupStage) {
    info!("[sdrammc] stage {}: {}", u8::from(stage), stage);
}

impl<R: RegisterFile, D: Delay> SdramBus<R, D> {
    /// Interrupts cleared, DRAM type selected and auto-refresh held off until
    /// the devices are out of self-refresh.
    pub(crate) fn common_init(&mut self, proto: &dyn DramProtocol) {
        self.dramc_write(dramc::INTR_MASK, 0);
        self.dramc_write(dramc::INTR_CLEAR, u32::MAX);
        self.dramc_write(dramc::MCFG, proto.mcfg_type());
        self.dramc_modify(dramc::REFCTL, Refctl::REFRESH_DISABLE::SET);
    }

    pub(crate) fn power_reset(&mut self) {
        enter(BringupStage::PowerReset);
        let steps = [
            Mctl::PHY_RESET::SET + Mctl::PHY_POWER_ON::CLEAR,
            Mctl::PHY_RESET::SET + Mctl::PHY_POWER_ON::SET,
            Mctl::PHY_RESET::CLEAR + Mctl::PHY_POWER_ON::SET,
        ];
        for step in steps {
            self.dramc_write(dramc::MCTL, step.value);
            self.delay_us(POWER_RESET_DELAY_US);
        }
    }

    /// Hands the DFI over to the controller once training is done.
    pub(crate) fn enter_mission_mode(&mut self, proto: &dyn DramProtocol) -> SdramResult<()> {
        enter(BringupStage::MissionModeEntry);
        let timeout = self.params.timeouts.phy_init_us;
        let workarounds = proto.mission_mode_workarounds();

        for &(offset, mask) in workarounds {
            let val = self.dramc_read(offset);
            self.dramc_write(offset, val | mask);
        }
        self.dramc_modify(dramc::MCTL, Mctl::PHY_INIT_START::SET);
        self.poll_dramc(PollSite::PhyInitDone, timeout, dramc::INTR_STATUS, |s| {
            s & Intr::PHY_INIT_DONE::SET.value != 0
        })?;
        for &(offset, mask) in workarounds {
            let val = self.dramc_read(offset);
            self.dramc_write(offset, val & !mask);
        }

        self.dramc_write(dramc::INTR_CLEAR, u32::MAX);
        self.poll_dramc(
            PollSite::InterruptsCleared,
            timeout,
            dramc::INTR_STATUS,
            |s| s == 0,
        )
    }

    pub(crate) fn program_mode_registers(
        &mut self,
        mr: &ModeRegisters,
        order: &[u8],
    ) -> SdramResult<()> {
        enter(BringupStage::ModeRegisterProgram);
        self.apply_mode_registers(mr);
        for &addr in order {
            self.issue_mrs(addr)?;
        }
        Ok(())
    }

    fn issue_mrs(&mut self, addr: u8) -> SdramResult<()> {
        let cmd = Mrctl::MR_ADDR.val(u32::from(addr)) + Mrctl::CMD_START::SET;
        let cmd = if addr == 0 {
            cmd + Mrctl::CMD_DLL_RESET::SET
        } else {
            cmd
        };
        debug!("[sdrammc] MRS MR{}", addr);
        self.dramc_write(dramc::MRCTL, cmd.value);
        let timeout = self.params.timeouts.mrs_us;
        self.poll_dramc(PollSite::MrDone, timeout, dramc::INTR_STATUS, |s| {
            s & Intr::MR_DONE::SET.value != 0
        })?;
        self.dramc_write(dramc::INTR_CLEAR, Intr::MR_DONE::SET.value);
        Ok(())
    }

    pub(crate) fn exit_self_refresh(&mut self) -> SdramResult<()> {
        enter(BringupStage::SelfRefreshExit);
        self.dramc_modify(dramc::MCTL, Mctl::SELF_REF_START::SET);
        let timeout = self.params.timeouts.self_refresh_us;
        self.poll_dramc(PollSite::SelfRefreshDone, timeout, dramc::INTR_STATUS, |s| {
            s & Intr::REF_DONE::SET.value != 0
        })?;
        self.dramc_write(dramc::INTR_CLEAR, Intr::REF_DONE::SET.value);
        self.delay_us(SELF_REFRESH_SETTLE_US);
        Ok(())
    }

    pub(crate) fn enable_refresh(&mut self) {
        enter(BringupStage::RefreshEnable);
        self.dramc_modify(dramc::REFCTL, Refctl::REFRESH_DISABLE::CLEAR);
    }
}
