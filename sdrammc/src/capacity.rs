// Licensed under the Apache-2.0 license

//! DRAM size detection by address aliasing.
//!
//! With the controller decoding the full 2GB aperture, a write to an offset
//! at or above the installed size wraps onto a lower address. Writing a
//! unique pattern at each candidate boundary and checking whether it shows
//! up at offset 0 reveals the installed size.

use crate::bus::SdramBus;
use crate::dram_type::DramProtocol;
use crate::sequencer::{enter, BringupStage};
use log::{debug, info};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use poll_common::Delay;
use sdram_error::{SdramError, SdramResult};
use sdram_registers::dramc::{self, AcTime5, Mcfg};
use sdram_registers::scu::{self, CpuHwStrap1, PciMisc};
use sdram_registers::RegisterFile;
use tock_registers::LocalRegisterCopy;

const MB: u64 = 1 << 20;

const PROBE_PATTERN: u32 = 0xdead_beef;

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum Capacity {
    Mb256 = 0,
    Mb512 = 1,
    Gb1 = 2,
    Gb2 = 3,
}

impl Capacity {
    pub const ALL: [Capacity; 4] = [
        Capacity::Mb256,
        Capacity::Mb512,
        Capacity::Gb1,
        Capacity::Gb2,
    ];

    pub fn bytes(self) -> u64 {
        (256 * MB) << u32::from(self)
    }

    pub(crate) fn index(self) -> usize {
        u32::from(self) as usize
    }

    /// Decodes the MCFG capacity field.
    pub fn from_field(field: u32) -> SdramResult<Self> {
        Capacity::try_from(field).map_err(|_| SdramError::InvalidCapacity(field))
    }
}

impl<R: RegisterFile, D: Delay> SdramBus<R, D> {
    fn set_capacity(&mut self, capacity: Capacity) {
        self.dramc_modify(dramc::MCFG, Mcfg::CAPACITY.val(capacity.into()));
    }

    /// Capacity currently decoded by the controller.
    pub(crate) fn configured_capacity(&mut self) -> SdramResult<Capacity> {
        let mcfg = LocalRegisterCopy::<u32, Mcfg::Register>::new(self.dramc_read(dramc::MCFG));
        Capacity::from_field(mcfg.read(Mcfg::CAPACITY))
    }

    /// Detects the installed capacity and reprograms the size and refresh
    /// timing to match. Destroys the first word of DRAM and one word at each
    /// probed boundary.
    pub(crate) fn probe_capacity(&mut self, proto: &dyn DramProtocol) -> SdramResult<Capacity> {
        enter(BringupStage::CapacityProbe);
        self.set_capacity(Capacity::Gb2);
        self.dram_write(0, 0);

        let mut detected = Capacity::Mb256;
        for idx in (0..Capacity::Gb2.index()).rev() {
            let candidate = Capacity::from_field(idx as u32)?;
            let pattern = PROBE_PATTERN.rotate_left(idx as u32) ^ idx as u32;
            self.dram_write(candidate.bytes(), pattern);
            if self.dram_read(0) != pattern {
                // The write landed in real storage above the candidate size.
                detected = Capacity::from_field(idx as u32 + 1)?;
                break;
            }
        }

        let trfc = proto.refresh_cycles(detected);
        debug!("[sdrammc] tRFC for {:?} = {} cycles", detected, trfc);
        self.set_capacity(detected);
        self.dramc_modify(dramc::ACTIME5, AcTime5::TRFC.val(trfc >> 1));
        info!("[sdrammc] detected {} MB", detected.bytes() / MB);
        Ok(detected)
    }

    /// Bytes reserved at the top of DRAM for the VGA frame buffers.
    pub(crate) fn vga_reserved(&mut self) -> u64 {
        let strap =
            LocalRegisterCopy::<u32, CpuHwStrap1::Register>::new(self.scu_cpu_read(scu::CPU_HWSTRAP1));
        let unit = if strap.is_set(CpuHwStrap1::VGA_BURST_MODE) {
            64 * MB
        } else {
            32 * MB
        };
        let enabled = [scu::CPU_PCI_MISC70, scu::CPU_PCI_MISC80]
            .into_iter()
            .filter(|&offset| {
                LocalRegisterCopy::<u32, PciMisc::Register>::new(self.scu_cpu_read(offset))
                    .is_set(PciMisc::VGA_ENABLE)
            })
            .count() as u64;
        enabled * unit
    }
}
