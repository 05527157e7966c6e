// Licensed under the Apache-2.0 license

use log::error;
use poll_common::{poll_until, Delay};
use sdram_config::{SdramMemoryMap, SdramParams};
use sdram_error::{PollSite, SdramError, SdramResult};
use sdram_registers::phy::apb_offset;
use sdram_registers::RegisterFile;
use tock_registers::fields::FieldValue;
use tock_registers::{LocalRegisterCopy, RegisterLongName};

/// Register-window aware access to the controller, PHY, SCU and DRAM, plus
/// the delay source used for settle times and bounded polls.
pub(crate) struct SdramBus<R, D> {
    pub(crate) regs: R,
    pub(crate) delay: D,
    pub(crate) map: SdramMemoryMap,
    pub(crate) params: SdramParams,
}

impl<R: RegisterFile, D: Delay> SdramBus<R, D> {
    pub(crate) fn dramc_read(&mut self, offset: u64) -> u32 {
        self.regs.read32(self.map.dramc_offset + offset)
    }

    pub(crate) fn dramc_write(&mut self, offset: u64, val: u32) {
        self.regs.write32(self.map.dramc_offset + offset, val);
    }

    /// Read-modify-write of the fields named in `field`.
    pub(crate) fn dramc_modify<F: RegisterLongName>(
        &mut self,
        offset: u64,
        field: FieldValue<u32, F>,
    ) {
        let mut reg = LocalRegisterCopy::<u32, F>::new(self.dramc_read(offset));
        reg.modify(field);
        self.dramc_write(offset, reg.get());
    }

    pub(crate) fn phy_read16(&mut self, apb_addr: u32) -> u16 {
        self.regs
            .read16(self.map.phy_offset + apb_offset(apb_addr))
    }

    pub(crate) fn phy_write16(&mut self, apb_addr: u32, val: u16) {
        self.regs
            .write16(self.map.phy_offset + apb_offset(apb_addr), val);
    }

    pub(crate) fn phy_write32(&mut self, apb_addr: u32, val: u32) {
        self.regs
            .write32(self.map.phy_offset + apb_offset(apb_addr), val);
    }

    pub(crate) fn scu_cpu_read(&mut self, offset: u64) -> u32 {
        self.regs.read32(self.map.scu_cpu_offset + offset)
    }

    pub(crate) fn scu_cpu_write(&mut self, offset: u64, val: u32) {
        self.regs.write32(self.map.scu_cpu_offset + offset, val);
    }

    pub(crate) fn scu_io_read(&mut self, offset: u64) -> u32 {
        self.regs.read32(self.map.scu_io_offset + offset)
    }

    pub(crate) fn dram_read(&mut self, offset: u64) -> u32 {
        self.regs.read32(self.map.dram_offset + offset)
    }

    pub(crate) fn dram_write(&mut self, offset: u64, val: u32) {
        self.regs.write32(self.map.dram_offset + offset, val);
    }

    pub(crate) fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Polls a controller register until `done` accepts its value.
    pub(crate) fn poll_dramc(
        &mut self,
        site: PollSite,
        timeout_us: u32,
        offset: u64,
        mut done: impl FnMut(u32) -> bool,
    ) -> SdramResult<()> {
        let addr = self.map.dramc_offset + offset;
        let SdramBus {
            regs,
            delay,
            params,
            ..
        } = self;
        poll_until(delay, timeout_us, params.poll_interval_us, || {
            done(regs.read32(addr))
        })
        .map_err(|t| timed_out(site, t.waited_us))
    }

    /// Polls a PHY CSR until `done` accepts its value.
    pub(crate) fn poll_phy(
        &mut self,
        site: PollSite,
        timeout_us: u32,
        apb_addr: u32,
        mut done: impl FnMut(u16) -> bool,
    ) -> SdramResult<()> {
        let addr = self.map.phy_offset + apb_offset(apb_addr);
        let SdramBus {
            regs,
            delay,
            params,
            ..
        } = self;
        poll_until(delay, timeout_us, params.poll_interval_us, || {
            done(regs.read16(addr))
        })
        .map_err(|t| timed_out(site, t.waited_us))
    }
}

fn timed_out(site: PollSite, waited_us: u32) -> SdramError {
    error!("[sdrammc] gave up on {} after {}us", site, waited_us);
    SdramError::Timeout(site)
}
