// Licensed under the Apache-2.0 license

use crate::bus::SdramBus;
use crate::sequencer::{enter, BringupStage};
use log::{debug, error};
use poll_common::Delay;
use sdram_error::{PollSite, SdramError, SdramResult};
use sdram_registers::dramc::{self, BistCfg, BistRes, Intr};
use sdram_registers::RegisterFile;
use tock_registers::LocalRegisterCopy;

/// Write then read back a fixed pattern.
pub fn default_bist_config() -> u32 {
    (BistCfg::ENABLE::SET + BistCfg::BURST_MODE::WriteRead + BistCfg::PATTERN_MODE::Fixed).value
}

impl<R: RegisterFile, D: Delay> SdramBus<R, D> {
    /// Runs the controller BIST over `len` bytes at DRAM offset `start` and
    /// returns the error count: 0 when the engine finished without a
    /// mismatch, 1 otherwise.
    pub(crate) fn run_bist(
        &mut self,
        start: u32,
        len: u32,
        cfg: u32,
        timeout_us: u32,
    ) -> SdramResult<u32> {
        self.dramc_write(dramc::BISTCFG, 0);
        self.dramc_write(dramc::BISTCFG, cfg);
        self.dramc_write(dramc::BIST_ADDR, start >> 4);
        self.dramc_write(dramc::BIST_SIZE, len >> 4);
        self.dramc_write(dramc::BIST_PATT, self.params.bist_pattern);
        self.dramc_write(dramc::BISTCFG, cfg | BistCfg::START::SET.value);

        self.poll_dramc(PollSite::BistDone, timeout_us, dramc::INTR_STATUS, |s| {
            s & Intr::BIST_DONE::SET.value != 0
        })?;
        self.dramc_write(dramc::INTR_CLEAR, Intr::BIST_DONE::SET.value);

        let res = LocalRegisterCopy::<u32, BistRes::Register>::new(self.dramc_read(dramc::BIST_RES));
        debug!("[sdrammc] BIST result 0x{:08x}", res.get());
        if res.is_set(BistRes::DONE) && !res.is_set(BistRes::FAIL) {
            Ok(0)
        } else {
            Ok(1)
        }
    }

    /// The post-training check over the configured window at DRAM offset 0.
    pub(crate) fn verify_with_bist(&mut self) -> SdramResult<()> {
        enter(BringupStage::Bist);
        let window = self.params.bist_window;
        let timeout = self.params.timeouts.bist_us;
        let errors = self.run_bist(0, window, default_bist_config(), timeout)?;
        if errors != 0 {
            let fail_addr = self.dramc_read(dramc::BIST_FAIL_ADDR);
            error!(
                "[sdrammc] BIST failed over 0x{:x} bytes, first failing address 0x{:x}",
                window, fail_addr
            );
            return Err(SdramError::BistFailed { errors });
        }
        Ok(())
    }
}
