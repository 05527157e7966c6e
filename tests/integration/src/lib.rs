// Licensed under the Apache-2.0 license

#[cfg(test)]
mod test_capacity;
#[cfg(test)]
mod test_probe;

#[cfg(test)]
mod test {
    use emulator_periph::{EmulatedSdram, SimDelay};
    use log::LevelFilter;
    use sdram_config::{SdramMemoryMap, SdramParams};
    use sdram_registers::phy::msg;
    use sdrammc::Sdrammc;
    use simple_logger::SimpleLogger;

    pub const MB: u64 = 1 << 20;

    pub fn init_logger() {
        let _ = SimpleLogger::new().with_level(LevelFilter::Info).init();
    }

    /// An emulated board whose training firmware passes both 1D and 2D.
    pub fn board(installed: u64) -> EmulatedSdram {
        let mut emu = EmulatedSdram::new(SdramMemoryMap::default(), installed);
        emu.post_training_run(msg::SUCCESS);
        emu.post_training_run(msg::SUCCESS);
        emu
    }

    pub fn driver(
        emu: EmulatedSdram,
        params: SdramParams,
    ) -> Sdrammc<'static, EmulatedSdram, SimDelay> {
        init_logger();
        Sdrammc::new(emu, SimDelay::new(), SdramMemoryMap::default(), params)
    }
}
