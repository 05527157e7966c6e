// Licensed under the Apache-2.0 license

use crate::test::{board, driver, MB};
use anyhow::Result;
use emulator_periph::EmulatedSdram;
use sdram_config::{SdramMemoryMap, SdramParams};
use sdram_registers::dramc::{self, Mcfg};
use sdrammc::{Capacity, RamInfo};
use tock_registers::LocalRegisterCopy;

#[test]
fn test_detects_installed_size() -> Result<()> {
    for capacity in Capacity::ALL {
        let mut ctrl = driver(board(capacity.bytes()), SdramParams::default());
        let info = ctrl.probe()?;
        assert_eq!(
            info,
            RamInfo {
                base: SdramMemoryMap::default().dram_offset,
                size: capacity.bytes(),
            }
        );
        let mcfg = LocalRegisterCopy::<u32, Mcfg::Register>::new(ctrl.regs().dramc_reg(dramc::MCFG));
        assert_eq!(Capacity::from_field(mcfg.read(Mcfg::CAPACITY))?, capacity);
        assert_eq!(ctrl.configured_capacity()?, capacity);
    }
    Ok(())
}

#[test]
fn test_vga_apertures() -> Result<()> {
    // (vga0, vga1, burst mode, reserved)
    let cases = [
        (false, false, false, 0),
        (false, false, true, 0),
        (true, false, false, 32 * MB),
        (false, true, true, 64 * MB),
        (true, true, false, 64 * MB),
        (true, true, true, 128 * MB),
    ];
    for (vga0, vga1, burst, reserved) in cases {
        let emu = EmulatedSdram::new(SdramMemoryMap::default(), 2048 * MB)
            .with_trained_flag(true)
            .with_vga(vga0, vga1)
            .with_vga_burst_mode(burst);
        let mut ctrl = driver(emu, SdramParams::default());
        assert_eq!(ctrl.probe()?.size, 2048 * MB - reserved);
    }
    Ok(())
}

#[test]
fn test_fast_path_reprobes_capacity() -> Result<()> {
    let emu = EmulatedSdram::new(SdramMemoryMap::default(), 512 * MB).with_trained_flag(true);
    let mut ctrl = driver(emu, SdramParams::default());
    let info = ctrl.probe()?;
    assert_eq!(info.size, 512 * MB);
    assert!(ctrl.regs().mrs_log().is_empty());
    assert_eq!(ctrl.regs().bist_runs(), 0);
    Ok(())
}
