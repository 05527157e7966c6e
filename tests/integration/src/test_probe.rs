// Licensed under the Apache-2.0 license

use crate::test::{board, driver, MB};
use anyhow::Result;
use emulator_periph::{AccessKind, EmulatedSdram, SimDelay, Stall};
use sdram_config::{Ddr4Speed, SdramMemoryMap, SdramParams};
use sdram_error::{PollSite, SdramError};
use sdram_registers::dramc::{self, AcTime5};
use sdram_registers::phy;
use sdrammc::{
    ac_timing_registers, dfi_timing, DramType, RamDriver, Sdrammc, TrainingFirmware,
};
use tock_registers::LocalRegisterCopy;
use zerocopy::little_endian::U32;
use zerocopy::IntoBytes;

#[test]
fn test_cold_then_warm_boot() -> Result<()> {
    let mut ctrl = driver(board(1024 * MB), SdramParams::default());
    let cold = ctrl.probe()?;
    assert_eq!(cold.size, 1024 * MB);
    let (mut emu, _) = ctrl.release();
    assert_eq!(emu.mrs_log().len(), 7);
    emu.clear_trace();

    // Second boot on the same hardware: the scratch flag survives.
    let mut ctrl = driver(emu, SdramParams::default());
    let warm = ctrl.probe()?;
    assert_eq!(warm, cold);
    assert_eq!(ctrl.get_info(), Some(warm));

    let emu = ctrl.regs();
    assert_eq!(emu.mrs_log().len(), 7);
    assert_eq!(emu.bist_runs(), 1);
    let base = SdramMemoryMap::default().dramc_offset;
    assert!(emu.writes_to(base + dramc::MCTL).is_empty());
    assert!(emu.writes_to(base + dramc::ACTIME1).is_empty());
    Ok(())
}

#[test]
fn test_every_speed_grade_programs_its_row() -> Result<()> {
    for speed in [Ddr4Speed::Mt1600, Ddr4Speed::Mt2400, Ddr4Speed::Mt3200] {
        let params = SdramParams {
            ddr4_speed: speed,
            ..Default::default()
        };
        let mut ctrl = driver(board(512 * MB), params);
        ctrl.probe()?;
        let ty = ctrl.dram_type().unwrap();
        assert_eq!(ty, DramType::from_strap(true, speed));

        let emu = ctrl.regs();
        for (offset, expected) in ac_timing_registers(ty.timing()) {
            if offset == dramc::ACTIME5 {
                // tRFC is rewritten for the detected density.
                let reg = LocalRegisterCopy::<u32, AcTime5::Register>::new(emu.dramc_reg(offset));
                assert_eq!(reg.read(AcTime5::TRFC), 416 >> 1);
                continue;
            }
            assert_eq!(emu.dramc_reg(offset), expected, "{ty} 0x{offset:x}");
        }
        assert_eq!(
            emu.dramc_reg(dramc::DFI_TIMING),
            dfi_timing(ty.timing(), ty.protocol())?
        );
    }
    Ok(())
}

#[test]
fn test_training_images_reach_phy_memory() -> Result<()> {
    let imem = [U32::new(0x1111_2222), U32::new(0x3333_4444)];
    let dmem = [U32::new(0x0c80_0000)];
    crate::test::init_logger();
    let mut ctrl = Sdrammc::new(
        board(256 * MB),
        SimDelay::new(),
        SdramMemoryMap::default(),
        SdramParams::default(),
    )
    .with_firmware(TrainingFirmware {
        imem_1d: imem.as_bytes(),
        dmem_1d: dmem.as_bytes(),
        ..Default::default()
    });
    ctrl.probe()?;

    let emu = ctrl.regs();
    assert_eq!(emu.phy_csr(phy::IMEM_BASE), 0x2222);
    assert_eq!(emu.phy_csr(phy::IMEM_BASE + 1), 0x1111);
    assert_eq!(emu.phy_csr(phy::IMEM_BASE + 3), 0x3333);
    assert_eq!(emu.phy_csr(phy::DMEM_BASE + 1), 0x0c80);
    Ok(())
}

#[test]
fn test_mailbox_streams_during_training() -> Result<()> {
    let mut emu = EmulatedSdram::new(SdramMemoryMap::default(), 256 * MB);
    emu.post_message(phy::msg::END_OF_INIT);
    emu.post_stream(0x0042, &[1, 2, 3]);
    emu.post_message(phy::msg::SUCCESS);
    emu.post_stream(0x0043, &[]);
    emu.post_message(phy::msg::SUCCESS);

    let mut ctrl = driver(emu, SdramParams::default());
    ctrl.probe()?;
    assert_eq!(ctrl.regs().mailbox_pending(), 0);
    Ok(())
}

#[test]
fn test_ddr5_board() -> Result<()> {
    let mut ctrl = driver(board(2048 * MB).with_ddr4(false), SdramParams::default());
    let info = ctrl.probe()?;
    assert_eq!(info.size, 2048 * MB);
    assert_eq!(ctrl.dram_type(), Some(DramType::Ddr5_3200));

    let emu = ctrl.regs();
    assert!(emu.mrs_log().is_empty());
    let base = SdramMemoryMap::default().dramc_offset;
    let dctl = emu.writes_to(base + dramc::DCTL);
    assert_eq!(dctl, vec![dramc::Dctl::INIT_WORKAROUND::SET.value, 0]);
    Ok(())
}

#[test]
fn test_failures_report_stable_codes() {
    let mut params = SdramParams::default();
    params.timeouts.phy_init_us = 100;
    params.timeouts.bist_us = 100;
    let cases = [
        (Stall::MR_DONE, SdramError::Timeout(PollSite::MrDone), 0x000d_0103),
        (
            Stall::PHY_INIT,
            SdramError::Timeout(PollSite::PhyInitDone),
            0x000d_0105,
        ),
        (Stall::BIST, SdramError::Timeout(PollSite::BistDone), 0x000d_0107),
    ];
    for (stall, expected, code) in cases {
        let mut ctrl = driver(board(1024 * MB).with_stall(stall), params);
        let err = ctrl.probe().unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(u32::from(err), code);
        assert_eq!(ctrl.get_info(), None);
        assert!(!ctrl.regs().is_unlocked());
    }

    let mut ctrl = driver(board(1024 * MB).with_bist_failure(true), SdramParams::default());
    let err = ctrl.probe().unwrap_err();
    assert_eq!(err.code(), SdramError::BIST_FAILED);
}

#[test]
fn test_timeouts_are_bounded() {
    let params = SdramParams {
        poll_interval_us: 10,
        ..Default::default()
    };
    let emu = board(1024 * MB).with_stall(Stall::SELF_REFRESH);
    let mut ctrl = Sdrammc::new(emu, SimDelay::new(), SdramMemoryMap::default(), params);
    assert!(ctrl.probe().is_err());
    let waited = ctrl.delay().elapsed_us();
    assert!(waited >= u64::from(params.timeouts.self_refresh_us));
    assert!(waited < u64::from(params.timeouts.self_refresh_us) + 1_000);

    let reads = ctrl
        .regs()
        .trace()
        .iter()
        .filter(|a| {
            a.kind == AccessKind::Read
                && a.addr == SdramMemoryMap::default().dramc_offset + dramc::INTR_STATUS
        })
        .count();
    assert!(reads > 1);
}
