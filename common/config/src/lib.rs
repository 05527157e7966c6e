// Licensed under the Apache-2.0 license

#![cfg_attr(not(test), no_std)]

/// Register windows and the DRAM aperture used by the SDRAM controller driver.
/// These are the AST2700 defaults; a board can override any of them.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SdramMemoryMap {
    pub dramc_offset: u64,
    pub dramc_size: u64,
    pub phy_offset: u64,
    pub phy_size: u64,
    pub scu_cpu_offset: u64,
    pub scu_cpu_size: u64,
    pub scu_io_offset: u64,
    pub scu_io_size: u64,
    pub dram_offset: u64,
}

impl Default for SdramMemoryMap {
    fn default() -> Self {
        SdramMemoryMap {
            dramc_offset: 0x12c0_0000,
            dramc_size: 0x1000,
            phy_offset: 0x1300_0000,
            phy_size: 0x20_0000,
            scu_cpu_offset: 0x12c0_2000,
            scu_cpu_size: 0x1000,
            scu_io_offset: 0x14c0_2000,
            scu_io_size: 0x1000,
            dram_offset: 0x4_0000_0000,
        }
    }
}

/// DDR4 data rate. DDR5 parts always run at 3200 MT/s on this controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ddr4Speed {
    Mt1600,
    Mt2400,
    #[default]
    Mt3200,
}

/// Upper bound, in microseconds, for each hardware handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollTimeouts {
    pub protection_key_us: u32,
    pub mrs_us: u32,
    pub self_refresh_us: u32,
    pub phy_init_us: u32,
    pub bist_us: u32,
    /// Applies to each mailbox message, not to the whole training run.
    pub mailbox_us: u32,
}

impl Default for PollTimeouts {
    fn default() -> Self {
        PollTimeouts {
            protection_key_us: 1_000,
            mrs_us: 1_000,
            self_refresh_us: 10_000,
            phy_init_us: 100_000,
            bist_us: 500_000,
            mailbox_us: 5_000_000,
        }
    }
}

/// Bring-up parameters that are not discoverable from hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SdramParams {
    pub ddr4_speed: Ddr4Speed,
    /// Bytes covered by the post-training BIST, starting at DRAM offset 0.
    pub bist_window: u32,
    pub bist_pattern: u32,
    pub poll_interval_us: u32,
    pub timeouts: PollTimeouts,
}

impl Default for SdramParams {
    fn default() -> Self {
        SdramParams {
            ddr4_speed: Ddr4Speed::default(),
            bist_window: 64 * 1024,
            bist_pattern: 0x8e8e_8e8e,
            poll_interval_us: 1,
            timeouts: PollTimeouts::default(),
        }
    }
}
