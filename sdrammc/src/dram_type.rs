// Licensed under the Apache-2.0 license

use crate::capacity::Capacity;
use crate::program::{self, ModeRegisters};
use crate::timing::{self, AcTiming};
use core::fmt;
use sdram_config::Ddr4Speed;
use sdram_error::SdramResult;
use sdram_registers::dramc::{self, Dctl, Mcfg};

/// DRAM device generation and speed grade, fixed for the whole boot.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DramType {
    Ddr4_1600,
    Ddr4_2400,
    Ddr4_3200,
    Ddr5_3200,
}

impl DramType {
    /// Combines the DDR4/DDR5 strap with the configured DDR4 speed grade.
    pub fn from_strap(ddr4: bool, speed: Ddr4Speed) -> Self {
        match (ddr4, speed) {
            (false, _) => DramType::Ddr5_3200,
            (true, Ddr4Speed::Mt1600) => DramType::Ddr4_1600,
            (true, Ddr4Speed::Mt2400) => DramType::Ddr4_2400,
            (true, Ddr4Speed::Mt3200) => DramType::Ddr4_3200,
        }
    }

    pub fn is_ddr4(self) -> bool {
        !matches!(self, DramType::Ddr5_3200)
    }

    pub fn timing(self) -> &'static AcTiming {
        match self {
            DramType::Ddr4_1600 => &timing::DDR4_1600,
            DramType::Ddr4_2400 => &timing::DDR4_2400,
            DramType::Ddr4_3200 => &timing::DDR4_3200,
            DramType::Ddr5_3200 => &timing::DDR5_3200,
        }
    }

    pub fn protocol(self) -> &'static dyn DramProtocol {
        if self.is_ddr4() {
            &Ddr4
        } else {
            &Ddr5
        }
    }
}

impl fmt::Display for DramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DramType::Ddr4_1600 => "DDR4-1600",
            DramType::Ddr4_2400 => "DDR4-2400",
            DramType::Ddr4_3200 => "DDR4-3200",
            DramType::Ddr5_3200 => "DDR5-3200",
        };
        f.write_str(name)
    }
}

/// Everything that differs between DDR4 and DDR5 bring-up.
pub trait DramProtocol {
    /// MCFG DRAM type field value.
    fn mcfg_type(&self) -> u32;

    /// PHY pipeline and extra DFI delay subtracted from CL/CWL.
    fn dfi_delays(&self) -> (u32, u32);

    /// Mode-register images the controller sends with MRS, or `None` when
    /// the training firmware programs the device itself.
    fn compute_mode_registers(&self, timing: &AcTiming) -> SdramResult<Option<ModeRegisters>>;

    /// Mode registers in the order MRS commands are issued.
    fn mrs_issue_order(&self) -> &'static [u8];

    /// Controller bits held set around PHY init start: `(offset, mask)`.
    fn mission_mode_workarounds(&self) -> &'static [(u64, u32)];

    /// Refresh cycle time for a given device density.
    fn refresh_cycles(&self, capacity: Capacity) -> u32;
}

pub struct Ddr4;

pub struct Ddr5;

const DDR4_TRFC: [u32; 4] = [256, 416, 560, 880];
const DDR5_TRFC: [u32; 4] = [312, 472, 656, 944];

impl DramProtocol for Ddr4 {
    fn mcfg_type(&self) -> u32 {
        Mcfg::DRAM_TYPE::Ddr4.value
    }

    fn dfi_delays(&self) -> (u32, u32) {
        (5, 4)
    }

    fn compute_mode_registers(&self, timing: &AcTiming) -> SdramResult<Option<ModeRegisters>> {
        program::ddr4_mode_registers(timing).map(Some)
    }

    fn mrs_issue_order(&self) -> &'static [u8] {
        &[3, 6, 5, 4, 2, 1, 0]
    }

    fn mission_mode_workarounds(&self) -> &'static [(u64, u32)] {
        &[]
    }

    fn refresh_cycles(&self, capacity: Capacity) -> u32 {
        DDR4_TRFC[capacity.index()]
    }
}

impl DramProtocol for Ddr5 {
    fn mcfg_type(&self) -> u32 {
        Mcfg::DRAM_TYPE::Ddr5.value
    }

    fn dfi_delays(&self) -> (u32, u32) {
        (13, 3)
    }

    fn compute_mode_registers(&self, _timing: &AcTiming) -> SdramResult<Option<ModeRegisters>> {
        Ok(None)
    }

    fn mrs_issue_order(&self) -> &'static [u8] {
        &[]
    }

    fn mission_mode_workarounds(&self) -> &'static [(u64, u32)] {
        const WORKAROUNDS: [(u64, u32); 1] = [(dramc::DCTL, Dctl::INIT_WORKAROUND::SET.value)];
        &WORKAROUNDS
    }

    fn refresh_cycles(&self, capacity: Capacity) -> u32 {
        DDR5_TRFC[capacity.index()]
    }
}
