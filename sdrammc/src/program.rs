// Licensed under the Apache-2.0 license

//! Packing of AC timing rows and DDR4 mode registers into controller
//! register images. Everything here is pure; `apply_*` on the bus writes the
//! results.

use crate::bus::SdramBus;
use crate::dram_type::DramProtocol;
use crate::timing::AcTiming;
use log::debug;
use poll_common::Delay;
use sdram_error::{SdramError, SdramResult, TimingParam};
use sdram_registers::dramc::{
    self, AcTime1, AcTime2, AcTime3, AcTime4, AcTime5, AcTime6, AcTime7, DfiTiming, ModeRegPair,
};
use sdram_registers::RegisterFile;

/// The seven AC timing register images as `(offset, value)` pairs. Every
/// cycle count is stored halved.
pub fn ac_timing_registers(t: &AcTiming) -> [(u64, u32); 7] {
    [
        (
            dramc::ACTIME1,
            (AcTime1::TRCD.val(t.t_rcd >> 1)
                + AcTime1::TRP.val(t.t_rp >> 1)
                + AcTime1::TRAS.val(t.t_ras >> 1)
                + AcTime1::TRRD.val(t.t_rrd >> 1))
            .value,
        ),
        (
            dramc::ACTIME2,
            (AcTime2::TRRD_L.val(t.t_rrd_l >> 1)
                + AcTime2::TFAW.val(t.t_faw >> 1)
                + AcTime2::TRTP.val(t.t_rtp >> 1)
                + AcTime2::TCCD_L.val(t.t_ccd_l >> 1))
            .value,
        ),
        (
            dramc::ACTIME3,
            (AcTime3::TWTR.val(t.t_wtr >> 1)
                + AcTime3::TWTR_L.val(t.t_wtr_l >> 1)
                + AcTime3::TWTR_A.val(t.t_wtr_a >> 1)
                + AcTime3::TWTP.val(t.t_wtp >> 1))
            .value,
        ),
        (
            dramc::ACTIME4,
            (AcTime4::TRTW.val(t.t_rtw >> 1)
                + AcTime4::TMRD.val(t.t_mrd >> 1)
                + AcTime4::TDLLK.val(t.t_dllk >> 1))
            .value,
        ),
        (
            dramc::ACTIME5,
            (AcTime5::TRFC.val(t.t_rfc >> 1) + AcTime5::TRFCSB.val(t.t_rfc_sb >> 1)).value,
        ),
        (
            dramc::ACTIME6,
            (AcTime6::TXP.val(t.t_xp >> 1)
                + AcTime6::TPD.val(t.t_pd >> 1)
                + AcTime6::TCKSRE.val(t.t_cksre >> 1)
                + AcTime6::TCSHSR.val(t.t_cshsr >> 1))
            .value,
        ),
        (
            dramc::ACTIME7,
            (AcTime7::TREFSBRD.val(t.t_refsbrd >> 1) + AcTime7::TZQCS.val(t.t_zqcs >> 1)).value,
        ),
    ]
}

/// DFI latency register: write latency, read-data-enable latency and
/// write-data delay, in DFI clocks. CL and CWL must cover the PHY pipeline
/// plus the extra write-data delay.
pub fn dfi_timing(t: &AcTiming, proto: &dyn DramProtocol) -> SdramResult<u32> {
    let (pipeline, extra) = proto.dfi_delays();
    let delay = pipeline + extra;
    let latency = |param, value: u32| {
        value
            .checked_sub(delay)
            .ok_or(SdramError::UnsupportedTiming { param, value })
    };
    let wrlat = latency(TimingParam::CasWriteLatency, t.cwl)?;
    let rddata_en = latency(TimingParam::CasLatency, t.cl)?;
    Ok((DfiTiming::PHY_WRLAT.val(wrlat)
        + DfiTiming::RDDATA_EN.val(rddata_en)
        + DfiTiming::PHY_WRDATA.val(extra))
    .value)
}

/// DDR4 mode register images MR0 to MR6 (MR7 is unused).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeRegisters {
    pub mr: [u16; 8],
}

impl ModeRegisters {
    /// MR01, MR23, MR45 and MR67 pair register images.
    pub fn pairs(&self) -> [(u64, u32); 4] {
        let mut pairs = [(0u64, 0u32); 4];
        for (i, pair) in pairs.iter_mut().enumerate() {
            let even = u32::from(self.mr[2 * i]);
            let odd = u32::from(self.mr[2 * i + 1]);
            *pair = (
                dramc::MR_PAIRS[i],
                (ModeRegPair::EVEN.val(even) + ModeRegPair::ODD.val(odd)).value,
            );
        }
        pairs
    }
}

// MR1: DLL enable, RZQ/7 drive, RTT_NOM RZQ/4.
const DDR4_MR1: u16 = 0x0101;
const DDR4_MR3: u16 = 0x0000;
const DDR4_MR4: u16 = 0x0000;
// MR5: data mask enabled.
const DDR4_MR5: u16 = 0x0400;
// MR6: VrefDQ range 1, 0x19 until training writes the trained value.
const DDR4_MR6_VREF: u16 = 0x0019;

/// JEDEC DDR4 Table 15: CAS latency to the 5-bit MR0 code.
fn ddr4_cas_code(cl: u32) -> SdramResult<u16> {
    let code = match cl {
        9 => 0,
        10 => 1,
        11 => 2,
        12 => 3,
        13 => 4,
        14 => 5,
        15 => 6,
        16 => 7,
        18 => 8,
        20 => 9,
        22 => 10,
        24 => 11,
        23 => 12,
        17 => 13,
        19 => 14,
        21 => 15,
        25 => 16,
        26 => 17,
        27 => 18,
        28 => 19,
        29 => 20,
        30 => 21,
        31 => 22,
        32 => 23,
        _ => return Err(unsupported(TimingParam::CasLatency, cl)),
    };
    Ok(code)
}

/// JEDEC DDR4 Table 14: read-to-precharge (write recovery is twice that) to
/// the 4-bit MR0 code.
fn ddr4_wr_rtp_code(rtp: u32) -> SdramResult<u16> {
    let code = match rtp {
        5 => 0,
        6 => 1,
        7 => 2,
        8 => 3,
        9 => 4,
        10 => 5,
        12 => 6,
        11 => 7,
        13 => 8,
        14 => 9,
        _ => return Err(unsupported(TimingParam::WriteRecovery, rtp)),
    };
    Ok(code)
}

fn ddr4_cwl_code(cwl: u32) -> SdramResult<u16> {
    let code = match cwl {
        9 => 0,
        10 => 1,
        11 => 2,
        12 => 3,
        14 => 4,
        16 => 5,
        18 => 6,
        20 => 7,
        _ => return Err(unsupported(TimingParam::CasWriteLatency, cwl)),
    };
    Ok(code)
}

fn ddr4_ccd_l_code(ccd_l: u32) -> SdramResult<u16> {
    let code = match ccd_l {
        4 => 0,
        5 => 1,
        6 => 2,
        7 => 3,
        8 => 4,
        _ => return Err(unsupported(TimingParam::CcdL, ccd_l)),
    };
    Ok(code)
}

fn unsupported(param: TimingParam, value: u32) -> SdramError {
    SdramError::UnsupportedTiming { param, value }
}

pub fn ddr4_mode_registers(t: &AcTiming) -> SdramResult<ModeRegisters> {
    let cas = ddr4_cas_code(t.cl)?;
    let wr = ddr4_wr_rtp_code(t.t_rtp)?;
    let cwl = ddr4_cwl_code(t.cwl)?;
    let ccd_l = ddr4_ccd_l_code(t.t_ccd_l)?;

    // MR0: CL in A12, A6:A4, A2; WR/RTP in A13, A11:A9; BL8 fixed.
    let mr0 = ((cas & 0x1) << 2)
        | (((cas >> 1) & 0x7) << 4)
        | (((cas >> 4) & 0x1) << 12)
        | ((wr & 0x7) << 9)
        | (((wr >> 3) & 0x1) << 13);
    let mr2 = cwl << 3;
    let mr6 = (ccd_l << 10) | DDR4_MR6_VREF;

    Ok(ModeRegisters {
        mr: [mr0, DDR4_MR1, mr2, DDR4_MR3, DDR4_MR4, DDR4_MR5, mr6, 0],
    })
}

impl<R: RegisterFile, D: Delay> SdramBus<R, D> {
    pub(crate) fn apply_ac_timing(&mut self, t: &AcTiming) {
        for (offset, val) in ac_timing_registers(t) {
            debug!("[sdrammc] ACTIME 0x{:02x} = 0x{:08x}", offset, val);
            self.dramc_write(offset, val);
        }
    }

    pub(crate) fn apply_dfi_timing(&mut self, val: u32) {
        debug!("[sdrammc] DFI timing = 0x{:08x}", val);
        self.dramc_write(dramc::DFI_TIMING, val);
    }

    pub(crate) fn apply_mode_registers(&mut self, mr: &ModeRegisters) {
        for (offset, val) in mr.pairs() {
            debug!("[sdrammc] MR pair 0x{:02x} = 0x{:08x}", offset, val);
            self.dramc_write(offset, val);
        }
    }
}
