// Licensed under the Apache-2.0 license

//! JEDEC AC timing rows, one per supported DRAM type. All values are in DRAM
//! clock cycles.

/// One speed grade worth of AC timing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcTiming {
    pub cl: u32,
    pub cwl: u32,
    pub bl: u32,
    pub t_rcd: u32,
    pub t_rp: u32,
    pub t_ras: u32,
    pub t_rrd: u32,
    pub t_rrd_l: u32,
    pub t_faw: u32,
    pub t_rtp: u32,
    pub t_wtr: u32,
    pub t_wtr_l: u32,
    pub t_wtr_a: u32,
    pub t_wtp: u32,
    pub t_rtw: u32,
    pub t_ccd_l: u32,
    pub t_dllk: u32,
    pub t_cksre: u32,
    pub t_pd: u32,
    pub t_xp: u32,
    pub t_rfc: u32,
    pub t_rfc_sb: u32,
    pub t_mrd: u32,
    pub t_refsbrd: u32,
    pub t_cshsr: u32,
    pub t_zqcs: u32,
}

pub const DDR4_1600: AcTiming = AcTiming {
    cl: 10,
    cwl: 9,
    bl: 8,
    t_rcd: 10,
    t_rp: 10,
    t_ras: 28,
    t_rrd: 6,
    t_rrd_l: 6,
    t_faw: 28,
    t_rtp: 6,
    t_wtr: 2,
    t_wtr_l: 6,
    t_wtr_a: 0,
    t_wtp: 26,
    t_rtw: 8,
    t_ccd_l: 6,
    t_dllk: 598,
    t_cksre: 8,
    t_pd: 4,
    t_xp: 6,
    t_rfc: 280,
    t_rfc_sb: 0,
    t_mrd: 8,
    t_refsbrd: 0,
    t_cshsr: 0,
    t_zqcs: 128,
};

pub const DDR4_2400: AcTiming = AcTiming {
    cl: 16,
    cwl: 12,
    bl: 8,
    t_rcd: 16,
    t_rp: 16,
    t_ras: 40,
    t_rrd: 8,
    t_rrd_l: 8,
    t_faw: 36,
    t_rtp: 10,
    t_wtr: 4,
    t_wtr_l: 10,
    t_wtr_a: 0,
    t_wtp: 36,
    t_rtw: 10,
    t_ccd_l: 6,
    t_dllk: 768,
    t_cksre: 12,
    t_pd: 6,
    t_xp: 8,
    t_rfc: 420,
    t_rfc_sb: 0,
    t_mrd: 8,
    t_refsbrd: 0,
    t_cshsr: 0,
    t_zqcs: 128,
};

pub const DDR4_3200: AcTiming = AcTiming {
    cl: 22,
    cwl: 16,
    bl: 8,
    t_rcd: 22,
    t_rp: 22,
    t_ras: 52,
    t_rrd: 10,
    t_rrd_l: 12,
    t_faw: 48,
    t_rtp: 12,
    t_wtr: 4,
    t_wtr_l: 12,
    t_wtr_a: 0,
    t_wtp: 44,
    t_rtw: 12,
    t_ccd_l: 8,
    t_dllk: 1024,
    t_cksre: 16,
    t_pd: 8,
    t_xp: 10,
    t_rfc: 560,
    t_rfc_sb: 0,
    t_mrd: 8,
    t_refsbrd: 0,
    t_cshsr: 0,
    t_zqcs: 128,
};

pub const DDR5_3200: AcTiming = AcTiming {
    cl: 26,
    cwl: 24,
    bl: 16,
    t_rcd: 26,
    t_rp: 26,
    t_ras: 52,
    t_rrd: 8,
    t_rrd_l: 8,
    t_faw: 32,
    t_rtp: 12,
    t_wtr: 4,
    t_wtr_l: 16,
    t_wtr_a: 0,
    t_wtp: 80,
    t_rtw: 12,
    t_ccd_l: 8,
    t_dllk: 1024,
    t_cksre: 16,
    t_pd: 12,
    t_xp: 12,
    t_rfc: 472,
    t_rfc_sb: 184,
    t_mrd: 24,
    t_refsbrd: 48,
    t_cshsr: 22,
    t_zqcs: 48,
};
