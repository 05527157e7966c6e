// Licensed under the Apache-2.0 license

//! DesignWare DDR PHY CSRs used outside the vendor training sequence.
//!
//! PHY CSRs are 16-bit words addressed by APB word address. The PHY window on
//! the SoC bus is byte addressed, so an APB address maps to byte offset
//! `addr << 1` (see [`apb_offset`]).

use tock_registers::register_bitfields;

pub const MEM_RESET_L: u32 = 0x2_0060;
pub const CAL_ZAP: u32 = 0x2_0089;
pub const MICRO_CONT_MUX_SEL: u32 = 0xd_0000;
pub const UCT_SHADOW_REGS: u32 = 0xd_0004;
pub const DCT_WRITE_PROT: u32 = 0xd_0031;
pub const UCT_WRITE_ONLY_SHADOW: u32 = 0xd_0032;
pub const UCT_DAT_WRITE_ONLY_SHADOW: u32 = 0xd_0034;
pub const MICRO_RESET: u32 = 0xd_0099;

/// Start of the training firmware instruction memory.
pub const IMEM_BASE: u32 = 0x5_0000;
/// Start of the training firmware data memory (and message block).
pub const DMEM_BASE: u32 = 0x5_8000;

/// Byte offset of an APB word address inside the PHY window.
pub const fn apb_offset(addr: u32) -> u64 {
    (addr as u64) << 1
}

register_bitfields! [
    u16,

    pub UctShadowRegs [
        /// Cleared by the PHY microcontroller while a message is posted.
        UCT_WRITE_PROT_SHADOW OFFSET(0) NUMBITS(1) [],
    ],

    pub DctWriteProt [
        DCT_WRITE_PROT OFFSET(0) NUMBITS(1) [],
    ],

    pub MicroContMuxSel [
        /// 0 gives the APB access to the internal CSRs, 1 hands them to the firmware.
        MICRO_CONT_MUX_SEL OFFSET(0) NUMBITS(1) [
            Apb = 0,
            Firmware = 1,
        ],
    ],

    pub MicroReset [
        STALL_TO_MICRO OFFSET(0) NUMBITS(1) [],
        RESET_TO_MICRO OFFSET(3) NUMBITS(1) [],
    ],
];

/// Major mailbox message codes posted by the training firmware.
pub mod msg {
    pub const END_OF_INIT: u16 = 0x00;
    pub const END_OF_FINE_WRITE_LEVELING: u16 = 0x01;
    pub const END_OF_READ_ENABLE_TRAINING: u16 = 0x02;
    pub const END_OF_READ_DELAY_CENTER: u16 = 0x03;
    pub const END_OF_WRITE_DELAY_CENTER: u16 = 0x04;
    pub const END_OF_2D_READ_DELAY_VOLTAGE: u16 = 0x05;
    pub const END_OF_2D_WRITE_DELAY_VOLTAGE: u16 = 0x06;
    pub const SUCCESS: u16 = 0x07;
    pub const STREAMING: u16 = 0x08;
    pub const END_OF_MAX_READ_LATENCY: u16 = 0x09;
    pub const END_OF_READ_DQ_DESKEW: u16 = 0x0a;
    pub const END_OF_LCDL_OFFSET_CAL: u16 = 0x0b;
    pub const END_OF_LRDIMM_TRAINING: u16 = 0x0c;
    pub const END_OF_CA_TRAINING: u16 = 0x0d;
    pub const END_OF_MPR_READ_DELAY_CENTER: u16 = 0xfd;
    pub const END_OF_WRITE_LEVELING_COARSE: u16 = 0xfe;
    pub const FAIL: u16 = 0xff;
}
