// Licensed under the Apache-2.0 license

//! SDRAM memory controller (DRAMC) registers.

use tock_registers::register_bitfields;

pub const PROT_KEY: u64 = 0x00;
pub const INTR_STATUS: u64 = 0x04;
pub const INTR_CLEAR: u64 = 0x08;
pub const INTR_MASK: u64 = 0x0c;
pub const MCFG: u64 = 0x10;
pub const MCTL: u64 = 0x14;
pub const MSTS: u64 = 0x18;
pub const ERROR: u64 = 0x1c;
pub const ACTIME1: u64 = 0x20;
pub const ACTIME2: u64 = 0x24;
pub const ACTIME3: u64 = 0x28;
pub const ACTIME4: u64 = 0x2c;
pub const ACTIME5: u64 = 0x30;
pub const ACTIME6: u64 = 0x34;
pub const ACTIME7: u64 = 0x38;
pub const DFI_TIMING: u64 = 0x3c;
pub const DCFG: u64 = 0x40;
pub const DCTL: u64 = 0x44;
pub const MRCTL: u64 = 0x48;
pub const MRWR: u64 = 0x4c;
pub const MRRD: u64 = 0x50;
pub const MR01: u64 = 0x54;
pub const MR23: u64 = 0x58;
pub const MR45: u64 = 0x5c;
pub const MR67: u64 = 0x60;
pub const REFCTL: u64 = 0x64;
pub const REFMNG_CTL: u64 = 0x68;
pub const REFSTS: u64 = 0x6c;
pub const ZQCTL: u64 = 0x70;
pub const ARBCTL: u64 = 0x88;
pub const BISTCFG: u64 = 0xc0;
pub const BIST_ADDR: u64 = 0xc4;
pub const BIST_SIZE: u64 = 0xc8;
pub const BIST_PATT: u64 = 0xcc;
pub const BIST_RES: u64 = 0xd0;
pub const BIST_FAIL_ADDR: u64 = 0xd4;

/// The seven AC timing registers, in programming order.
pub const ACTIME: [u64; 7] = [ACTIME1, ACTIME2, ACTIME3, ACTIME4, ACTIME5, ACTIME6, ACTIME7];

/// The mode-register pair registers, lowest pair first.
pub const MR_PAIRS: [u64; 4] = [MR01, MR23, MR45, MR67];

/// Writing this to PROT_KEY unlocks the controller registers; any other value locks them.
pub const UNLOCK_KEY: u32 = 0x1688_a8a8;

register_bitfields! [
    u32,

    /// Protection key status
    pub ProtKey [
        UNLOCKED OFFSET(0) NUMBITS(1) [],
    ],

    /// Interrupt status (INTR_STATUS) and write-1-to-clear (INTR_CLEAR)
    pub Intr [
        PHY_INIT_DONE OFFSET(0) NUMBITS(1) [],
        MR_DONE OFFSET(1) NUMBITS(1) [],
        OVERSIZE_ERR OFFSET(2) NUMBITS(1) [],
        PROT_ERR OFFSET(3) NUMBITS(1) [],
        ECC_ERR OFFSET(4) NUMBITS(1) [],
        ECC_RCVY_ERR OFFSET(5) NUMBITS(1) [],
        BIST_DONE OFFSET(8) NUMBITS(1) [],
        ZQ_DONE OFFSET(9) NUMBITS(1) [],
        REF_DONE OFFSET(10) NUMBITS(1) [],
        FREQ_CHG_DONE OFFSET(11) NUMBITS(1) [],
        LOWPOWER_DONE OFFSET(12) NUMBITS(1) [],
        PHY_ERR OFFSET(15) NUMBITS(1) [],
        PWRCTL_ERR OFFSET(16) NUMBITS(1) [],
    ],

    /// Memory configuration
    pub Mcfg [
        CAPACITY OFFSET(0) NUMBITS(3) [
            Mb256 = 0,
            Mb512 = 1,
            Gb1 = 2,
            Gb2 = 3,
        ],
        DRAM_TYPE OFFSET(4) NUMBITS(1) [
            Ddr4 = 0,
            Ddr5 = 1,
        ],
    ],

    /// Memory control
    pub Mctl [
        PHY_INIT_START OFFSET(0) NUMBITS(1) [],
        SELF_REF_START OFFSET(1) NUMBITS(1) [],
        PHY_LOWPOWER_START OFFSET(2) NUMBITS(1) [],
        FREQ_CHG_START OFFSET(3) NUMBITS(1) [],
        PHY_POWER_ON OFFSET(16) NUMBITS(1) [],
        PHY_RESET OFFSET(17) NUMBITS(1) [],
        PHY_CLK_DIS OFFSET(18) NUMBITS(1) [],
    ],

    // AC timing registers. Every field holds the cycle count divided by two.

    pub AcTime1 [
        TRCD OFFSET(0) NUMBITS(8) [],
        TRP OFFSET(8) NUMBITS(8) [],
        TRAS OFFSET(16) NUMBITS(8) [],
        TRRD OFFSET(24) NUMBITS(8) [],
    ],

    pub AcTime2 [
        TRRD_L OFFSET(0) NUMBITS(8) [],
        TFAW OFFSET(8) NUMBITS(8) [],
        TRTP OFFSET(16) NUMBITS(8) [],
        TCCD_L OFFSET(24) NUMBITS(8) [],
    ],

    pub AcTime3 [
        TWTR OFFSET(0) NUMBITS(8) [],
        TWTR_L OFFSET(8) NUMBITS(8) [],
        TWTR_A OFFSET(16) NUMBITS(8) [],
        TWTP OFFSET(24) NUMBITS(8) [],
    ],

    pub AcTime4 [
        TRTW OFFSET(0) NUMBITS(8) [],
        TMRD OFFSET(8) NUMBITS(8) [],
        TDLLK OFFSET(16) NUMBITS(11) [],
    ],

    pub AcTime5 [
        TRFC OFFSET(0) NUMBITS(11) [],
        TRFCSB OFFSET(16) NUMBITS(11) [],
    ],

    pub AcTime6 [
        TXP OFFSET(0) NUMBITS(8) [],
        TPD OFFSET(8) NUMBITS(8) [],
        TCKSRE OFFSET(16) NUMBITS(8) [],
        TCSHSR OFFSET(24) NUMBITS(8) [],
    ],

    pub AcTime7 [
        TREFSBRD OFFSET(0) NUMBITS(8) [],
        TZQCS OFFSET(16) NUMBITS(10) [],
    ],

    /// PHY-facing DFI latencies, in DFI clocks (not halved)
    pub DfiTiming [
        PHY_WRLAT OFFSET(0) NUMBITS(6) [],
        RDDATA_EN OFFSET(8) NUMBITS(6) [],
        PHY_WRDATA OFFSET(16) NUMBITS(6) [],
    ],

    /// DFI control
    pub Dctl [
        INIT_WORKAROUND OFFSET(4) NUMBITS(1) [],
        DFI_RESET OFFSET(16) NUMBITS(1) [],
        CKE_OUT OFFSET(17) NUMBITS(1) [],
    ],

    /// Mode-register command control
    pub Mrctl [
        CMD_START OFFSET(0) NUMBITS(1) [],
        CMD_WRITE OFFSET(1) NUMBITS(1) [],
        CMD_DLL_RESET OFFSET(7) NUMBITS(1) [],
        MR_ADDR OFFSET(8) NUMBITS(4) [],
        READY_STATUS OFFSET(30) NUMBITS(1) [],
        ERR_STATUS OFFSET(31) NUMBITS(1) [],
    ],

    /// MR01, MR23, MR45 and MR67: even register low, odd register high
    pub ModeRegPair [
        EVEN OFFSET(0) NUMBITS(16) [],
        ODD OFFSET(16) NUMBITS(16) [],
    ],

    /// Refresh control
    pub Refctl [
        REFRESH_DISABLE OFFSET(0) NUMBITS(1) [],
        REFRESH_PERIOD OFFSET(16) NUMBITS(16) [],
    ],

    /// BIST configuration
    pub BistCfg [
        START OFFSET(0) NUMBITS(1) [],
        ENABLE OFFSET(1) NUMBITS(1) [],
        BURST_MODE OFFSET(2) NUMBITS(2) [
            Read = 0,
            Write = 1,
            WriteRead = 2,
            RwSwitch = 3,
        ],
        PATTERN_MODE OFFSET(4) NUMBITS(3) [
            Fixed = 0,
            Incremental = 1,
            Prbs = 2,
            Crc = 3,
        ],
        INIT_MODE OFFSET(7) NUMBITS(1) [],
    ],

    /// BIST result
    pub BistRes [
        DONE OFFSET(8) NUMBITS(1) [],
        FAIL OFFSET(9) NUMBITS(1) [],
        RUNNING OFFSET(10) NUMBITS(1) [],
    ],
];
