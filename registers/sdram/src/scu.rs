// Licensed under the Apache-2.0 license

//! System control unit bits consumed by the SDRAM driver. The controller
//! never writes the SCU except for the "DRAM trained" scratch bit.

use tock_registers::register_bitfields;

/// CPU-die SCU: hardware strap 1.
pub const CPU_HWSTRAP1: u64 = 0x010;
/// CPU-die SCU: scratch register that survives warm resets.
pub const CPU_VGA0_SCRATCH: u64 = 0x900;
/// CPU-die SCU: PCIe/VGA function 0 control.
pub const CPU_PCI_MISC70: u64 = 0xa70;
/// CPU-die SCU: PCIe/VGA function 1 control.
pub const CPU_PCI_MISC80: u64 = 0xa80;

/// IO-die SCU: hardware strap 1.
pub const IO_HWSTRAP1: u64 = 0x010;

register_bitfields! [
    u32,

    pub CpuHwStrap1 [
        /// Selects the 64MB VGA reservation unit instead of 32MB.
        VGA_BURST_MODE OFFSET(11) NUMBITS(1) [],
    ],

    pub Vga0Scratch [
        DRAM_INIT_READY OFFSET(6) NUMBITS(1) [],
    ],

    pub PciMisc [
        VGA_ENABLE OFFSET(0) NUMBITS(1) [],
    ],

    pub IoHwStrap1 [
        DDR4 OFFSET(10) NUMBITS(1) [],
    ],
];
