// Licensed under the Apache-2.0 license

/// Access to memory-mapped registers and DRAM by absolute bus address.
///
/// Firmware uses [`Mmio`]; tests drive the same code against an emulated
/// register file. Reads take `&mut self` because reading a hardware register
/// can have side effects (mailbox shadows, FIFOs).
pub trait RegisterFile {
    fn read32(&mut self, addr: u64) -> u32;

    fn write32(&mut self, addr: u64, val: u32);

    fn read16(&mut self, addr: u64) -> u16;

    fn write16(&mut self, addr: u64, val: u16);
}

/// Volatile accesses to physical addresses. Only valid while the MMU is off
/// or the register windows are identity mapped.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// Every address later passed to this register file must be a valid,
    /// suitably aligned device or DRAM address, and nothing else may access
    /// the SDRAM controller while the driver runs.
    pub const unsafe fn new() -> Self {
        Mmio { _private: () }
    }
}

impl RegisterFile for Mmio {
    fn read32(&mut self, addr: u64) -> u32 {
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    fn write32(&mut self, addr: u64, val: u32) {
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, val) }
    }

    fn read16(&mut self, addr: u64) -> u16 {
        unsafe { core::ptr::read_volatile(addr as usize as *const u16) }
    }

    fn write16(&mut self, addr: u64, val: u16) {
        unsafe { core::ptr::write_volatile(addr as usize as *mut u16, val) }
    }
}
