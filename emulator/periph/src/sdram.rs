/*++

Licensed under the Apache-2.0 license.

File Name:

    sdram.rs

Abstract:

    File contains the emulated SDRAM controller, DDR PHY mailbox, SCU straps
    and the DRAM array behind them.

--*/

use bitflags::bitflags;
use sdram_config::SdramMemoryMap;
use sdram_registers::dramc::{self, BistCfg, BistRes, Intr, Mctl, Mrctl, ProtKey};
use sdram_registers::phy::{self, apb_offset, DctWriteProt, UctShadowRegs};
use sdram_registers::scu::{self, CpuHwStrap1, IoHwStrap1, PciMisc, Vga0Scratch};
use sdram_registers::RegisterFile;
use std::collections::{HashMap, VecDeque};
use tock_registers::LocalRegisterCopy;

/// Largest DRAM aperture the controller can decode.
const DRAM_WINDOW: u64 = 2 << 30;

bitflags! {
    /// Handshakes the emulated hardware refuses to complete.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Stall: u32 {
        const PROT_KEY = 1 << 0;
        const MR_DONE = 1 << 1;
        const SELF_REFRESH = 1 << 2;
        const PHY_INIT = 1 << 3;
        const BIST = 1 << 4;
        /// The PHY never re-arms the write-protect shadow after an ack.
        const MAILBOX_ACK = 1 << 5;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// One bus transaction seen by the emulator, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusAccess {
    pub kind: AccessKind,
    pub addr: u64,
    /// Access width in bytes.
    pub size: u8,
    pub value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Window {
    Dramc(u64),
    Phy(u64),
    ScuCpu(u64),
    ScuIo(u64),
    Dram(u64),
    Unmapped,
}

pub struct EmulatedSdram {
    map: SdramMemoryMap,
    installed_bytes: u64,
    stall: Stall,
    bist_failure: bool,

    dramc: HashMap<u64, u32>,
    intr_status: u32,
    unlocked: bool,
    mrs_log: Vec<u8>,
    bist_runs: u32,

    phy: HashMap<u64, u16>,
    mailbox: VecDeque<u32>,
    mailbox_acked: bool,

    scu_cpu: HashMap<u64, u32>,
    scu_io: HashMap<u64, u32>,

    dram: HashMap<u64, u32>,
    trace: Vec<BusAccess>,
}

impl EmulatedSdram {
    /// A DDR4 part of `installed_bytes` with no VGA functions enabled and
    /// an untrained scratch flag.
    pub fn new(map: SdramMemoryMap, installed_bytes: u64) -> Self {
        let mut emu = Self {
            map,
            installed_bytes,
            stall: Stall::empty(),
            bist_failure: false,
            dramc: HashMap::new(),
            intr_status: 0,
            unlocked: false,
            mrs_log: Vec::new(),
            bist_runs: 0,
            phy: HashMap::new(),
            mailbox: VecDeque::new(),
            mailbox_acked: false,
            scu_cpu: HashMap::new(),
            scu_io: HashMap::new(),
            dram: HashMap::new(),
            trace: Vec::new(),
        };
        emu.set_ddr4(true);
        emu
    }

    pub fn with_ddr4(mut self, ddr4: bool) -> Self {
        self.set_ddr4(ddr4);
        self
    }

    pub fn with_vga(mut self, vga0: bool, vga1: bool) -> Self {
        self.set_scu_bit(true, scu::CPU_PCI_MISC70, PciMisc::VGA_ENABLE::SET.value, vga0);
        self.set_scu_bit(true, scu::CPU_PCI_MISC80, PciMisc::VGA_ENABLE::SET.value, vga1);
        self
    }

    pub fn with_vga_burst_mode(mut self, burst: bool) -> Self {
        self.set_scu_bit(
            true,
            scu::CPU_HWSTRAP1,
            CpuHwStrap1::VGA_BURST_MODE::SET.value,
            burst,
        );
        self
    }

    pub fn with_trained_flag(mut self, trained: bool) -> Self {
        self.set_scu_bit(
            true,
            scu::CPU_VGA0_SCRATCH,
            Vga0Scratch::DRAM_INIT_READY::SET.value,
            trained,
        );
        self
    }

    pub fn with_stall(mut self, stall: Stall) -> Self {
        self.stall = stall;
        self
    }

    pub fn with_bist_failure(mut self, fail: bool) -> Self {
        self.bist_failure = fail;
        self
    }

    /// Queues a single-word mailbox message.
    pub fn post_message(&mut self, major: u16) {
        self.mailbox.push_back(u32::from(major));
    }

    /// Queues a streaming message: the 0x08 major code, a header word
    /// carrying `string_index` and the argument count, then the arguments.
    pub fn post_stream(&mut self, string_index: u16, args: &[u32]) {
        self.mailbox.push_back(u32::from(phy::msg::STREAMING));
        self.mailbox
            .push_back((u32::from(string_index) << 16) | args.len() as u32);
        self.mailbox.extend(args.iter().copied());
    }

    /// Queues the messages of a training run that ends in `last`.
    pub fn post_training_run(&mut self, last: u16) {
        self.post_message(phy::msg::END_OF_INIT);
        self.post_message(phy::msg::END_OF_FINE_WRITE_LEVELING);
        self.post_message(phy::msg::END_OF_READ_ENABLE_TRAINING);
        self.post_message(last);
    }

    pub fn mailbox_pending(&self) -> usize {
        self.mailbox.len()
    }

    pub fn trace(&self) -> &[BusAccess] {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Writes seen at `addr`, oldest first.
    pub fn writes_to(&self, addr: u64) -> Vec<u32> {
        self.trace
            .iter()
            .filter(|a| a.kind == AccessKind::Write && a.addr == addr)
            .map(|a| a.value)
            .collect()
    }

    /// Mode registers addressed by each MRS command, in issue order.
    pub fn mrs_log(&self) -> &[u8] {
        &self.mrs_log
    }

    pub fn bist_runs(&self) -> u32 {
        self.bist_runs
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn intr_status(&self) -> u32 {
        self.intr_status
    }

    /// Controller register by offset, without tracing.
    pub fn dramc_reg(&self, offset: u64) -> u32 {
        self.dramc.get(&offset).copied().unwrap_or(0)
    }

    pub fn scu_cpu_reg(&self, offset: u64) -> u32 {
        self.scu_cpu.get(&offset).copied().unwrap_or(0)
    }

    /// PHY CSR by APB word address, without tracing.
    pub fn phy_csr(&self, apb_addr: u32) -> u16 {
        self.phy.get(&apb_offset(apb_addr)).copied().unwrap_or(0)
    }

    fn set_ddr4(&mut self, ddr4: bool) {
        self.set_scu_bit(false, scu::IO_HWSTRAP1, IoHwStrap1::DDR4::SET.value, ddr4);
    }

    fn set_scu_bit(&mut self, cpu: bool, offset: u64, mask: u32, set: bool) {
        let regs = if cpu {
            &mut self.scu_cpu
        } else {
            &mut self.scu_io
        };
        let reg = regs.entry(offset).or_insert(0);
        if set {
            *reg |= mask;
        } else {
            *reg &= !mask;
        }
    }

    fn window(&self, addr: u64) -> Window {
        let within = |base: u64, size: u64| addr >= base && addr - base < size;
        let m = &self.map;
        if within(m.dramc_offset, m.dramc_size) {
            Window::Dramc(addr - m.dramc_offset)
        } else if within(m.phy_offset, m.phy_size) {
            Window::Phy(addr - m.phy_offset)
        } else if within(m.scu_cpu_offset, m.scu_cpu_size) {
            Window::ScuCpu(addr - m.scu_cpu_offset)
        } else if within(m.scu_io_offset, m.scu_io_size) {
            Window::ScuIo(addr - m.scu_io_offset)
        } else if within(m.dram_offset, DRAM_WINDOW) {
            // Address bits above the installed size are not decoded.
            Window::Dram((addr - m.dram_offset) % self.installed_bytes)
        } else {
            Window::Unmapped
        }
    }

    fn record(&mut self, kind: AccessKind, addr: u64, size: u8, value: u32) {
        self.trace.push(BusAccess {
            kind,
            addr,
            size,
            value,
        });
    }

    fn dramc_read(&mut self, offset: u64) -> u32 {
        match offset {
            dramc::PROT_KEY => {
                let unlocked = self.unlocked && !self.stall.contains(Stall::PROT_KEY);
                let locked_stuck = !self.unlocked && self.stall.contains(Stall::PROT_KEY);
                if unlocked || locked_stuck {
                    ProtKey::UNLOCKED::SET.value
                } else {
                    0
                }
            }
            dramc::INTR_STATUS => self.intr_status,
            _ => self.dramc_reg(offset),
        }
    }

    fn dramc_write(&mut self, offset: u64, val: u32) {
        match offset {
            dramc::PROT_KEY => {
                self.unlocked = val == dramc::UNLOCK_KEY;
            }
            dramc::INTR_CLEAR => {
                self.intr_status &= !val;
            }
            dramc::MCTL => {
                let mctl = LocalRegisterCopy::<u32, Mctl::Register>::new(val);
                if mctl.is_set(Mctl::PHY_INIT_START) && !self.stall.contains(Stall::PHY_INIT) {
                    self.intr_status |= Intr::PHY_INIT_DONE::SET.value;
                }
                if mctl.is_set(Mctl::SELF_REF_START) && !self.stall.contains(Stall::SELF_REFRESH)
                {
                    self.intr_status |= Intr::REF_DONE::SET.value;
                }
                // Start bits are self-clearing.
                let starts = Mctl::PHY_INIT_START::SET.value | Mctl::SELF_REF_START::SET.value;
                self.dramc.insert(offset, val & !starts);
            }
            dramc::MRCTL => {
                let mrctl = LocalRegisterCopy::<u32, Mrctl::Register>::new(val);
                if mrctl.is_set(Mrctl::CMD_START) {
                    self.mrs_log.push(mrctl.read(Mrctl::MR_ADDR) as u8);
                    if !self.stall.contains(Stall::MR_DONE) {
                        self.intr_status |= Intr::MR_DONE::SET.value;
                    }
                }
                self.dramc
                    .insert(offset, val & !Mrctl::CMD_START::SET.value);
            }
            dramc::BISTCFG => {
                let cfg = LocalRegisterCopy::<u32, BistCfg::Register>::new(val);
                if cfg.is_set(BistCfg::START) {
                    self.bist_runs += 1;
                    if !self.stall.contains(Stall::BIST) {
                        self.intr_status |= Intr::BIST_DONE::SET.value;
                        let mut res = BistRes::DONE::SET.value;
                        if self.bist_failure {
                            res |= BistRes::FAIL::SET.value;
                        }
                        self.dramc.insert(dramc::BIST_RES, res);
                    }
                } else {
                    self.dramc.insert(dramc::BIST_RES, 0);
                }
                self.dramc.insert(offset, val);
            }
            _ => {
                self.dramc.insert(offset, val);
            }
        }
    }

    fn phy_read(&mut self, offset: u64) -> u16 {
        if offset == apb_offset(phy::UCT_SHADOW_REGS) {
            // The firmware clears the shadow while a message is posted.
            let posted = !self.mailbox_acked && !self.mailbox.is_empty();
            let stuck = self.mailbox_acked && self.stall.contains(Stall::MAILBOX_ACK);
            if posted || stuck {
                0
            } else {
                UctShadowRegs::UCT_WRITE_PROT_SHADOW::SET.value
            }
        } else if offset == apb_offset(phy::UCT_WRITE_ONLY_SHADOW) {
            self.mailbox.front().map_or(0, |m| *m as u16)
        } else if offset == apb_offset(phy::UCT_DAT_WRITE_ONLY_SHADOW) {
            self.mailbox.front().map_or(0, |m| (*m >> 16) as u16)
        } else {
            self.phy.get(&offset).copied().unwrap_or(0)
        }
    }

    fn phy_write(&mut self, offset: u64, val: u16) {
        if offset == apb_offset(phy::DCT_WRITE_PROT) {
            let prot = LocalRegisterCopy::<u16, DctWriteProt::Register>::new(val);
            if prot.is_set(DctWriteProt::DCT_WRITE_PROT) {
                self.mailbox_acked = false;
            } else if !self.mailbox_acked && !self.mailbox.is_empty() {
                self.mailbox.pop_front();
                self.mailbox_acked = true;
            }
        }
        self.phy.insert(offset, val);
    }
}

impl RegisterFile for EmulatedSdram {
    fn read32(&mut self, addr: u64) -> u32 {
        let val = match self.window(addr) {
            Window::Dramc(offset) => self.dramc_read(offset),
            Window::Phy(offset) => {
                u32::from(self.phy_read(offset)) | (u32::from(self.phy_read(offset + 2)) << 16)
            }
            Window::ScuCpu(offset) => self.scu_cpu.get(&offset).copied().unwrap_or(0),
            Window::ScuIo(offset) => self.scu_io.get(&offset).copied().unwrap_or(0),
            Window::Dram(offset) => self.dram.get(&offset).copied().unwrap_or(0),
            Window::Unmapped => 0,
        };
        self.record(AccessKind::Read, addr, 4, val);
        val
    }

    fn write32(&mut self, addr: u64, val: u32) {
        self.record(AccessKind::Write, addr, 4, val);
        match self.window(addr) {
            Window::Dramc(offset) => self.dramc_write(offset, val),
            Window::Phy(offset) => {
                self.phy_write(offset, val as u16);
                self.phy_write(offset + 2, (val >> 16) as u16);
            }
            Window::ScuCpu(offset) => {
                self.scu_cpu.insert(offset, val);
            }
            Window::ScuIo(offset) => {
                self.scu_io.insert(offset, val);
            }
            Window::Dram(offset) => {
                self.dram.insert(offset, val);
            }
            Window::Unmapped => {}
        }
    }

    fn read16(&mut self, addr: u64) -> u16 {
        let val = match self.window(addr) {
            Window::Phy(offset) => self.phy_read(offset),
            _ => 0,
        };
        self.record(AccessKind::Read, addr, 2, u32::from(val));
        val
    }

    fn write16(&mut self, addr: u64, val: u16) {
        self.record(AccessKind::Write, addr, 2, u32::from(val));
        if let Window::Phy(offset) = self.window(addr) {
            self.phy_write(offset, val);
        }
    }
}
