// Licensed under the Apache-2.0 license

//! Register offsets and bitfield layouts for the AST2700 SDRAM controller,
//! the DesignWare DDR PHY mailbox CSRs and the SCU bits the driver reads,
//! plus the [`RegisterFile`] access trait the driver is written against.
//!
//! Offsets are relative to the window they live in; the driver adds the base
//! address from the memory map.

#![cfg_attr(not(test), no_std)]

pub mod dramc;
pub mod phy;
mod regfile;
pub mod scu;

pub use regfile::{Mmio, RegisterFile};
