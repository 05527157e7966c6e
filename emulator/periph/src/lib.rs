/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the SDRAM controller emulator peripherals.

--*/

mod delay;
mod sdram;

pub use delay::SimDelay;
pub use sdram::{AccessKind, BusAccess, EmulatedSdram, Stall};
