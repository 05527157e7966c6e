/*++

Licensed under the Apache-2.0 license.

File Name:

    delay.rs

Abstract:

    File contains a simulated microsecond delay source.

--*/

use poll_common::Delay;

/// Delay source that only accumulates the time it was asked to wait.
#[derive(Debug, Default)]
pub struct SimDelay {
    elapsed_us: u64,
    calls: u64,
}

impl SimDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total simulated time spent in `delay_us`.
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Delay for SimDelay {
    fn delay_us(&mut self, us: u32) {
        self.elapsed_us += u64::from(us);
        self.calls += 1;
    }
}
