// Licensed under the Apache-2.0 license

//! Bounded polling of hardware status.

#![cfg_attr(not(test), no_std)]

/// Busy-wait source used between polls and for fixed settle delays.
pub trait Delay {
    /// Spin for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

/// The polled condition did not become true within the allotted time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimeout {
    pub waited_us: u32,
}

/// Evaluates `condition` every `interval_us` microseconds until it returns
/// `true` or `timeout_us` microseconds have elapsed.
///
/// The condition is always evaluated at least once, so a zero timeout is a
/// single non-blocking check.
pub fn poll_until<D: Delay + ?Sized>(
    delay: &mut D,
    timeout_us: u32,
    interval_us: u32,
    mut condition: impl FnMut() -> bool,
) -> Result<(), PollTimeout> {
    let interval_us = interval_us.max(1);
    let mut waited_us = 0u32;
    loop {
        if condition() {
            return Ok(());
        }
        if waited_us >= timeout_us {
            return Err(PollTimeout { waited_us });
        }
        delay.delay_us(interval_us);
        waited_us = waited_us.saturating_add(interval_us);
    }
}
