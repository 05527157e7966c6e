// Licensed under the Apache-2.0 license

//! Errors reported by the SDRAM controller bring-up.
//!
//! Every variant has a stable numeric code (see [`SdramError::code`]) so a
//! boot stage without formatting support can still report the failure, the
//! same way the ROM reports fatal error codes.

#![cfg_attr(not(test), no_std)]

use core::fmt;
use thiserror::Error;

/// Hardware condition a bounded poll was waiting on when it expired.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollSite {
    ProtectionUnlock = 0x01,
    ProtectionLock = 0x02,
    MrDone = 0x03,
    SelfRefreshDone = 0x04,
    PhyInitDone = 0x05,
    InterruptsCleared = 0x06,
    BistDone = 0x07,
    MailboxShadowClear = 0x08,
    MailboxShadowSet = 0x09,
}

impl fmt::Display for PollSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PollSite::ProtectionUnlock => "protection key unlock",
            PollSite::ProtectionLock => "protection key lock",
            PollSite::MrDone => "MRS done",
            PollSite::SelfRefreshDone => "self-refresh done",
            PollSite::PhyInitDone => "PHY init done",
            PollSite::InterruptsCleared => "interrupt status clear",
            PollSite::BistDone => "BIST done",
            PollSite::MailboxShadowClear => "mailbox write-protect shadow clear",
            PollSite::MailboxShadowSet => "mailbox write-protect shadow set",
        };
        f.write_str(name)
    }
}

/// Timing parameter that has to go through a JEDEC mode-register table.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingParam {
    CasLatency = 0x1,
    CasWriteLatency = 0x2,
    WriteRecovery = 0x3,
    CcdL = 0x4,
}

impl fmt::Display for TimingParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimingParam::CasLatency => "CL",
            TimingParam::CasWriteLatency => "CWL",
            TimingParam::WriteRecovery => "WR/RTP",
            TimingParam::CcdL => "tCCD_L",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdramError {
    #[error("timed out waiting for {0}")]
    Timeout(PollSite),
    #[error("BIST reported {errors} error(s)")]
    BistFailed { errors: u32 },
    #[error("no mode-register encoding for {param} = {value}")]
    UnsupportedTiming { param: TimingParam, value: u32 },
    #[error("invalid capacity field 0x{0:x}")]
    InvalidCapacity(u32),
    #[error("training firmware image length {0} is not a multiple of 4")]
    MisalignedImage(u32),
}

impl SdramError {
    const TIMEOUT_BASE: u32 = 0x000d_0100;
    const UNSUPPORTED_TIMING_BASE: u32 = 0x000d_0200;

    pub const BIST_FAILED: u32 = 0x000d_0001;
    pub const INVALID_CAPACITY: u32 = 0x000d_0002;
    pub const MISALIGNED_IMAGE: u32 = 0x000d_0003;

    /// Numeric code suitable for a fatal-error handler or a flow status register.
    pub fn code(&self) -> u32 {
        match self {
            SdramError::Timeout(site) => Self::TIMEOUT_BASE | *site as u32,
            SdramError::BistFailed { .. } => Self::BIST_FAILED,
            SdramError::UnsupportedTiming { param, .. } => {
                Self::UNSUPPORTED_TIMING_BASE | *param as u32
            }
            SdramError::InvalidCapacity(_) => Self::INVALID_CAPACITY,
            SdramError::MisalignedImage(_) => Self::MISALIGNED_IMAGE,
        }
    }
}

impl From<SdramError> for u32 {
    fn from(err: SdramError) -> u32 {
        err.code()
    }
}

pub type SdramResult<T> = Result<T, SdramError>;
