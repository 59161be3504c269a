// src/exit.rs
//! Standardized process exit codes for `sonde`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SondeExit {
    /// Scan completed with no violations.
    Success = 0,
    /// Generic error (e.g. IO, config, bad arguments).
    Error = 1,
    /// Scan completed and found violations.
    CheckFailed = 6,
}

impl SondeExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for SondeExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
