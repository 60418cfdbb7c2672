//! # Error codes carried by heartbeats.
//!
//! An [`ErrorCode`] is a single unsigned byte self-reported by a worker.
//! The value space:
//!
//! ```text
//! 0..=2      generic codes (NONE, TIMEOUT, NULL_ARGUMENT)
//! 128..=167  "user" codes, five contiguous bands of 8:
//!              128..=135  no action
//!              136..=143  notify only
//!              144..=151  terminate the reporting worker
//!              152..=159  terminate every worker
//!              160..=167  restart the reporting worker
//! everything else  unrecognized → treated fail-closed by the classifier
//! ```
//!
//! Within a band, the low 3 bits are an opaque sub-reason meaningful only to
//! the emitting worker; the supervisor acts on the band alone.
//!
//! ## Example
//! ```
//! use plantvisor::ErrorCode;
//!
//! let code = ErrorCode::new(ErrorCode::USER_NOTIFY_FIRST.get() + 5);
//! assert!(code.is_user());
//! assert_eq!(code.sub_reason(), 5);
//! ```

use std::fmt;

/// Status code self-reported in a heartbeat. See the module docs for the
/// band layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(u8);

impl ErrorCode {
    /// Generic: nothing to report.
    pub const NONE: ErrorCode = ErrorCode(0);
    /// Generic: a heartbeat timeout, synthesized by the supervisor for a
    /// worker that missed too many cycles.
    pub const TIMEOUT: ErrorCode = ErrorCode(1);
    /// Generic: a required argument was missing.
    pub const NULL_ARGUMENT: ErrorCode = ErrorCode(2);

    /// First code of the no-action band (healthy heartbeats report this).
    pub const USER_NONE_FIRST: ErrorCode = ErrorCode(128);
    /// First code of the notify-only band.
    pub const USER_NOTIFY_FIRST: ErrorCode = ErrorCode(136);
    /// First code of the terminate-worker band.
    pub const USER_TERM_WORKER_FIRST: ErrorCode = ErrorCode(144);
    /// First code of the terminate-all band.
    pub const USER_TERM_ALL_FIRST: ErrorCode = ErrorCode(152);
    /// First code of the restart-worker band.
    pub const USER_RESTART_FIRST: ErrorCode = ErrorCode(160);

    /// Wraps a raw byte. Unrecognized values are legal; the classifier
    /// treats them fail-closed.
    #[inline]
    pub const fn new(raw: u8) -> Self {
        ErrorCode(raw)
    }

    /// Raw byte value.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// True for codes in the user range (any defined band).
    #[inline]
    pub const fn is_user(self) -> bool {
        self.0 >= 128 && self.0 <= 167
    }

    /// Opaque per-band sub-reason (low 3 bits). Meaningful only to the
    /// emitting worker.
    #[inline]
    pub const fn sub_reason(self) -> u8 {
        self.0 & 0x07
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
