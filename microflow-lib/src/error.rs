use std::io;
use thiserror::Error;

/// Per-frame integrity failures.
///
/// These mark one reply as invalid; they are not fatal to the session.
/// The device offers no retransmission request, so recovery (typically
/// reissuing the command) is left to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("expected start byte 0x02, got 0x{0:02x}")]
    BadStart(u8),

    #[error("invalid frame length {0}")]
    InvalidLength(u8),

    #[error("frame checksum mismatch")]
    ChecksumMismatch,
}

/// The primary error type for the `microflow-lib` crate.
///
/// Only failures of the transport itself are hard errors. Framing
/// problems and nonzero device status bytes are reported through the
/// `status_ok` flag on the reply types instead.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("bus transfer failed: {0}")]
    Transport(#[from] io::Error),

    #[error("short transfer: expected {expected} bytes, got {actual}")]
    ShortTransfer { expected: usize, actual: usize },
}
