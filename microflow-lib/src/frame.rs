//! Frame encoding and validation for the controller's wire format.
//!
//! On-wire frame:
//! ```text
//! [0x02] [length: u8] [type: u8] [payload ..] [checksum: u8]
//! ```
//! `length` counts the whole frame, header and checksum included. The
//! checksum is the two's-complement negation of the 8-bit sum of every
//! preceding byte, so a valid frame sums to zero mod 256.

use crate::constants::{FRAME_OVERHEAD, FRAME_START, MIN_FRAME_SIZE};
use crate::error::FrameError;
use bytes::Bytes;

/// A single wire frame: one command or one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub frame_type: u8,
    pub payload: Bytes,
}

impl Frame {
    pub fn new(frame_type: u8, payload: impl Into<Bytes>) -> Self {
        Frame {
            frame_type,
            payload: payload.into(),
        }
    }

    fn checksum(bytes: &[u8]) -> u8 {
        bytes
            .iter()
            .fold(0u8, |sum, &b| sum.wrapping_add(b))
            .wrapping_neg()
    }

    /// Encode the frame for transmission. The length byte caps payloads
    /// at 251 bytes; real commands stay far below that.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + FRAME_OVERHEAD);
        out.push(FRAME_START);
        out.push((self.payload.len() + FRAME_OVERHEAD) as u8);
        out.push(self.frame_type);
        out.extend_from_slice(&self.payload);
        out.push(Self::checksum(&out));
        out
    }
}

impl TryFrom<Bytes> for Frame {
    type Error = FrameError;

    /// Validate one complete frame. A frame that fails any check is
    /// discarded whole; there is no resynchronization and no partial
    /// data.
    fn try_from(bytes: Bytes) -> Result<Self, FrameError> {
        if bytes.len() < MIN_FRAME_SIZE {
            return Err(FrameError::InvalidLength(bytes.len() as u8));
        }
        if bytes[0] != FRAME_START {
            return Err(FrameError::BadStart(bytes[0]));
        }
        let length = bytes[1];
        if usize::from(length) != bytes.len() {
            return Err(FrameError::InvalidLength(length));
        }
        if bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)) != 0 {
            return Err(FrameError::ChecksumMismatch);
        }
        let payload = bytes.slice(3..bytes.len() - 1);
        Ok(Frame {
            frame_type: bytes[2],
            payload,
        })
    }
}
