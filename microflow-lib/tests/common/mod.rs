//! Shared test transport: a scripted bus standing in for the controller.

use microflow_lib::frame::Frame;
use microflow_lib::{MicroFlow, Transport};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Scripted transport. Command bytes written by the session are
/// recorded; read transfers (all-zero tx, the way the session clocks a
/// reply in) are served from a queued reply stream, padded with zeroes
/// once the queue runs dry.
#[derive(Default)]
pub struct MockTransport {
    pub written: Vec<u8>,
    pub reply: VecDeque<u8>,
    pub fail: bool,
}

impl MockTransport {
    pub fn with_reply(reply: &[u8]) -> Self {
        MockTransport {
            reply: reply.iter().copied().collect(),
            ..MockTransport::default()
        }
    }
}

impl Transport for MockTransport {
    fn transfer(&mut self, tx: &[u8]) -> io::Result<Vec<u8>> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "bus gone"));
        }
        if tx.iter().any(|&b| b != 0) {
            self.written.extend_from_slice(tx);
            return Ok(vec![0; tx.len()]);
        }
        Ok((0..tx.len())
            .map(|_| self.reply.pop_front().unwrap_or(0))
            .collect())
    }
}

/// Encode a reply frame the way the device would.
#[allow(dead_code)]
pub fn reply_frame(frame_type: u8, payload: &[u8]) -> Vec<u8> {
    Frame::new(frame_type, payload.to_vec()).encode()
}

/// Session over a scripted transport with no reply pause.
#[allow(dead_code)]
pub fn session(reply: &[u8]) -> MicroFlow<MockTransport> {
    MicroFlow::new(MockTransport::with_reply(reply), Duration::ZERO)
}
