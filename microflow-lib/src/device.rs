use crate::command::Command;
use crate::constants::{CHANNEL_COUNT, FRAME_START, MIN_FRAME_SIZE};
use crate::error::{FlowError, FrameError};
use crate::frame::Frame;
use crate::reply::{Identification, PressureReport, status_ok};
use bytes::Bytes;
use std::io;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// One synchronous full-duplex exchange on the bus: clock `tx` out and
/// return the bytes clocked in. Implementations must transfer exactly
/// `tx.len()` bytes and preserve byte order.
pub trait Transport {
    fn transfer(&mut self, tx: &[u8]) -> io::Result<Vec<u8>>;
}

/// A session with one MICROFLOW controller.
///
/// The session owns the bus for its lifetime. Every operation is one
/// complete write-then-read transaction with a pause in between: the
/// device gives no ready signal, it just needs `reply_pause` to have
/// its reply loaded. Too short a pause shows up as checksum failures
/// on the reply, not as an error from the sleep itself.
pub struct MicroFlow<T: Transport> {
    transport: T,
    reply_pause: Duration,
}

impl<T: Transport> MicroFlow<T> {
    pub fn new(transport: T, reply_pause: Duration) -> Self {
        MicroFlow {
            transport,
            reply_pause,
        }
    }

    /// Release the bus.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Clock in `n` reply bytes by shifting out zeroes.
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, FlowError> {
        let rx = self.transport.transfer(&vec![0u8; n])?;
        if rx.len() != n {
            return Err(FlowError::ShortTransfer {
                expected: n,
                actual: rx.len(),
            });
        }
        Ok(rx)
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), FlowError> {
        let encoded = frame.encode();
        debug!(frame_type = frame.frame_type, len = encoded.len(), "sending frame");
        self.transport.transfer(&encoded)?;
        Ok(())
    }

    /// Read one reply frame from the bus.
    ///
    /// The outer result is the transport; the inner one is frame
    /// integrity. A reply that does not open with the start marker is
    /// abandoned without clocking any further bytes.
    fn read_frame(&mut self) -> Result<Result<Frame, FrameError>, FlowError> {
        let head = self.read_bytes(1)?;
        if head[0] != FRAME_START {
            return Ok(Err(FrameError::BadStart(head[0])));
        }
        let header = self.read_bytes(2)?;
        let length = header[0];
        if usize::from(length) < MIN_FRAME_SIZE {
            return Ok(Err(FrameError::InvalidLength(length)));
        }
        let rest = self.read_bytes(usize::from(length) - 3)?;

        let mut raw = Vec::with_capacity(usize::from(length));
        raw.push(head[0]);
        raw.extend_from_slice(&header);
        raw.extend_from_slice(&rest);
        Ok(Frame::try_from(Bytes::from(raw)))
    }

    /// Perform one command/reply transaction. An invalid reply frame is
    /// logged and reported as `None`; retrying is the caller's call.
    fn exchange(&mut self, command: &Command) -> Result<Option<Bytes>, FlowError> {
        self.write_frame(&command.to_frame())?;
        thread::sleep(self.reply_pause);
        match self.read_frame()? {
            Ok(frame) => {
                debug!(frame_type = frame.frame_type, len = frame.payload.len(), "reply frame");
                Ok(Some(frame.payload))
            }
            Err(err) => {
                warn!(error = %err, "discarding invalid reply frame");
                Ok(None)
            }
        }
    }

    /// Ask the controller for its identity string.
    pub fn get_id(&mut self) -> Result<Identification, FlowError> {
        let reply = self.exchange(&Command::GetId)?;
        Ok(Identification::from_reply(reply.as_deref()))
    }

    /// Command new target pressures, one per channel, in millibar.
    /// Returns whether the device accepted them.
    pub fn set_pressure_targets(
        &mut self,
        targets_mbar: [f64; CHANNEL_COUNT],
    ) -> Result<bool, FlowError> {
        let reply = self.exchange(&Command::SetPressureTargets(targets_mbar))?;
        Ok(reply.as_deref().is_some_and(status_ok))
    }

    /// Read back the commanded target pressures.
    pub fn get_pressure_targets(&mut self) -> Result<PressureReport, FlowError> {
        let reply = self.exchange(&Command::GetPressureTargets)?;
        Ok(PressureReport::from_reply(reply.as_deref()))
    }

    /// Read the measured pressures.
    pub fn get_pressure_actual(&mut self) -> Result<PressureReport, FlowError> {
        let reply = self.exchange(&Command::GetPressureActual)?;
        Ok(PressureReport::from_reply(reply.as_deref()))
    }
}
