use crate::constants::DEVICE_ID;
use crate::pressure;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every reply payload leads with a status byte; zero means the device
/// accepted the command.
pub(crate) fn status_ok(payload: &[u8]) -> bool {
    payload.first() == Some(&0)
}

/// Outcome of a `GET_ID` exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identification {
    /// The reply frame was intact and the device reported status zero.
    pub status_ok: bool,
    /// Identity string as reported by the device; empty when the reply
    /// was invalid.
    pub device_id: String,
    /// Whether `device_id` equals the expected `"MICROFLOW"`.
    pub id_matches: bool,
}

impl Identification {
    pub(crate) fn from_reply(payload: Option<&[u8]>) -> Self {
        match payload {
            Some(payload) => {
                let device_id =
                    String::from_utf8_lossy(payload.get(1..).unwrap_or(&[])).into_owned();
                Identification {
                    status_ok: status_ok(payload),
                    id_matches: device_id == DEVICE_ID,
                    device_id,
                }
            }
            None => Identification {
                status_ok: false,
                device_id: String::new(),
                id_matches: false,
            },
        }
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" (status {}, identity {})",
            self.device_id,
            if self.status_ok { "ok" } else { "error" },
            if self.id_matches { "match" } else { "mismatch" },
        )
    }
}

/// Pressures reported by the controller, one entry per channel in wire
/// (ascending channel) order.
///
/// The channel count is not fixed at decode time: the device reports
/// two bytes per channel after the status byte, and the reply length
/// determines how many there are.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressureReport {
    /// The reply frame was intact and the device reported status zero.
    pub status_ok: bool,
    /// One reading per channel, in millibar.
    pub pressures_mbar: Vec<f64>,
}

impl PressureReport {
    pub(crate) fn from_reply(payload: Option<&[u8]>) -> Self {
        match payload {
            Some(payload) => PressureReport {
                status_ok: status_ok(payload),
                pressures_mbar: payload
                    .get(1..)
                    .unwrap_or(&[])
                    .chunks_exact(2)
                    .map(|pair| pressure::decode_mbar(u16::from_le_bytes([pair[0], pair[1]])))
                    .collect(),
            },
            None => PressureReport {
                status_ok: false,
                pressures_mbar: Vec::new(),
            },
        }
    }
}

impl fmt::Display for PressureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.status_ok {
            write!(f, "(invalid) ")?;
        }
        for (channel, mbar) in self.pressures_mbar.iter().enumerate() {
            if channel > 0 {
                write!(f, ", ")?;
            }
            write!(f, "ch{channel}: {mbar:.3} mbar")?;
        }
        Ok(())
    }
}
