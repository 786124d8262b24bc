use crate::constants::CHANNEL_COUNT;
use crate::frame::Frame;
use crate::pressure;
use bytes::Bytes;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Wire values of the command type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CommandType {
    GetId = 1,
    SetPressureTarget = 2,
    GetPressureTarget = 3,
    GetPressureActual = 4,
}

/// A command addressed to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GetId,
    /// Target pressures in millibar, one per channel.
    SetPressureTargets([f64; CHANNEL_COUNT]),
    GetPressureTargets,
    GetPressureActual,
}

impl Command {
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::GetId => CommandType::GetId,
            Command::SetPressureTargets(_) => CommandType::SetPressureTarget,
            Command::GetPressureTargets => CommandType::GetPressureTarget,
            Command::GetPressureActual => CommandType::GetPressureActual,
        }
    }

    /// Build the request frame for this command.
    ///
    /// The read commands carry no payload. Set-target carries, per
    /// channel, a mask byte selecting the channel (`1 << index`)
    /// followed by the little-endian fixed-point target.
    pub fn to_frame(&self) -> Frame {
        let payload = match self {
            Command::SetPressureTargets(targets_mbar) => {
                let mut payload = Vec::with_capacity(CHANNEL_COUNT * 3);
                for (channel, &mbar) in targets_mbar.iter().enumerate() {
                    payload.push(1u8 << channel);
                    payload.extend_from_slice(&pressure::encode_mbar(mbar).to_le_bytes());
                }
                Bytes::from(payload)
            }
            _ => Bytes::new(),
        };
        Frame::new(self.command_type().into(), payload)
    }
}
