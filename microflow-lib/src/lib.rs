pub mod command;
pub mod constants;
pub mod device;
pub mod error;
pub mod frame;
pub mod pressure;
pub mod reply;

#[cfg(feature = "spidev")]
pub mod spi;


// Re-export the session handle and its companions for easy access
pub use command::{Command, CommandType};
pub use device::{MicroFlow, Transport};
pub use error::{FlowError, FrameError};
pub use reply::{Identification, PressureReport};
