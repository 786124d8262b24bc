// Protocol constants for the MICROFLOW controller

/// Start-of-frame marker (STX)
pub const FRAME_START: u8 = 0x02;

/// Fixed bytes per frame: start, length, type, checksum
pub const FRAME_OVERHEAD: usize = 4;

/// Smallest valid frame (empty payload)
pub const MIN_FRAME_SIZE: usize = FRAME_OVERHEAD;

/// Identity string reported by the controller
pub const DEVICE_ID: &str = "MICROFLOW";

/// Pressure channels driven by one set-target command. The wire format
/// addresses channels through a mask byte and could carry up to eight,
/// but the controller has exactly four.
pub const CHANNEL_COUNT: usize = 4;

/// Fractional bits in the fixed-point pressure encoding
pub const PRESSURE_SHIFT: u32 = 3;

/// Fixed-point scale factor: wire values are eighths of a millibar
pub const PRESSURE_SCALE: f64 = (1u16 << PRESSURE_SHIFT) as f64;

/// Largest pressure representable on the wire, in millibar
pub const MAX_PRESSURE_MBAR: f64 = u16::MAX as f64 / PRESSURE_SCALE;
