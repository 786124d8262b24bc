use crate::device::Transport;
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
use std::io;
use std::path::Path;
use tracing::info;

/// Default bus clock. The controller samples reliably well below 1 MHz.
pub const DEFAULT_SPEED_HZ: u32 = 500_000;

/// Transport over a Linux spidev node, e.g. `/dev/spidev0.0`.
pub struct SpidevTransport {
    spi: Spidev,
}

impl SpidevTransport {
    /// Open and configure the bus: mode 0, 8 bits per word.
    pub fn open<P: AsRef<Path>>(path: P, speed_hz: u32) -> io::Result<Self> {
        let path = path.as_ref();
        let mut spi = Spidev::open(path)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)?;
        info!(path = %path.display(), speed_hz, "SPI bus configured");
        Ok(SpidevTransport { spi })
    }
}

impl Transport for SpidevTransport {
    fn transfer(&mut self, tx: &[u8]) -> io::Result<Vec<u8>> {
        let mut rx = vec![0u8; tx.len()];
        let mut xfer = SpidevTransfer::read_write(tx, &mut rx);
        self.spi.transfer(&mut xfer)?;
        Ok(rx)
    }
}
