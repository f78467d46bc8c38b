use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use log::trace;
use mapper_core::{BusError, GnssBus, READ_CHUNK_LEN};

/// Default 7-bit address of the Quectel L76 on the Pytrack board.
pub const L76_I2C_ADDRESS: u8 = 0x10;

/// GNSS bus over I2C.
///
/// The L76 streams NMEA output through a plain I2C read with no register
/// address. When it has nothing to say it pads the read with line feeds,
/// so every read returns a full chunk.
///
/// # Example
///
/// ```ignore
/// let mut bus = I2cBus::new(i2c);
/// bus.wake()?;
/// let receiver = GnssReceiver::new(bus, EmbassyClock, Delay, AcquisitionConfig::default());
/// ```
pub struct I2cBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cBus<I> {
    /// Create a bus talking to the L76 at [`L76_I2C_ADDRESS`].
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, L76_I2C_ADDRESS)
    }

    pub fn with_address(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    #[inline]
    #[must_use]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write the single zero byte the L76 expects before its first read.
    pub fn wake(&mut self) -> Result<(), BusError> {
        self.i2c.write(self.address, &[0]).map_err(bus_error)
    }

    /// Give the I2C peripheral back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> GnssBus for I2cBus<I> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        let len = buf.len().min(READ_CHUNK_LEN);
        if len == 0 {
            return Ok(0);
        }

        self.i2c.read(self.address, &mut buf[..len]).map_err(bus_error)?;
        trace!("i2c read {} bytes from {:#04x}", len, self.address);
        Ok(len)
    }
}

/// Convert I2C errors to BusError by their kind.
fn bus_error<E: embedded_hal::i2c::Error>(e: E) -> BusError {
    match e.kind() {
        ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
        ErrorKind::ArbitrationLoss => BusError::ArbitrationLoss,
        ErrorKind::Overrun => BusError::Overrun,
        _ => BusError::Io,
    }
}
