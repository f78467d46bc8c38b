use embedded_io::{Error as _, ErrorKind, Read};
use mapper_core::{BusError, GnssBus};

/// GNSS bus over a serial port.
///
/// Any `embedded_io::Read` works. Reads return whatever the port has
/// buffered; the reader should time out rather than block forever when the
/// receiver goes quiet, since the acquisition deadline is only checked
/// between reads.
pub struct UartBus<R> {
    rx: R,
}

impl<R: Read> UartBus<R> {
    pub fn new(rx: R) -> Self {
        Self { rx }
    }

    pub fn release(self) -> R {
        self.rx
    }
}

impl<R: Read> GnssBus for UartBus<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.rx.read(buf).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => BusError::Framing,
            ErrorKind::OutOfMemory => BusError::Overrun,
            _ => BusError::Io,
        })
    }
}
