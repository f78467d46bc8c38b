mod i2c;
mod uart;

pub use i2c::{I2cBus, L76_I2C_ADDRESS};
pub use uart::UartBus;
