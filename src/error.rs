use core::fmt::{self, Debug};
use embedded_hal::i2c::I2c;

/// The error type used by this library.
///
/// This can encapsulate an I2C error, and adds its own protocol errors on top
/// of that.
pub enum Error<I2C: I2c> {
    /// An I2C transfer failed.
    ///
    /// A chip that is still committing a previous write does not acknowledge
    /// its address, so this is also what an early command looks like.
    I2c(I2C::Error),

    /// The transfer would touch memory outside the device.
    OutOfRange { offset: u32, len: usize },

    /// The device profile cannot describe a real chip.
    InvalidProfile,

    /// The chip did not finish its write cycle in time.
    Timeout,

    /// Nothing acknowledged the device address.
    NotPresent,
}

#[cfg(feature = "defmt")]
impl<I2C: I2c> defmt::Format for Error<I2C> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::I2c(_i2c) => defmt::write!(fmt, "Error::I2c"),
            Error::OutOfRange { offset, len } => {
                defmt::write!(fmt, "Error::OutOfRange({=u32:#x}, {=usize})", offset, len)
            }
            Error::InvalidProfile => defmt::write!(fmt, "Error::InvalidProfile"),
            Error::Timeout => defmt::write!(fmt, "Error::Timeout"),
            Error::NotPresent => defmt::write!(fmt, "Error::NotPresent"),
        }
    }
}

impl<I2C: I2c> Debug for Error<I2C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(i2c) => write!(f, "Error::I2c({:?})", i2c),
            Error::OutOfRange { offset, len } => {
                write!(f, "Error::OutOfRange {{ offset: {:#x}, len: {} }}", offset, len)
            }
            Error::InvalidProfile => f.write_str("Error::InvalidProfile"),
            Error::Timeout => f.write_str("Error::Timeout"),
            Error::NotPresent => f.write_str("Error::NotPresent"),
        }
    }
}
