//! A `no_std`, blocking driver for 24-series I2C EEPROMs (24C01 to 24C512 and
//! compatibles), built on the [`embedded-hal`](https://crates.io/crates/embedded-hal)
//! 1.0 `I2c` and `DelayNs` traits.
//!
//! Small parts (≤ 256 bytes) take a single address byte, larger parts take two,
//! high byte first. Both are driven through the same [`Eeprom24`] type; the
//! [`DeviceProfile`] decides which framing is used.
//!
//! After every write the chip goes quiet on the bus while it commits the page
//! to non-volatile storage. [`Eeprom24::wait_for_ready`] polls it with
//! zero-length writes until it acknowledges again.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn example(i2c: impl embedded_hal::i2c::I2c, delay: impl embedded_hal::delay::DelayNs) {
//! use eeprom24::{AddressPins, DeviceProfile, Eeprom24};
//!
//! let profile = DeviceProfile::m24c512(AddressPins::default());
//! let mut eeprom = Eeprom24::init(i2c, delay, profile).unwrap();
//!
//! // Spans a page boundary: written as two page transactions.
//! eeprom.write(120, b"hello, eeprom").unwrap();
//!
//! let mut buf = [0u8; 13];
//! eeprom.read_page(120, &mut buf).unwrap();
//! # }
//! ```
//!
//! Optional [`defmt`](https://crates.io/crates/defmt) logging is available via
//! the `defmt` feature.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod address;
mod comms;
mod error;
mod profile;
mod traits;

#[cfg(test)]
mod mock;

pub use address::{AddressPins, AddressPrefix, AddressingWidth, DEFAULT_ADDRESS};
pub use comms::Eeprom24;
pub use error::Error;
pub use profile::{Config, DeviceProfile, DEFAULT_POLL_INTERVAL_MS, DEFAULT_READY_TIMEOUT_MS};
pub use traits::EepromDevice;
