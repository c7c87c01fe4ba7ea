//! Refer to datasheet:
//! https://ww1.microchip.com/downloads/en/DeviceDoc/24AA512-24LC512-24FC512-Data-Sheet-20001747J.pdf
use crate::address::AddressPrefix;
use crate::error::Error;
use crate::profile::{Config, DeviceProfile};
use crate::traits::EepromDevice;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c, Operation};

/// Presence checks made by [`Eeprom24::init`]. A chip reset mid-write may
/// refuse the first one.
const INIT_PROBE_ATTEMPTS: usize = 2;

/// Driver for one 24-series EEPROM.
///
/// `I2C` may be an owned bus or a `&mut` borrow of a shared one. The driver
/// does no locking; callers sharing a bus between several chips serialize
/// access themselves.
pub struct Eeprom24<I2C, D> {
    i2c: I2C,
    delay: D,
    profile: DeviceProfile,
    config: Config,
}

impl<I2C, D> Debug for Eeprom24<I2C, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Eeprom24")
            .field("profile", &self.profile)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<I2C, D> Eeprom24<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a driver without touching the bus.
    pub fn new(i2c: I2C, delay: D, profile: DeviceProfile) -> Result<Self, Error<I2C>> {
        Self::with_config(i2c, delay, profile, Config::default())
    }

    pub fn with_config(
        i2c: I2C,
        delay: D,
        profile: DeviceProfile,
        config: Config,
    ) -> Result<Self, Error<I2C>> {
        if !profile.is_valid() {
            warn!("Rejecting device profile: {:?}", profile);
            return Err(Error::InvalidProfile);
        }
        Ok(Self {
            i2c,
            delay,
            profile,
            config,
        })
    }

    /// Creates a driver and checks that the chip answers on the bus.
    pub fn init(i2c: I2C, delay: D, profile: DeviceProfile) -> Result<Self, Error<I2C>> {
        let mut this = Self::new(i2c, delay, profile)?;
        if !this.probe()? {
            warn!("No EEPROM at {=u8:#x}", profile.address());
            return Err(Error::NotPresent);
        }
        debug!("EEPROM found: {:?}", profile);
        Ok(this)
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn capacity(&self) -> u32 {
        self.profile.capacity()
    }

    pub fn page_size(&self) -> u16 {
        self.profile.page_size()
    }

    /// Presence check, allowing one refusal.
    pub fn probe(&mut self) -> Result<bool, Error<I2C>> {
        for _ in 0..INIT_PROBE_ATTEMPTS {
            if self.is_ready()? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Sends an empty write to the device address.
    ///
    /// While the chip is committing a write it does not acknowledge its
    /// address, which reads as `Ok(false)`. Other bus errors are returned as
    /// they are. The HAL must support zero-length writes.
    pub fn is_ready(&mut self) -> Result<bool, Error<I2C>> {
        match self.i2c.write(self.profile.address(), &[]) {
            Ok(()) => Ok(true),
            Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => Ok(false),
            Err(e) => Err(Error::I2c(e)),
        }
    }

    /// Polls [`Self::is_ready`] until it answers or `timeout_ms` has passed.
    ///
    /// Probes go out every poll interval starting at 0 ms, and no probe is
    /// scheduled past `timeout_ms`, so a chip that frees up after `k` intervals
    /// is seen iff `k * interval <= timeout_ms`. Time is counted from the
    /// delays issued, not from a clock.
    pub fn wait_for_ready(&mut self, timeout_ms: u32) -> Result<bool, Error<I2C>> {
        let interval = self.config.poll_interval_ms.max(1);
        let mut elapsed: u32 = 0;
        loop {
            if self.is_ready()? {
                trace!("Ready after {=u32} ms", elapsed);
                return Ok(true);
            }
            match elapsed.checked_add(interval) {
                Some(next) if next <= timeout_ms => {
                    self.delay.delay_ms(interval);
                    elapsed = next;
                }
                _ => {
                    warn!("EEPROM still busy after {=u32} ms", elapsed);
                    return Ok(false);
                }
            }
        }
    }

    /// [`Self::wait_for_ready`] with the configured timeout.
    pub fn wait_ready(&mut self) -> Result<bool, Error<I2C>> {
        self.wait_for_ready(self.config.ready_timeout_ms)
    }

    /// Writes a single byte. Poll with [`Self::wait_ready`] before the next
    /// command.
    pub fn write_byte(&mut self, offset: u32, value: u8) -> Result<(), Error<I2C>> {
        self.write_page(offset, &[value])
    }

    /// Random read of one byte.
    pub fn read_byte(&mut self, offset: u32) -> Result<u8, Error<I2C>> {
        let mut buf = [0u8; 1];
        self.read_page(offset, &mut buf)?;
        Ok(buf[0])
    }

    /// Writes `data` in one bus transaction starting at `offset`.
    ///
    /// The chip buffers one page at a time. If `data` runs past the end of the
    /// page holding `offset`, the chip wraps back to the start of that same
    /// page and overwrites it; nothing spills into the next page. The driver
    /// still sends every byte it was given. Use [`Self::write`] to span pages.
    ///
    /// Returns once the transfer is on the bus; the chip then needs up to
    /// [`crate::DEFAULT_READY_TIMEOUT_MS`] to commit it.
    pub fn write_page(&mut self, offset: u32, data: &[u8]) -> Result<(), Error<I2C>> {
        self.check_range(offset, 1)?;
        if data.is_empty() {
            return Ok(());
        }
        if data.len() > self.profile.page_remaining(offset) as usize {
            debug!(
                "Write of {=usize} bytes at {=u32:#x} rolls over inside its page",
                data.len(),
                offset
            );
        }

        let prefix = self.prefix(offset);
        self.i2c
            .transaction(
                self.profile.address(),
                &mut [Operation::Write(prefix.as_slice()), Operation::Write(data)],
            )
            .map_err(Error::I2c)
    }

    /// Sequential read of `buf.len()` bytes starting at `offset`.
    ///
    /// Reads are not limited by pages; the chip's cursor runs across the whole
    /// array. Ranges past the end of the device are refused.
    pub fn read_page(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), Error<I2C>> {
        self.check_range(offset, buf.len())?;
        if buf.is_empty() {
            return Ok(());
        }

        let prefix = self.prefix(offset);
        self.i2c
            .write_read(self.profile.address(), prefix.as_slice(), buf)
            .map_err(Error::I2c)
    }

    /// Writes `data` of any length starting at `offset`.
    ///
    /// The data is cut at page boundaries. Each piece is one
    /// [`Self::write_page`] followed by a wait for the write cycle, so the
    /// whole range is committed when this returns.
    pub fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), Error<I2C>> {
        self.check_range(offset, data.len())?;

        let mut offset = offset;
        let mut remaining = data;
        while !remaining.is_empty() {
            let len = remaining
                .len()
                .min(self.profile.page_remaining(offset) as usize);
            let (chunk, rest) = remaining.split_at(len);

            trace!("Writing {=usize} bytes at {=u32:#x}", len, offset);
            self.write_page(offset, chunk)?;
            if !self.wait_ready()? {
                return Err(Error::Timeout);
            }

            offset += len as u32;
            remaining = rest;
        }
        Ok(())
    }

    fn prefix(&self, offset: u32) -> AddressPrefix {
        self.profile.width().encode(offset)
    }

    fn check_range(&self, offset: u32, len: usize) -> Result<(), Error<I2C>> {
        let end = offset as u64 + len as u64;
        if offset >= self.profile.capacity() || end > self.profile.capacity() as u64 {
            return Err(Error::OutOfRange { offset, len });
        }
        Ok(())
    }
}

impl<I2C, D> EepromDevice for Eeprom24<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = Error<I2C>;

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), Error<I2C>> {
        self.read_page(offset, buf)
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), Error<I2C>> {
        Eeprom24::write(self, offset, data)
    }

    fn is_ready(&mut self) -> Result<bool, Error<I2C>> {
        Eeprom24::is_ready(self)
    }

    fn capacity(&self) -> u32 {
        self.profile.capacity()
    }

    fn page_size(&self) -> u16 {
        self.profile.page_size()
    }
}
