use crate::address::{AddressPins, AddressingWidth};

/// Worst-case write cycle of the 24-series parts, in milliseconds.
pub const DEFAULT_READY_TIMEOUT_MS: u32 = 25;
/// Gap between two readiness probes, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1;

/// Geometry and bus address of one EEPROM chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceProfile {
    width: AddressingWidth,
    capacity: u32,
    page_size: u16,
    address: u8,
}

impl DeviceProfile {
    pub const fn new(width: AddressingWidth, capacity: u32, page_size: u16, address: u8) -> Self {
        Self {
            width,
            capacity,
            page_size,
            address,
        }
    }

    /// 24C01: 128 bytes, 8-byte pages.
    pub const fn m24c01(pins: AddressPins) -> Self {
        Self::new(AddressingWidth::EightBit, 128, 8, pins.address())
    }

    /// 24C02: 256 bytes, 8-byte pages.
    pub const fn m24c02(pins: AddressPins) -> Self {
        Self::new(AddressingWidth::EightBit, 256, 8, pins.address())
    }

    /// 24C32: 4 KiB, 32-byte pages.
    pub const fn m24c32(pins: AddressPins) -> Self {
        Self::new(AddressingWidth::SixteenBit, 4 * 1024, 32, pins.address())
    }

    /// 24C64: 8 KiB, 32-byte pages.
    pub const fn m24c64(pins: AddressPins) -> Self {
        Self::new(AddressingWidth::SixteenBit, 8 * 1024, 32, pins.address())
    }

    /// 24C128: 16 KiB, 64-byte pages.
    pub const fn m24c128(pins: AddressPins) -> Self {
        Self::new(AddressingWidth::SixteenBit, 16 * 1024, 64, pins.address())
    }

    /// 24C256: 32 KiB, 64-byte pages.
    pub const fn m24c256(pins: AddressPins) -> Self {
        Self::new(AddressingWidth::SixteenBit, 32 * 1024, 64, pins.address())
    }

    /// 24C512: 64 KiB, 128-byte pages.
    pub const fn m24c512(pins: AddressPins) -> Self {
        Self::new(AddressingWidth::SixteenBit, 64 * 1024, 128, pins.address())
    }

    pub const fn width(&self) -> AddressingWidth {
        self.width
    }

    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    pub const fn page_size(&self) -> u16 {
        self.page_size
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    /// A profile is usable when the page and capacity are non-zero, the
    /// capacity fits the addressing width and the address is 7 bits.
    pub const fn is_valid(&self) -> bool {
        self.page_size > 0
            && self.capacity > 0
            && self.capacity <= self.width.max_capacity()
            && self.address <= 0x7F
    }

    /// Bytes left in the page holding `offset`, counting `offset` itself.
    /// Zero for a profile without pages.
    pub(crate) const fn page_remaining(&self, offset: u32) -> u32 {
        match offset.checked_rem(self.page_size as u32) {
            Some(column) => self.page_size as u32 - column,
            None => 0,
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::m24c512(AddressPins::default())
    }
}

/// Driver timing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Default bound for [`crate::Eeprom24::wait_ready`] and for the
    /// per-page wait inside [`crate::Eeprom24::write`].
    pub ready_timeout_ms: u32,
    /// Delay between readiness probes. Zero is treated as one.
    pub poll_interval_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    pub const fn with_ready_timeout(mut self, ms: u32) -> Self {
        self.ready_timeout_ms = ms;
        self
    }

    pub const fn with_poll_interval(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }
}
