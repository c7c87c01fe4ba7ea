/// Base 7-bit bus address of the 24-series family (`0b1010_000`).
pub const DEFAULT_ADDRESS: u8 = 0b101_0000;

/// How many bytes of memory address precede the data in every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingWidth {
    /// One address byte. Used by parts of up to 256 bytes.
    EightBit,
    /// Two address bytes, high byte first.
    SixteenBit,
}

impl AddressingWidth {
    /// Number of address bytes sent on the bus.
    pub const fn prefix_len(self) -> usize {
        match self {
            AddressingWidth::EightBit => 1,
            AddressingWidth::SixteenBit => 2,
        }
    }

    /// Largest memory this width can address without bank-select bits.
    pub const fn max_capacity(self) -> u32 {
        match self {
            AddressingWidth::EightBit => 1 << 8,
            AddressingWidth::SixteenBit => 1 << 16,
        }
    }

    /// Frames a linear offset as the address bytes the chip expects.
    ///
    /// Bits that do not fit the width are dropped; keeping `offset` inside the
    /// device is the caller's job.
    pub const fn encode(self, offset: u32) -> AddressPrefix {
        match self {
            AddressingWidth::EightBit => AddressPrefix {
                bytes: [offset as u8, 0],
                len: 1,
            },
            AddressingWidth::SixteenBit => AddressPrefix {
                bytes: [(offset >> 8) as u8, offset as u8],
                len: 2,
            },
        }
    }
}

/// The one or two address bytes sent ahead of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPrefix {
    bytes: [u8; 2],
    len: u8,
}

impl AddressPrefix {
    /// The address bytes, in bus order.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// Levels of the A0/A1/A2 address-select pins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressPins {
    pub a0: bool,
    pub a1: bool,
    pub a2: bool,
}

impl AddressPins {
    pub const fn new(a0: bool, a1: bool, a2: bool) -> Self {
        Self { a0, a1, a2 }
    }

    /// The 7-bit bus address selected by these pins.
    pub const fn address(self) -> u8 {
        DEFAULT_ADDRESS | (self.a0 as u8) | ((self.a1 as u8) << 1) | ((self.a2 as u8) << 2)
    }
}
