//! Simulated 24-series chip and delay used by the unit tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::address::AddressingWidth;
use crate::profile::DeviceProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub ErrorKind);

impl i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// One bus phase as seen by the chip. Adjacent writes are merged, like on the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Write(Vec<u8>),
    Read(usize),
}

#[derive(Debug)]
pub struct MockEeprom {
    pub address: u8,
    pub width: AddressingWidth,
    pub page_size: usize,
    pub memory: Vec<u8>,
    /// How many transactions are refused after each committed write.
    pub busy_after_write: usize,
    /// Transactions still to be refused.
    pub busy_remaining: usize,
    /// Fails the next transaction with this kind.
    pub fail_next: Option<ErrorKind>,
    /// Non-empty phases, in order.
    pub log: Vec<Transfer>,
    /// Zero-length writes, acknowledged or not.
    pub probes: usize,
    cursor: usize,
}

impl MockEeprom {
    pub fn new(profile: &DeviceProfile) -> Self {
        Self {
            address: profile.address(),
            width: profile.width(),
            page_size: profile.page_size() as usize,
            memory: vec![0xFF; profile.capacity() as usize],
            busy_after_write: 0,
            busy_remaining: 0,
            fail_next: None,
            log: Vec::new(),
            probes: 0,
            cursor: 0,
        }
    }

    pub fn busy_after_write(mut self, transactions: usize) -> Self {
        self.busy_after_write = transactions;
        self
    }

    fn nack() -> MockError {
        MockError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
    }

    /// Handles one merged write phase. Returns true if data was programmed.
    fn write_frame(&mut self, frame: &[u8]) -> bool {
        let prefix_len = self.width.prefix_len().min(frame.len());
        let (prefix, data) = frame.split_at(prefix_len);
        self.cursor = prefix.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
        self.log.push(Transfer::Write(frame.to_vec()));

        // The write cursor wraps inside the current page.
        let page_start = self.cursor - self.cursor % self.page_size;
        for (i, byte) in data.iter().enumerate() {
            let column = (self.cursor % self.page_size + i) % self.page_size;
            let target = page_start + column;
            if target < self.memory.len() {
                self.memory[target] = *byte;
            }
        }
        !data.is_empty()
    }

    fn read_into(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.memory[self.cursor % self.memory.len()];
            self.cursor = (self.cursor + 1) % self.memory.len();
        }
        self.log.push(Transfer::Read(buf.len()));
    }
}

impl ErrorType for MockEeprom {
    type Error = MockError;
}

impl I2c for MockEeprom {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let is_probe = operations
            .iter()
            .all(|op| matches!(op, Operation::Write(bytes) if bytes.is_empty()));
        if is_probe {
            self.probes += 1;
        }
        if address != self.address {
            return Err(Self::nack());
        }
        if let Some(kind) = self.fail_next.take() {
            return Err(MockError(kind));
        }
        if self.busy_remaining > 0 {
            self.busy_remaining -= 1;
            return Err(Self::nack());
        }
        if is_probe {
            return Ok(());
        }

        let mut frame: Vec<u8> = Vec::new();
        let mut programmed = false;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => frame.extend_from_slice(bytes),
                Operation::Read(buf) => {
                    if !frame.is_empty() {
                        programmed |= self.write_frame(&frame);
                        frame.clear();
                    }
                    self.read_into(buf);
                }
            }
        }
        if !frame.is_empty() {
            programmed |= self.write_frame(&frame);
        }
        if programmed {
            self.busy_remaining = self.busy_after_write;
        }
        Ok(())
    }
}

/// Records the total time it was asked to wait instead of waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub elapsed_ns: u64,
}

impl MockDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}
