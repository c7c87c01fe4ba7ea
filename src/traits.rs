pub trait EepromDevice {
    type Error;

    /// Reads memory contents into `buf`, starting at `offset`.
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `data` starting at `offset`, splitting at page boundaries and
    /// waiting out each write cycle. Returns once everything is committed.
    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), Self::Error>;

    /// Whether the chip currently acknowledges its address.
    fn is_ready(&mut self) -> Result<bool, Self::Error>;

    /// Total size of the memory array in bytes.
    fn capacity(&self) -> u32;

    /// Size of the chip's internal write buffer in bytes.
    fn page_size(&self) -> u16;
}
