//! I2C bus abstractions
//!
//! Every operation names its target address. Implementations select the
//! address and run the transfer as one step, so two drivers sharing a bus
//! can never interleave a select from one with a transfer from the other.

/// I2C bus master
///
/// Transfers report the number of bytes actually moved. A short count is
/// not an error at this layer; drivers decide whether it violates their
/// protocol.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: core::fmt::Debug;

    /// Select `address` without transferring data
    ///
    /// Lets a driver fail fast before it starts building a transfer.
    fn select(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    ///
    /// Returns the number of bytes written.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    ///
    /// Returns the number of bytes read.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn select(&mut self, address: u8) -> Result<(), Self::Error> {
        T::select(self, address)
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read(self, address, buf)
    }
}

/// Largest valid 7-bit address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Check that an address fits in 7 bits
pub const fn is_valid_address(address: u8) -> bool {
    address <= MAX_ADDRESS
}
