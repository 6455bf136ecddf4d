//! GPIO register window abstractions
//!
//! The panel drives its GPIO lines by writing the SoC's GPIO controller
//! registers directly. A platform maps the register block into the process
//! and hands out a [`RegisterWindow`] that stays valid until it is dropped.

/// A mapped view over a block of 32-bit registers
///
/// Indices are word offsets from the start of the window. Implementations
/// must perform volatile accesses. Out-of-range indices are a caller bug and
/// may panic.
pub trait RegisterWindow {
    /// Number of 32-bit registers in the window
    fn len(&self) -> usize;

    /// Check if the window maps no registers
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the register at word offset `index`
    fn read(&self, index: usize) -> u32;

    /// Write `value` to the register at word offset `index`
    fn write(&mut self, index: usize, value: u32);

    /// Read-modify-write the register at `index`
    fn modify(&mut self, index: usize, f: impl FnOnce(u32) -> u32) {
        let value = self.read(index);
        self.write(index, f(value));
    }
}

/// Source of GPIO register windows
///
/// Each call to [`GpioMemory::open`] produces a fresh window. The mapping is
/// released when the window is dropped, so a window never outlives the
/// operation that opened it.
pub trait GpioMemory {
    /// Mapped register window type
    type Window: RegisterWindow;

    /// Error type for open/map failures
    type Error: core::fmt::Debug;

    /// Open the GPIO device and map its register window
    fn open(&mut self) -> Result<Self::Window, Self::Error>;
}
