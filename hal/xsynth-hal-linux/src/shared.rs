//! Shared bus handle
//!
//! The display and the input MCU sit on one adapter. Each driver owns a
//! clone of [`SharedBus`]; every trait call holds the lock for its whole
//! duration, so an address select and the transfer that follows it can never
//! interleave with another driver's traffic.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use xsynth_hal::I2cBus;

/// Cloneable, mutually exclusive handle to one bus
pub struct SharedBus<B> {
    inner: Arc<Mutex<B>>,
}

impl<B> Clone for SharedBus<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B> SharedBus<B> {
    /// Wrap a bus for sharing
    pub fn new(bus: B) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bus)),
        }
    }

    /// Lock the bus for a multi-transfer sequence
    pub fn lock(&self) -> MutexGuard<'_, B> {
        self.inner.lock()
    }
}

impl<B: I2cBus> I2cBus for SharedBus<B> {
    type Error = B::Error;

    fn select(&mut self, address: u8) -> Result<(), Self::Error> {
        self.inner.lock().select(address)
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error> {
        self.inner.lock().write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.lock().read(address, buf)
    }
}
