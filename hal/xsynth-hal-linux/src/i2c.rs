//! I2C master over `i2c-dev`
//!
//! The kernel binds one slave address per open file. Selecting an address is
//! an `ioctl(I2C_SLAVE)`, after which plain `read`/`write` calls on the file
//! are bus transactions to that device.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use thiserror::Error;
use xsynth_hal::i2c::{is_valid_address, I2cBus};

/// Adapter the panel is wired to on the reference board
pub const DEFAULT_I2C_DEVICE: &str = "/dev/i2c-1";

/// `I2C_SLAVE` request from `linux/i2c-dev.h`
const I2C_SLAVE: libc::c_ulong = 0x0703;

/// I2C bus errors
#[derive(Debug, Error)]
pub enum I2cError {
    #[error("I2C device {path} unavailable: {source}")]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid 7-bit I2C address {0:#04x}")]
    InvalidAddress(u8),

    #[error("failed to select I2C address {address:#04x}: {source}")]
    AddressSelect {
        address: u8,
        #[source]
        source: io::Error,
    },

    #[error("I2C transfer to {address:#04x} failed: {source}")]
    Io {
        address: u8,
        #[source]
        source: io::Error,
    },
}

/// One opened `i2c-dev` adapter
///
/// The last selected address is cached so back-to-back transfers to the same
/// device skip the ioctl. Any failure clears the cache.
#[derive(Debug)]
pub struct LinuxI2cBus {
    file: File,
    path: PathBuf,
    selected: Option<u8>,
}

impl LinuxI2cBus {
    /// Open the adapter at `path` for reading and writing
    pub fn open(path: impl AsRef<Path>) -> Result<Self, I2cError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| I2cError::DeviceUnavailable {
                path: path.clone(),
                source,
            })?;

        debug!("opened I2C adapter {}", path.display());
        Ok(Self {
            file,
            path,
            selected: None,
        })
    }

    /// Device path this bus was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Currently bound slave address, if any
    pub fn selected(&self) -> Option<u8> {
        self.selected
    }
}

impl I2cBus for LinuxI2cBus {
    type Error = I2cError;

    fn select(&mut self, address: u8) -> Result<(), Self::Error> {
        if !is_valid_address(address) {
            return Err(I2cError::InvalidAddress(address));
        }
        if self.selected == Some(address) {
            return Ok(());
        }

        // SAFETY: the fd is owned by `self.file` and open for the whole call.
        // I2C_SLAVE takes the address by value and touches no user memory.
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                I2C_SLAVE as _,
                libc::c_ulong::from(address),
            )
        };
        if rc < 0 {
            self.selected = None;
            return Err(I2cError::AddressSelect {
                address,
                source: io::Error::last_os_error(),
            });
        }

        trace!("selected I2C address {:#04x}", address);
        self.selected = Some(address);
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error> {
        self.select(address)?;
        self.file.write(data).map_err(|source| {
            self.selected = None;
            I2cError::Io { address, source }
        })
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.select(address)?;
        self.file.read(buf).map_err(|source| {
            self.selected = None;
            I2cError::Io { address, source }
        })
    }
}
