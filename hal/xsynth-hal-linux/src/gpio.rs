//! GPIO register window over `/dev/gpiomem`
//!
//! `/dev/gpiomem` exposes only the GPIO controller's register page, so no
//! root privileges are needed. The file is mapped with `MAP_SHARED` and
//! accessed with volatile 32-bit loads and stores.

use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use log::{debug, warn};
use thiserror::Error;
use xsynth_hal::{GpioMemory, RegisterWindow};

/// GPIO register device on Raspberry Pi class boards
pub const DEFAULT_GPIO_DEVICE: &str = "/dev/gpiomem";

/// Bytes mapped per window (GPFSEL0 through GPLEV1 and reserved words)
pub const GPIO_WINDOW_SIZE: usize = 0xB4;

/// GPIO mapping errors
#[derive(Debug, Error)]
pub enum GpioError {
    #[error("cannot open GPIO device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot map GPIO registers from {path}: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Opens register windows from a GPIO memory device
#[derive(Debug, Clone)]
pub struct GpioMem {
    path: PathBuf,
    size: usize,
}

impl Default for GpioMem {
    fn default() -> Self {
        Self::new(DEFAULT_GPIO_DEVICE)
    }
}

impl GpioMem {
    /// Map [`GPIO_WINDOW_SIZE`] bytes from `path` on each open
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            size: GPIO_WINDOW_SIZE,
        }
    }

    /// Device path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GpioMemory for GpioMem {
    type Window = MappedWindow;
    type Error = GpioError;

    fn open(&mut self) -> Result<Self::Window, Self::Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(&self.path)
            .map_err(|source| GpioError::Open {
                path: self.path.clone(),
                source,
            })?;

        // SAFETY: fresh mapping at a kernel-chosen address; nothing else
        // aliases it. The fd only needs to live for the duration of mmap.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                self.size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(GpioError::Map {
                path: self.path.clone(),
                source: io::Error::last_os_error(),
            });
        }
        let base = NonNull::new(addr.cast::<u32>()).ok_or_else(|| GpioError::Map {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::Other, "mmap returned null"),
        })?;

        debug!("mapped {} bytes of {}", self.size, self.path.display());
        Ok(MappedWindow {
            base,
            size: self.size,
        })
    }
}

/// A live register mapping, unmapped on drop
#[derive(Debug)]
pub struct MappedWindow {
    base: NonNull<u32>,
    size: usize,
}

impl MappedWindow {
    fn register(&self, index: usize) -> *mut u32 {
        assert!(
            index < self.len(),
            "register {} outside {}-word window",
            index,
            self.len()
        );
        // SAFETY: index is bounds-checked against the mapped length
        unsafe {
            self.base.as_ptr().add(index)
        }
    }
}

impl RegisterWindow for MappedWindow {
    fn len(&self) -> usize {
        self.size / 4
    }

    fn read(&self, index: usize) -> u32 {
        let reg = self.register(index);
        // SAFETY: reg is an aligned word inside the live mapping
        unsafe {
            ptr::read_volatile(reg)
        }
    }

    fn write(&mut self, index: usize, value: u32) {
        let reg = self.register(index);
        // SAFETY: reg is an aligned word inside the live mapping
        unsafe {
            ptr::write_volatile(reg, value)
        }
    }
}

impl Drop for MappedWindow {
    fn drop(&mut self) {
        // SAFETY: base/size describe exactly the mapping created in open()
        let rc = unsafe { libc::munmap(self.base.as_ptr().cast(), self.size) };
        if rc != 0 {
            warn!("munmap of GPIO window failed: {}", io::Error::last_os_error());
        }
    }
}
