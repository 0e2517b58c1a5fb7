//! Control-call gateway: the single point of contact with the kernel's
//! device-control and write primitives.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::{AsRawFd, IntoRawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use tracing::trace;

use crate::error::DeviceError;

/// Argument to a control call.
///
/// `Buffer` hands ownership of the allocation to the gateway for the
/// duration of the call, so the memory the kernel reads or fills is
/// guaranteed live; the caller gets results back out of the same buffer
/// afterwards.
#[derive(Debug)]
pub enum IoctlArg {
    Immediate(u64),
    Buffer(Vec<u8>),
}

/// Seam between device lifecycle logic and the kernel.
///
/// Production code goes through [`RawUinputIo`]; tests substitute a
/// recording implementation to verify call ordering and inject faults.
pub(crate) trait UinputIo: Send {
    /// Issues one generic device-control request. A nonzero result maps to
    /// `KernelRejected` carrying the raw OS error code. No retries: a single
    /// failed call is fatal to the in-progress operation.
    fn ioctl(&mut self, request: u64, arg: &mut IoctlArg) -> Result<(), DeviceError>;

    /// Writes one complete buffer to the device file. Partial writes are a
    /// hard failure, not retried.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), DeviceError>;

    /// Closes the underlying OS handle, reporting close errors instead of
    /// swallowing them. Idempotent.
    fn close(&mut self) -> Result<(), io::Error>;
}

/// Gateway over a real uinput device file.
pub(crate) struct RawUinputIo {
    file: Option<File>,
}

impl RawUinputIo {
    /// Opens the control node write-only and non-blocking.
    pub(crate) fn open(path: &Path) -> Result<Self, DeviceError> {
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(DeviceError::OpenFailed)?;
        trace!("opened uinput control node {}", path.display());
        Ok(Self { file: Some(file) })
    }

    fn file(&self) -> Result<&File, DeviceError> {
        self.file.as_ref().ok_or(DeviceError::UseAfterClose)
    }
}

impl UinputIo for RawUinputIo {
    fn ioctl(&mut self, request: u64, arg: &mut IoctlArg) -> Result<(), DeviceError> {
        let fd = self.file()?.as_raw_fd();
        // request width follows the platform's ioctl signature
        let rc = match arg {
            IoctlArg::Immediate(value) => unsafe { libc::ioctl(fd, request as _, *value) },
            IoctlArg::Buffer(buf) => unsafe { libc::ioctl(fd, request as _, buf.as_mut_ptr()) },
        };
        if rc < 0 {
            let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
            return Err(DeviceError::KernelRejected { request, errno });
        }
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        let mut file = self.file()?;
        match file.write(bytes) {
            Ok(n) if n == bytes.len() => Ok(()),
            Ok(n) => Err(DeviceError::WriteFailed(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {n} of {} bytes", bytes.len()),
            ))),
            Err(err) => Err(DeviceError::WriteFailed(err)),
        }
    }

    fn close(&mut self) -> Result<(), io::Error> {
        if let Some(file) = self.file.take() {
            // take the fd out of File so the close result is observable
            let fd = file.into_raw_fd();
            if unsafe { libc::close(fd) } < 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }
}

impl Drop for RawUinputIo {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
