use std::io;

use thiserror::Error;

use crate::config::EventCategory;

/// Errors surfaced by device creation, event emission and teardown.
///
/// Every failure is reported on the first attempt; there are no internal
/// retries, and EINTR-style conditions are not special-cased. Secondary
/// cleanup failures on an already-failing path are logged, not substituted
/// for the primary error.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("invalid device path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid device name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("could not open device file")]
    OpenFailed(#[source] io::Error),

    #[error("failed to register {category} capability (code {code:?})")]
    RegistrationFailed {
        category: EventCategory,
        code: Option<u16>,
        #[source]
        source: Box<DeviceError>,
    },

    #[error("failed to write device descriptor")]
    DescriptorWriteFailed(#[source] Box<DeviceError>),

    #[error("failed to create device")]
    CreateFailed(#[source] Box<DeviceError>),

    #[error("kernel rejected control call {request:#x} (errno {errno})")]
    KernelRejected { request: u64, errno: i32 },

    #[error("failed to write to device file")]
    WriteFailed(#[source] io::Error),

    #[error("failed to destroy device")]
    DestroyFailed {
        /// The `UI_DEV_DESTROY` failure, absent when only the close failed.
        #[source]
        source: Option<Box<DeviceError>>,
        /// Handle close error observed during teardown, kept as secondary.
        close: Option<io::Error>,
    },

    #[error("device has already been destroyed")]
    UseAfterClose,

    #[error("event encoding produced {got} bytes, expected {want}")]
    EncodeFailed { got: usize, want: usize },
}
