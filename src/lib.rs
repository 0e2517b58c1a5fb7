//! vinput - Virtual Input Device Emulation for Linux uinput
//!
//! This library creates kernel-level virtual input devices (keyboards,
//! mice, gamepads) through the uinput subsystem and injects input events
//! into them.

pub mod config;
pub mod device;
pub mod error;
mod ioctl;
pub mod templates;
pub mod uinput;
pub mod validators;

// Re-export commonly used types
pub use config::{AxisConfig, DeviceBuilder, DeviceConfig, EventCategory};
pub use device::VirtualDevice;
pub use error::DeviceError;
pub use templates::DeviceTemplates;
pub use uinput::{
    BTN_STATE_PRESSED, BTN_STATE_RELEASED, EV_ABS, EV_KEY, EV_REL, EV_SYN, SYN_REPORT,
};
pub use validators::{validate_device_name, validate_device_path};
