//! Device lifecycle and event emission.
//!
//! [`VirtualDevice::create`] walks the mandatory uinput sequence: register
//! capabilities, write the device descriptor, issue `UI_DEV_CREATE`, then
//! wait for the kernel to publish the new device node. The returned handle
//! owns the control file exclusively and is the only writer to it.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::{DeviceConfig, EventCategory};
use crate::error::DeviceError;
use crate::ioctl::{IoctlArg, RawUinputIo, UinputIo};
use crate::uinput::{
    ABS_CNT, BUS_USB, EV_ABS, EV_KEY, EV_REL, EV_SYN, INPUT_EVENT_SIZE, SYN_REPORT, UI_DEV_CREATE,
    UI_DEV_DESTROY, UI_SET_EVBIT, UINPUT_MAX_NAME_SIZE, UINPUT_USER_DEV_SIZE, input_event,
    input_id, ui_get_sysname, uinput_user_dev,
};
use crate::validators::{validate_device_name, validate_device_path};

/// Non-adaptive wait after `UI_DEV_CREATE` for the kernel to finish
/// publishing the device node. Deliberately a fixed sleep, not a sysfs poll.
const SETTLE_DELAY: Duration = Duration::from_millis(200);

// 64 sysname bytes plus the trailing null
const SYSNAME_LEN: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceState {
    Created,
    Destroyed,
}

/// A live virtual input device.
///
/// Exclusively owns the open uinput handle from creation until
/// [`destroy`](VirtualDevice::destroy) or drop; no other component may hold
/// or duplicate it. Not internally synchronized: one logical writer at a
/// time, callers serialize externally if producers share a device.
pub struct VirtualDevice {
    io: Box<dyn UinputIo>,
    name: String,
    state: DeviceState,
}

impl std::fmt::Debug for VirtualDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualDevice")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl VirtualDevice {
    /// Creates a virtual device at the given uinput control node.
    ///
    /// Registration, descriptor write and the create call run in that fixed
    /// order; any failure tears the partially-configured handle down before
    /// returning, so callers never see an indeterminate device. Blocks for
    /// 200 ms after creation so other processes can open the new node.
    pub fn create(path: impl AsRef<Path>, config: DeviceConfig) -> Result<Self, DeviceError> {
        let path = path.as_ref();
        validate_device_path(path)?;
        validate_device_name(&config.name)?;
        let io = RawUinputIo::open(path)?;
        Self::create_with(Box::new(io), config)
    }

    pub(crate) fn create_with(
        mut io: Box<dyn UinputIo>,
        config: DeviceConfig,
    ) -> Result<Self, DeviceError> {
        register_capabilities(io.as_mut(), &config)?;

        let descriptor = build_descriptor(&config);
        let buf = descriptor.to_bytes();
        if buf.len() != UINPUT_USER_DEV_SIZE {
            abort_setup(io.as_mut());
            return Err(DeviceError::EncodeFailed {
                got: buf.len(),
                want: UINPUT_USER_DEV_SIZE,
            });
        }
        if let Err(err) = io.write_all(&buf) {
            abort_setup(io.as_mut());
            return Err(DeviceError::DescriptorWriteFailed(Box::new(err)));
        }

        if let Err(err) = io.ioctl(UI_DEV_CREATE, &mut IoctlArg::Immediate(0)) {
            if let Err(close_err) = io.close() {
                warn!("closing handle after failed create also failed: {close_err}");
            }
            return Err(DeviceError::CreateFailed(Box::new(err)));
        }

        // Give the kernel time to publish the device node before anyone
        // tries to consume it.
        thread::sleep(SETTLE_DELAY);

        debug!("created virtual input device {:?}", config.name);
        Ok(Self {
            io,
            name: config.name,
            state: DeviceState::Created,
        })
    }

    /// Device name this handle was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits one event record with a zeroed timestamp.
    pub fn send_event(&mut self, type_: u16, code: u16, value: i32) -> Result<(), DeviceError> {
        self.ensure_live()?;
        let buf = input_event::new(type_, code, value).to_bytes();
        if buf.len() != INPUT_EVENT_SIZE {
            return Err(DeviceError::EncodeFailed {
                got: buf.len(),
                want: INPUT_EVENT_SIZE,
            });
        }
        trace!("event type={type_:#x} code={code:#x} value={value}");
        self.io.write_all(&buf)
    }

    /// Emits a key/button event.
    pub fn send_key(&mut self, code: u16, value: i32) -> Result<(), DeviceError> {
        self.send_event(EV_KEY, code, value)
    }

    /// Emits an absolute axis event.
    pub fn send_abs(&mut self, code: u16, value: i32) -> Result<(), DeviceError> {
        self.send_event(EV_ABS, code, value)
    }

    /// Emits a relative axis event.
    pub fn send_rel(&mut self, code: u16, value: i32) -> Result<(), DeviceError> {
        self.send_event(EV_REL, code, value)
    }

    /// Emits a `SYN_REPORT` marker, closing the current batch of events so
    /// the kernel delivers it atomically to consumers. Must follow every
    /// logically related group of key/abs/rel events.
    pub fn sync(&mut self) -> Result<(), DeviceError> {
        self.send_event(EV_SYN, SYN_REPORT, 0)
    }

    /// Queries the sysfs path of the created device, e.g.
    /// `/sys/devices/virtual/input/input17`.
    pub fn sys_path(&mut self) -> Result<PathBuf, DeviceError> {
        self.ensure_live()?;
        let mut arg = IoctlArg::Buffer(vec![0u8; SYSNAME_LEN]);
        self.io.ioctl(ui_get_sysname(SYSNAME_LEN), &mut arg)?;
        let IoctlArg::Buffer(buf) = arg else {
            return Err(DeviceError::EncodeFailed {
                got: 0,
                want: SYSNAME_LEN,
            });
        };
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        let name = String::from_utf8_lossy(&buf[..end]).into_owned();
        Ok(PathBuf::from("/sys/devices/virtual/input").join(name))
    }

    /// Destroys the kernel device and closes the handle.
    ///
    /// The handle is closed regardless of the destroy call's outcome; a
    /// close error after a failed destroy is attached to the primary error,
    /// not swallowed. The handle is unusable afterwards.
    pub fn destroy(&mut self) -> Result<(), DeviceError> {
        self.ensure_live()?;
        self.state = DeviceState::Destroyed;

        let destroy_result = self.io.ioctl(UI_DEV_DESTROY, &mut IoctlArg::Immediate(0));
        let close_result = self.io.close();
        if let Err(close_err) = &close_result {
            warn!("closing handle during destroy failed: {close_err}");
        }

        match (destroy_result, close_result) {
            (Ok(()), Ok(())) => {
                debug!("destroyed virtual input device {:?}", self.name);
                Ok(())
            }
            (destroy, close) => Err(DeviceError::DestroyFailed {
                source: destroy.err().map(Box::new),
                close: close.err(),
            }),
        }
    }

    fn ensure_live(&self) -> Result<(), DeviceError> {
        match self.state {
            DeviceState::Created => Ok(()),
            DeviceState::Destroyed => Err(DeviceError::UseAfterClose),
        }
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        if self.state == DeviceState::Created {
            if let Err(err) = self.destroy() {
                warn!("failed to release virtual device {:?} on drop: {err}", self.name);
            }
        }
    }
}

/// Enables each present capability category in fixed order (key, abs, rel)
/// and binds every code within it. The first failure aborts without
/// attempting subsequent categories, after a best-effort teardown of the
/// half-configured handle.
fn register_capabilities(io: &mut dyn UinputIo, config: &DeviceConfig) -> Result<(), DeviceError> {
    let abs_codes: Vec<u16> = config.abs_axes.iter().map(|axis| axis.code).collect();
    let groups: [(EventCategory, &[u16]); 3] = [
        (EventCategory::Key, &config.keys),
        (EventCategory::Abs, &abs_codes),
        (EventCategory::Rel, &config.rel_axes),
    ];

    for (category, codes) in groups {
        if codes.is_empty() {
            continue;
        }

        if let Err(err) = io.ioctl(
            UI_SET_EVBIT,
            &mut IoctlArg::Immediate(category.ev_type() as u64),
        ) {
            abort_setup(io);
            return Err(DeviceError::RegistrationFailed {
                category,
                code: None,
                source: Box::new(err),
            });
        }

        for &code in codes {
            if let Err(err) = io.ioctl(
                category.set_bit_request(),
                &mut IoctlArg::Immediate(code as u64),
            ) {
                abort_setup(io);
                return Err(DeviceError::RegistrationFailed {
                    category,
                    code: Some(code),
                    source: Box::new(err),
                });
            }
        }
        trace!("registered {} {category} codes", codes.len());
    }

    Ok(())
}

/// Best-effort destroy + close of a half-configured handle. Secondary
/// failures are reported but never replace the primary error.
fn abort_setup(io: &mut dyn UinputIo) {
    if let Err(err) = io.ioctl(UI_DEV_DESTROY, &mut IoctlArg::Immediate(0)) {
        warn!("cleanup destroy after failed setup also failed: {err}");
    }
    if let Err(err) = io.close() {
        warn!("cleanup close after failed setup also failed: {err}");
    }
}

/// Builds the legacy descriptor from the config: name truncated-or-padded
/// to the fixed buffer, USB bus type, axis ranges copied by code index,
/// fuzz/flat left zeroed.
fn build_descriptor(config: &DeviceConfig) -> uinput_user_dev {
    let mut name = [0u8; UINPUT_MAX_NAME_SIZE];
    let bytes = config.name.as_bytes();
    let len = bytes.len().min(UINPUT_MAX_NAME_SIZE);
    name[..len].copy_from_slice(&bytes[..len]);

    let mut dev = uinput_user_dev {
        name,
        id: input_id {
            bustype: BUS_USB,
            vendor: config.vendor_id,
            product: config.product_id,
            version: config.version,
        },
        ff_effects_max: 0,
        absmax: [0; ABS_CNT],
        absmin: [0; ABS_CNT],
        absfuzz: [0; ABS_CNT],
        absflat: [0; ABS_CNT],
    };
    for axis in &config.abs_axes {
        let idx = axis.code as usize;
        // codes >= ABS_CNT are rejected by the kernel during registration
        if idx < ABS_CNT {
            dev.absmax[idx] = axis.max;
            dev.absmin[idx] = axis.min;
        }
    }
    dev
}
