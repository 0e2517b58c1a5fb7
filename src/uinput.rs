//! Uinput kernel ABI: ioctl numbers, event constants and wire structures.
//!
//! Everything in here is a frozen contract with the kernel's uinput module.
//! The numbers are not configuration and must not be overridden at runtime;
//! a mismatch makes the kernel misinterpret requests instead of failing
//! cleanly.

#![allow(non_camel_case_types)]

use std::mem;

// Uinput ioctl commands
pub const UI_DEV_CREATE: u64 = 0x5501;
pub const UI_DEV_DESTROY: u64 = 0x5502;
pub const UI_SET_EVBIT: u64 = 0x40045564;
pub const UI_SET_KEYBIT: u64 = 0x40045565;
pub const UI_SET_RELBIT: u64 = 0x40045566;
pub const UI_SET_ABSBIT: u64 = 0x40045567;

/// Get sysfs name for a created uinput device.
///
/// The command encodes the caller's buffer length, so it is computed rather
/// than fixed: `_IOC(_IOC_READ, 'U', 0x2c, len)`.
pub fn ui_get_sysname(len: usize) -> u64 {
    0x8000_0000 | ((len as u64 & 0x1fff) << 16) | (b'U' as u64) << 8 | 0x2c
}

// Event types as specified in input-event-codes.h
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0;

pub const BUS_USB: u16 = 0x03;

// Relative axis codes
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;

// Absolute axis codes
pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_Z: u16 = 0x02;
pub const ABS_RX: u16 = 0x03;
pub const ABS_RY: u16 = 0x04;
pub const ABS_RZ: u16 = 0x05;
pub const ABS_HAT0X: u16 = 0x10;
pub const ABS_HAT0Y: u16 = 0x11;

// Button and key codes
pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const BTN_TOUCH: u16 = 0x14a;
pub const BTN_SOUTH: u16 = 0x130;
pub const BTN_EAST: u16 = 0x131;
pub const BTN_NORTH: u16 = 0x133;
pub const BTN_WEST: u16 = 0x134;
pub const BTN_TL: u16 = 0x136;
pub const BTN_TR: u16 = 0x137;
pub const BTN_SELECT: u16 = 0x13a;
pub const BTN_START: u16 = 0x13b;
pub const BTN_MODE: u16 = 0x13c;
pub const BTN_THUMBL: u16 = 0x13d;
pub const BTN_THUMBR: u16 = 0x13e;

// Keyboard code range (KEY_ESC through KEY_MICMUTE)
pub const KEY_ESC: u16 = 0x01;
pub const KEY_MICMUTE: u16 = 0xf8;

pub const BTN_STATE_RELEASED: i32 = 0;
pub const BTN_STATE_PRESSED: i32 = 1;

pub const UINPUT_MAX_NAME_SIZE: usize = 80;
pub const ABS_CNT: usize = 64;

/// Exact byte length of the encoded `uinput_user_dev` descriptor.
pub const UINPUT_USER_DEV_SIZE: usize = UINPUT_MAX_NAME_SIZE + 8 + 4 + 4 * ABS_CNT * 4;

/// Exact byte length of one encoded `input_event` record. The timestamp
/// fields are platform words, so this is 24 on 64-bit targets.
pub const INPUT_EVENT_SIZE: usize = mem::size_of::<libc::timeval>() + 8;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct input_id {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// Legacy uinput device descriptor, written to the device file before
/// `UI_DEV_CREATE`. Field order and widths are load-bearing.
#[repr(C)]
#[derive(Debug, Clone)]
pub struct uinput_user_dev {
    pub name: [u8; UINPUT_MAX_NAME_SIZE],
    pub id: input_id,
    pub ff_effects_max: u32,
    pub absmax: [i32; ABS_CNT],
    pub absmin: [i32; ABS_CNT],
    pub absfuzz: [i32; ABS_CNT],
    pub absflat: [i32; ABS_CNT],
}

impl uinput_user_dev {
    /// Little-endian encoding of the descriptor, exactly
    /// [`UINPUT_USER_DEV_SIZE`] bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(UINPUT_USER_DEV_SIZE);
        buf.extend_from_slice(&self.name);
        buf.extend_from_slice(&self.id.bustype.to_le_bytes());
        buf.extend_from_slice(&self.id.vendor.to_le_bytes());
        buf.extend_from_slice(&self.id.product.to_le_bytes());
        buf.extend_from_slice(&self.id.version.to_le_bytes());
        buf.extend_from_slice(&self.ff_effects_max.to_le_bytes());
        for arr in [&self.absmax, &self.absmin, &self.absfuzz, &self.absflat] {
            for v in arr {
                buf.extend_from_slice(&v.to_le_bytes());
            }
        }
        buf
    }
}

/// One input event record as the kernel input subsystem expects it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct input_event {
    pub time: libc::timeval,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

impl input_event {
    /// Event with a zeroed timestamp; the kernel stamps the authoritative
    /// time on ingestion.
    pub fn new(type_: u16, code: u16, value: i32) -> Self {
        Self {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_,
            code,
            value,
        }
    }

    /// Little-endian encoding of the record, exactly [`INPUT_EVENT_SIZE`]
    /// bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(INPUT_EVENT_SIZE);
        buf.extend_from_slice(&self.time.tv_sec.to_le_bytes());
        buf.extend_from_slice(&self.time.tv_usec.to_le_bytes());
        buf.extend_from_slice(&self.type_.to_le_bytes());
        buf.extend_from_slice(&self.code.to_le_bytes());
        buf.extend_from_slice(&self.value.to_le_bytes());
        buf
    }
}
