//! Pre-configured device templates for the common device classes.

use crate::config::{AxisConfig, DeviceConfig};
use crate::uinput::*;

pub struct DeviceTemplates;

impl DeviceTemplates {
    /// Generic USB gamepad: face/shoulder/menu/stick buttons, dual analog
    /// sticks and a hat d-pad.
    pub fn gamepad() -> DeviceConfig {
        DeviceConfig {
            name: "Generic USB Gamepad".to_string(),
            vendor_id: 0x0079,
            product_id: 0x0006,
            version: 0x0110,
            keys: vec![
                BTN_SOUTH, BTN_EAST, BTN_NORTH, BTN_WEST, BTN_TL, BTN_TR, BTN_SELECT, BTN_START,
                BTN_MODE, BTN_THUMBL, BTN_THUMBR,
            ],
            abs_axes: vec![
                AxisConfig::new(ABS_X, -32768, 32767),
                AxisConfig::new(ABS_Y, -32768, 32767),
                AxisConfig::new(ABS_RX, -32768, 32767),
                AxisConfig::new(ABS_RY, -32768, 32767),
                AxisConfig::new(ABS_Z, 0, 255),
                AxisConfig::new(ABS_RZ, 0, 255),
                AxisConfig::new(ABS_HAT0X, -1, 1),
                AxisConfig::new(ABS_HAT0Y, -1, 1),
            ],
            rel_axes: Vec::new(),
        }
    }

    /// Three-button wheel mouse with relative motion.
    pub fn mouse() -> DeviceConfig {
        DeviceConfig {
            name: "Virtual Wheel Mouse".to_string(),
            vendor_id: 0x0001,
            product_id: 0x0001,
            version: 0x0100,
            keys: vec![BTN_LEFT, BTN_RIGHT, BTN_MIDDLE],
            abs_axes: Vec::new(),
            rel_axes: vec![REL_X, REL_Y, REL_WHEEL, REL_HWHEEL],
        }
    }

    /// Basic keyboard claiming the full KEY_ESC..KEY_MICMUTE code range.
    pub fn keyboard() -> DeviceConfig {
        DeviceConfig {
            name: "Virtual Keyboard".to_string(),
            vendor_id: 0x0001,
            product_id: 0x0002,
            version: 0x0100,
            keys: (KEY_ESC..=KEY_MICMUTE).collect(),
            abs_axes: Vec::new(),
            rel_axes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::validate_device_name;

    #[test]
    fn template_names_pass_validation() {
        for config in [
            DeviceTemplates::gamepad(),
            DeviceTemplates::mouse(),
            DeviceTemplates::keyboard(),
        ] {
            validate_device_name(&config.name).unwrap();
        }
    }

    #[test]
    fn mouse_is_purely_relative() {
        let config = DeviceTemplates::mouse();
        assert!(config.abs_axes.is_empty());
        assert_eq!(config.rel_axes, vec![REL_X, REL_Y, REL_WHEEL, REL_HWHEEL]);
    }

    #[test]
    fn keyboard_covers_the_key_range() {
        let config = DeviceTemplates::keyboard();
        assert_eq!(config.keys.first(), Some(&KEY_ESC));
        assert_eq!(config.keys.last(), Some(&KEY_MICMUTE));
        assert_eq!(config.keys.len(), (KEY_MICMUTE - KEY_ESC + 1) as usize);
    }
}
