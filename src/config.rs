//! Device configuration: identity, capability set and axis ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::uinput::{
    EV_ABS, EV_KEY, EV_REL, UI_SET_ABSBIT, UI_SET_KEYBIT, UI_SET_RELBIT,
};

/// One of the event classes a virtual device can claim support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Key,
    Abs,
    Rel,
}

impl EventCategory {
    /// Event type constant announced via `UI_SET_EVBIT`.
    pub fn ev_type(self) -> u16 {
        match self {
            EventCategory::Key => EV_KEY,
            EventCategory::Abs => EV_ABS,
            EventCategory::Rel => EV_REL,
        }
    }

    /// Per-code "set bit" ioctl for this category.
    pub(crate) fn set_bit_request(self) -> u64 {
        match self {
            EventCategory::Key => UI_SET_KEYBIT,
            EventCategory::Abs => UI_SET_ABSBIT,
            EventCategory::Rel => UI_SET_RELBIT,
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Key => write!(f, "key"),
            EventCategory::Abs => write!(f, "abs"),
            EventCategory::Rel => write!(f, "rel"),
        }
    }
}

/// Range configuration for one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub code: u16,
    pub min: i32,
    pub max: i32,
}

impl AxisConfig {
    pub fn new(code: u16, min: i32, max: i32) -> Self {
        Self { code, min, max }
    }
}

/// Full configuration of a virtual device.
///
/// The capability set is supplied once at creation and never mutated
/// afterwards; the kernel does not support adding capabilities to a live
/// device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub version: u16,
    #[serde(default)]
    pub keys: Vec<u16>,
    #[serde(default)]
    pub abs_axes: Vec<AxisConfig>,
    #[serde(default)]
    pub rel_axes: Vec<u16>,
}

/// Builder for custom device configurations.
pub struct DeviceBuilder {
    config: DeviceConfig,
}

impl DeviceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: DeviceConfig {
                name: name.into(),
                vendor_id: 0x0000,
                product_id: 0x0000,
                version: 0x0100,
                keys: Vec::new(),
                abs_axes: Vec::new(),
                rel_axes: Vec::new(),
            },
        }
    }

    pub fn vendor_id(mut self, vendor_id: u16) -> Self {
        self.config.vendor_id = vendor_id;
        self
    }

    pub fn product_id(mut self, product_id: u16) -> Self {
        self.config.product_id = product_id;
        self
    }

    pub fn version(mut self, version: u16) -> Self {
        self.config.version = version;
        self
    }

    /// Add a key or button code.
    pub fn key(mut self, code: u16) -> Self {
        self.config.keys.push(code);
        self
    }

    /// Add multiple key or button codes.
    pub fn keys(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.config.keys.extend(codes);
        self
    }

    /// Add an absolute axis with its range.
    pub fn abs_axis(mut self, code: u16, min: i32, max: i32) -> Self {
        self.config.abs_axes.push(AxisConfig::new(code, min, max));
        self
    }

    /// Add a relative axis.
    pub fn rel_axis(mut self, code: u16) -> Self {
        self.config.rel_axes.push(code);
        self
    }

    pub fn build(self) -> DeviceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uinput::{ABS_X, BTN_SOUTH, REL_X};

    #[test]
    fn builder_collects_capabilities() {
        let config = DeviceBuilder::new("Custom Pad")
            .vendor_id(0x045e)
            .product_id(0x028e)
            .key(BTN_SOUTH)
            .abs_axis(ABS_X, -32768, 32767)
            .rel_axis(REL_X)
            .build();

        assert_eq!(config.name, "Custom Pad");
        assert_eq!(config.vendor_id, 0x045e);
        assert_eq!(config.keys, vec![BTN_SOUTH]);
        assert_eq!(config.abs_axes, vec![AxisConfig::new(ABS_X, -32768, 32767)]);
        assert_eq!(config.rel_axes, vec![REL_X]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = DeviceBuilder::new("Serialized Pad")
            .key(BTN_SOUTH)
            .abs_axis(ABS_X, -100, 100)
            .build();

        let json = serde_json::to_string(&config).unwrap();
        let back: DeviceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, config.name);
        assert_eq!(back.keys, config.keys);
        assert_eq!(back.abs_axes, config.abs_axes);
        assert!(back.rel_axes.is_empty());
    }

    #[test]
    fn missing_capability_lists_default_to_empty() {
        let back: DeviceConfig = serde_json::from_str(
            r#"{"name":"Bare","vendor_id":1,"product_id":2,"version":3}"#,
        )
        .unwrap();
        assert!(back.keys.is_empty() && back.abs_axes.is_empty() && back.rel_axes.is_empty());
    }
}
