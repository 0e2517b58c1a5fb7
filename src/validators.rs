//! Pre-flight checks run before any kernel interaction is attempted.

use std::path::Path;

use crate::error::DeviceError;
use crate::uinput::UINPUT_MAX_NAME_SIZE;

/// Checks that `path` is non-empty and exists on the filesystem.
///
/// This is a pure existence probe (one stat); permissions and file type are
/// not checked here and surface later as `OpenFailed`.
pub fn validate_device_path(path: &Path) -> Result<(), DeviceError> {
    if path.as_os_str().is_empty() {
        return Err(DeviceError::InvalidPath {
            path: String::new(),
            reason: "device path must not be empty".to_string(),
        });
    }
    if !path.exists() {
        return Err(DeviceError::InvalidPath {
            path: path.display().to_string(),
            reason: "device path does not exist".to_string(),
        });
    }
    Ok(())
}

/// Checks that `name` is non-empty and fits the fixed 80-byte name buffer
/// of the device descriptor.
pub fn validate_device_name(name: &str) -> Result<(), DeviceError> {
    if name.is_empty() {
        return Err(DeviceError::InvalidName {
            name: String::new(),
            reason: "device name may not be empty".to_string(),
        });
    }
    if name.len() > UINPUT_MAX_NAME_SIZE {
        return Err(DeviceError::InvalidName {
            name: name.to_string(),
            reason: format!(
                "device name is too long (maximum of {UINPUT_MAX_NAME_SIZE} bytes allowed)"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_bounds() {
        assert!(matches!(
            validate_device_name(""),
            Err(DeviceError::InvalidName { .. })
        ));
        assert!(validate_device_name("x").is_ok());
        assert!(validate_device_name(&"n".repeat(UINPUT_MAX_NAME_SIZE)).is_ok());
        assert!(matches!(
            validate_device_name(&"n".repeat(UINPUT_MAX_NAME_SIZE + 1)),
            Err(DeviceError::InvalidName { .. })
        ));
    }

    #[test]
    fn name_limit_counts_bytes_not_chars() {
        // 40 two-byte characters fit; 41 do not
        assert!(validate_device_name(&"ä".repeat(40)).is_ok());
        assert!(validate_device_name(&"ä".repeat(41)).is_err());
    }

    #[test]
    fn path_must_exist() {
        assert!(matches!(
            validate_device_path(Path::new("")),
            Err(DeviceError::InvalidPath { .. })
        ));
        assert!(matches!(
            validate_device_path(Path::new("/definitely/not/a/real/node")),
            Err(DeviceError::InvalidPath { .. })
        ));
        assert!(validate_device_path(&std::env::temp_dir()).is_ok());
    }
}
