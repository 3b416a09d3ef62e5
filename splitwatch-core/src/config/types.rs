//! Configuration type definitions

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum device name prefix length
pub const MAX_NAME_LEN: usize = 32;

/// Length of a textual 128-bit UUID
pub const UUID_LEN: usize = 36;

/// Display refresh interval bounds (ms)
pub const MIN_FRAME_INTERVAL_MS: u32 = 1;
pub const MAX_FRAME_INTERVAL_MS: u32 = 1000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input is not valid configuration syntax
    Parse,
    /// A field is out of range; names the field
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse => f.write_str("configuration could not be parsed"),
            ConfigError::Invalid(field) => write!(f, "invalid value for `{}`", field),
        }
    }
}

/// Which device to talk to
///
/// Consumed by the transport; the core never looks at these.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// Only offer devices whose advertised name starts with this
    pub name_prefix: Option<String<MAX_NAME_LEN>>,
    /// GATT service to filter on
    pub service_uuid: String<UUID_LEN>,
    /// Characteristic for notifications and command writes
    pub characteristic_uuid: String<UUID_LEN>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let mut service_uuid = String::new();
        let _ = service_uuid.push_str(splitwatch_protocol::SERVICE_UUID);
        let mut characteristic_uuid = String::new();
        let _ = characteristic_uuid.push_str(splitwatch_protocol::CHARACTERISTIC_UUID);
        Self {
            name_prefix: None,
            service_uuid,
            characteristic_uuid,
        }
    }
}

/// Display refresh settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RefreshConfig {
    /// Interval between display ticks (ms)
    pub frame_interval_ms: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        // ~60 Hz
        Self {
            frame_interval_ms: 16,
        }
    }
}

/// Display layout settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Number of most recent laps to show
    pub visible_laps: u8,
    /// Show the link status line
    pub show_status: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            visible_laps: 3,
            show_status: true,
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientConfig {
    pub device: DeviceConfig,
    pub refresh: RefreshConfig,
    pub display: DisplayConfig,
}

impl ClientConfig {
    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FRAME_INTERVAL_MS..=MAX_FRAME_INTERVAL_MS)
            .contains(&self.refresh.frame_interval_ms)
        {
            return Err(ConfigError::Invalid("refresh.frame_interval_ms"));
        }
        if self.display.visible_laps == 0 {
            return Err(ConfigError::Invalid("display.visible_laps"));
        }
        if !is_uuid(&self.device.service_uuid) {
            return Err(ConfigError::Invalid("device.service_uuid"));
        }
        if !is_uuid(&self.device.characteristic_uuid) {
            return Err(ConfigError::Invalid("device.characteristic_uuid"));
        }
        Ok(())
    }
}

/// Check the 8-4-4-4-12 hex layout
fn is_uuid(s: &str) -> bool {
    s.len() == UUID_LEN
        && s.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            config.device.service_uuid.as_str(),
            splitwatch_protocol::SERVICE_UUID
        );
        assert_eq!(config.refresh.frame_interval_ms, 16);
    }

    #[test]
    fn test_frame_interval_bounds() {
        let mut config = ClientConfig::default();
        config.refresh.frame_interval_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Invalid("refresh.frame_interval_ms"))
        );
        config.refresh.frame_interval_ms = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_visible_laps_nonzero() {
        let mut config = ClientConfig::default();
        config.display.visible_laps = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Invalid("display.visible_laps"))
        );
    }

    #[test]
    fn test_uuid_shape() {
        assert!(is_uuid("9d18d524-2a6e-44ce-8724-445575b23e9a"));
        assert!(!is_uuid("9d18d524-2a6e-44ce-8724-445575b23e9"));
        assert!(!is_uuid("9d18d524x2a6e-44ce-8724-445575b23e9a"));
        assert!(!is_uuid("zd18d524-2a6e-44ce-8724-445575b23e9a"));
    }
}
