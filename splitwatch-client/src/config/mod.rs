//! Configuration loading
//!
//! Parses a TOML document into the core's [`ClientConfig`] and validates it.
//! Missing sections and fields fall back to defaults.

pub mod loader;

pub use loader::{load_config, parse_config, MAX_CONFIG_LEN};
pub use splitwatch_core::config::{
    ClientConfig, ConfigError, DeviceConfig, DisplayConfig, RefreshConfig,
};
