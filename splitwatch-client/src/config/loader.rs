//! TOML configuration loader

use core::str;

use splitwatch_core::config::{ClientConfig, ConfigError};

/// Maximum TOML config size
pub const MAX_CONFIG_LEN: usize = 4096;

/// Load configuration from raw bytes (file contents, flash, embedded)
pub fn load_config(bytes: &[u8]) -> Result<ClientConfig, ConfigError> {
    if bytes.len() > MAX_CONFIG_LEN {
        warn!("Config is {} bytes, limit is {}", bytes.len(), MAX_CONFIG_LEN);
        return Err(ConfigError::Parse);
    }
    let text = str::from_utf8(bytes).map_err(|_| {
        warn!("Config is not valid UTF-8");
        ConfigError::Parse
    })?;
    parse_config(text)
}

/// Parse and validate a TOML document
///
/// An empty document yields the defaults.
pub fn parse_config(text: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = toml::from_str(text).map_err(|_| {
        warn!("TOML parse error");
        ConfigError::Parse
    })?;

    config.validate().map_err(|e| {
        warn!("Invalid config: {:?}", e);
        e
    })?;

    log_config_summary(&config);
    Ok(config)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ClientConfig) {
    info!("Configuration loaded");
    debug!(
        "  device prefix {:?}",
        config.device.name_prefix.as_ref().map(|p| p.as_str())
    );
    debug!("  service {}", config.device.service_uuid.as_str());
    debug!("  frame interval {} ms", config.refresh.frame_interval_ms);
    debug!("  {} visible laps", config.display.visible_laps);
}
