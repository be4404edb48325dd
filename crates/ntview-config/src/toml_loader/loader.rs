//! Read `NtviewConfig` from a TOML string or file.

use crate::schema::NtviewConfig;
use crate::validation;
use ntview_common::ConfigError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Parse a config from TOML text and validate it.
///
/// Unlike [`load_from_path`], validation failures are returned as errors.
pub fn load_from_str(content: &str) -> Result<NtviewConfig, ConfigError> {
    let config: NtviewConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<NtviewConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config: NtviewConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}, using parsed config with potentially invalid values");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `path`, or fall back to defaults when the file is absent.
pub fn load_or_default(path: &Path) -> Result<NtviewConfig, ConfigError> {
    match load_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, using defaults", path.display());
            Ok(NtviewConfig::default())
        }
        Err(e) => Err(e),
    }
}
