//! Config validation.
//!
//! Checks numeric ranges and site profile hosts, collecting every problem
//! into one error.

use crate::schema::{NtviewConfig, ViewportSettings};
use ntview_common::ConfigError;
use std::collections::HashSet;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &NtviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_offsets(&mut errors, "defaults", &config.defaults);

    validate_range(&mut errors, "watch.debounce_ms", config.watch.debounce_ms, 1, 10_000);
    validate_range(
        &mut errors,
        "tracking.poll_delay_ms",
        config.tracking.poll_delay_ms,
        1,
        10_000,
    );
    validate_seconds(
        &mut errors,
        "tracking.middle_scanner_secs",
        config.tracking.middle_scanner_secs,
    );
    validate_seconds(
        &mut errors,
        "tracking.end_scanner_secs",
        config.tracking.end_scanner_secs,
    );
    if config.tracking.article.trim().is_empty() {
        errors.push("tracking.article must not be empty".into());
    }

    let mut hosts = HashSet::new();
    for (i, site) in config.sites.iter().enumerate() {
        let host = site.host.trim().to_ascii_lowercase();
        if host.is_empty() {
            errors.push(format!("sites[{i}].host must not be empty"));
        } else if !hosts.insert(host) {
            errors.push(format!("sites[{i}].host '{}' is listed more than once", site.host));
        }
        validate_offsets(&mut errors, &format!("sites[{i}].defaults"), &site.defaults);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, field: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{field} must be {min}-{max}, got {value}"));
    }
}

fn validate_seconds(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{field} must be a non-negative number, got {value}"));
    }
}

fn validate_offsets(errors: &mut Vec<String>, section: &str, settings: &ViewportSettings) {
    let offsets = [
        ("top", settings.top),
        ("right", settings.right),
        ("bottom", settings.bottom),
        ("left", settings.left),
    ];
    for (name, value) in offsets {
        if let Some(v) = value {
            if !v.is_finite() {
                errors.push(format!("{section}.{name} must be finite, got {v}"));
            }
        }
    }
}
