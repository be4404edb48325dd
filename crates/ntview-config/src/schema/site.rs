//! Per-host overrides.

use serde::{Deserialize, Serialize};

use super::settings::ViewportSettings;

/// Settings applied when the page is served from `host`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    pub host: String,
    /// Layered over the library-wide `[defaults]`.
    pub defaults: ViewportSettings,
    /// Article element for the reading tracker on this host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}
