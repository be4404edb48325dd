//! Configuration schema types.
//!
//! `NtviewConfig` is the top-level struct deserialized from `ntview.toml`.
//! Every section uses `#[serde(default)]`, so partial files work.

mod settings;
mod site;
mod tracking;
mod watch;

pub use settings::{Container, ViewportConfig, ViewportSettings};
pub use site::SiteProfile;
pub use tracking::TrackingConfig;
pub use watch::WatchConfig;

use ntview_common::ElementId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NtviewConfig {
    /// Library-wide containment settings.
    pub defaults: ViewportSettings,
    pub watch: WatchConfig,
    pub tracking: TrackingConfig,
    pub sites: Vec<SiteProfile>,
}

impl NtviewConfig {
    pub fn site(&self, host: &str) -> Option<&SiteProfile> {
        self.sites
            .iter()
            .find(|s| s.host.eq_ignore_ascii_case(host))
    }

    /// Library defaults with the matching site profile layered on top.
    pub fn settings_for_host(&self, host: Option<&str>) -> ViewportSettings {
        match host.and_then(|h| self.site(h)) {
            Some(site) => site.defaults.or(&self.defaults),
            None => self.defaults.clone(),
        }
    }

    /// Article element for the reading tracker on `host`.
    pub fn article_for_host(&self, host: Option<&str>) -> ElementId {
        host.and_then(|h| self.site(h))
            .and_then(|s| s.article.as_deref())
            .unwrap_or(&self.tracking.article)
            .into()
    }
}
