//! Reading tracker configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub enabled: bool,
    /// Quiet period after the last scroll event before the page position is
    /// evaluated (valid range: 1-10000).
    pub poll_delay_ms: u64,
    /// Reaching the middle of the content faster than this marks a scanner.
    pub middle_scanner_secs: f64,
    /// Reaching the end of the content faster than this marks a scanner.
    pub end_scanner_secs: f64,
    /// Element wrapping the article content, unless a site profile says otherwise.
    pub article: String,
    /// Page meta property that identifies an article page.
    pub page_type_property: String,
    /// Value `page_type_property` must have.
    pub page_type: String,
}

impl TrackingConfig {
    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_delay_ms: 100,
            middle_scanner_secs: 15.0,
            end_scanner_secs: 30.0,
            article: "article".into(),
            page_type_property: "og:type".into(),
            page_type: "article".into(),
        }
    }
}
