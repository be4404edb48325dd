//! Containment-query settings and the merge chain that resolves them.

use ntview_common::{ConfigError, ElementId, Sides};
use serde::{Deserialize, Serialize};

/// What an element's bounding box is measured against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Container {
    /// The whole viewport.
    #[default]
    Viewport,
    /// A scrollable element, looked up on the surface.
    Element(ElementId),
}

impl From<String> for Container {
    fn from(s: String) -> Self {
        match s.trim() {
            "" | "window" | "body" => Self::Viewport,
            id => Self::Element(ElementId::new(id)),
        }
    }
}

impl From<Container> for String {
    fn from(c: Container) -> Self {
        match c {
            Container::Viewport => "window".to_string(),
            Container::Element(id) => id.as_str().to_string(),
        }
    }
}

/// Partial settings. Unset fields fall through to the next layer.
///
/// Used for call-site arguments, inline element metadata (JSON) and the
/// `[defaults]` table of the config file alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    /// Space-separated edge names, e.g. `"top left"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl ViewportSettings {
    /// Shorthand settings that only request the given sides.
    pub fn with_sides(sides: impl Into<String>) -> Self {
        Self {
            sides: Some(sides.into()),
            ..Self::default()
        }
    }

    /// Parse inline element metadata. A malformed value is an error, never
    /// silently ignored.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw)
            .map_err(|e| ConfigError::ParseError(format!("invalid inline settings: {e}")))
    }

    /// Field-wise merge: keep what is set here, take the rest from `fallback`.
    /// An empty `sides` string counts as unset.
    pub fn or(&self, fallback: &ViewportSettings) -> ViewportSettings {
        ViewportSettings {
            container: self.container.clone().or_else(|| fallback.container.clone()),
            sides: self
                .sides
                .clone()
                .filter(|s| !s.is_empty())
                .or_else(|| fallback.sides.clone().filter(|s| !s.is_empty())),
            top: self.top.or(fallback.top),
            right: self.right.or(fallback.right),
            bottom: self.bottom.or(fallback.bottom),
            left: self.left.or(fallback.left),
        }
    }

    /// Fill anything still unset with the hard-coded defaults.
    pub fn finish(&self) -> ViewportConfig {
        ViewportConfig {
            container: self.container.clone().unwrap_or_default(),
            sides: self
                .sides
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(Sides::parse)
                .unwrap_or_default(),
            top: self.top.unwrap_or(0.0),
            right: self.right.unwrap_or(0.0),
            bottom: self.bottom.unwrap_or(0.0),
            left: self.left.unwrap_or(0.0),
        }
    }

    /// Resolve call-site settings against inline metadata and library
    /// defaults, in that priority order.
    pub fn resolve(
        &self,
        inline: Option<&str>,
        defaults: &ViewportSettings,
    ) -> Result<ViewportConfig, ConfigError> {
        let merged = match inline {
            Some(raw) => self.or(&Self::from_json(raw)?.or(defaults)),
            None => self.or(defaults),
        };
        Ok(merged.finish())
    }
}

impl From<&str> for ViewportSettings {
    fn from(sides: &str) -> Self {
        Self::with_sides(sides)
    }
}

impl From<Sides> for ViewportSettings {
    fn from(sides: Sides) -> Self {
        Self::with_sides(sides.to_string())
    }
}

/// Fully resolved settings for one containment query.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    pub container: Container,
    pub sides: Sides,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportSettings::default().finish()
    }
}
