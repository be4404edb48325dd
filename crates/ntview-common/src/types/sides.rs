use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A container boundary an element can be tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
    /// All four edges at once.
    All,
}

impl Edge {
    /// Match a side token, ignoring ASCII case. Unknown tokens give `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "right" => Some(Self::Right),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The requested edge list, in the order it was written.
///
/// Parsed from a space-separated string such as `"top left"`; tokens that
/// do not name an edge are dropped. Serializes back to that string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sides(Vec<Edge>);

impl Sides {
    pub fn parse(s: &str) -> Self {
        Self(s.split_whitespace().filter_map(Edge::from_token).collect())
    }

    pub fn all() -> Self {
        Self(vec![Edge::All])
    }

    pub fn single(edge: Edge) -> Self {
        Self(vec![edge])
    }

    pub fn edges(&self) -> &[Edge] {
        &self.0
    }

    /// No recognized edge was requested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Sides {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Edge> for Sides {
    fn from(edge: Edge) -> Self {
        Self::single(edge)
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edge) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(edge.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for Sides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
