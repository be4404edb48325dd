use serde::{Deserialize, Serialize};

/// An element's layout box as four edge coordinates.
///
/// `right` and `bottom` are distances from the container's left and top
/// edges respectively, matching what a layout engine reports for a
/// client rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl BoundingRect {
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top: y,
            right: x + width,
            bottom: y + height,
            left: x,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
            left: self.left + dx,
        }
    }

    /// Re-express this rectangle with `origin`'s top-left corner as (0, 0).
    pub fn relative_to(&self, origin: &BoundingRect) -> Self {
        self.translate(-origin.left, -origin.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
