mod element;
mod geometry;
mod sides;

pub use element::*;
pub use geometry::*;
pub use sides::*;
