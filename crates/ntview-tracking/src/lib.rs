//! Reading-progress tracking for article pages.
//!
//! [`ReadingTracker`] watches how far down an article the visitor has
//! scrolled and records each milestone (content start, middle, end of
//! content, end of page) once, with elapsed times and a reader/scanner
//! classification.

mod milestones;
mod tracker;

#[cfg(test)]
mod tests;

pub use milestones::{classify, seconds, PagePosition};
pub use tracker::ReadingTracker;
