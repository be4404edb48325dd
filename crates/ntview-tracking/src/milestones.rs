use std::time::Duration;

use ntview_common::{ElementId, NtviewError, ReaderKind, Result};
use ntview_viewport::Surface;

/// Where the visitor is, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePosition {
    /// Document offset of the bottom of the viewport.
    pub bottom: f64,
    /// Full document height.
    pub height: f64,
    pub article_start: f64,
    pub article_middle: f64,
    pub article_end: f64,
}

impl PagePosition {
    pub fn measure<S: Surface + ?Sized>(surface: &S, article: &ElementId) -> Result<Self> {
        let rect = surface.bounding_rect(article).ok_or_else(|| {
            NtviewError::InvalidArgument(format!("article element {article} not found"))
        })?;
        let scroll_y = surface.scroll_y();
        let article_height = surface
            .inner_size(article)
            .map(|s| s.height)
            .unwrap_or_else(|| rect.height());
        let start = rect.top + scroll_y;

        Ok(Self {
            bottom: surface.effective_viewport().height + scroll_y,
            height: surface.scroll_height(),
            article_start: start,
            article_middle: start + article_height / 2.0,
            article_end: start + article_height,
        })
    }
}

/// Seconds, rounded to the millisecond.
pub fn seconds(d: Duration) -> f64 {
    (d.as_secs_f64() * 1000.0).round() / 1000.0
}

/// Faster than `threshold` seconds is scanning, anything else is reading.
pub fn classify(elapsed: f64, threshold: f64) -> ReaderKind {
    if elapsed < threshold {
        ReaderKind::Scanner
    } else {
        ReaderKind::Reader
    }
}
