//! Viewport containment query.
//!
//! An element is "within" on an edge when its layout box does not cross
//! that edge of the container, shrunk by the configured offset. Offsets
//! move the edge inwards when positive and outwards when negative.
//! Boundaries are inclusive: an element flush with an edge is within.

mod edges;


use ntview_common::{BoundingRect, ElementId, NtviewError, Result, Size};
use ntview_config::{Container, ViewportConfig, ViewportSettings};
use tracing::trace;

use crate::surface::{NodeKind, Surface};

use self::edges::EdgeTest;

static NO_DEFAULTS: ViewportSettings = ViewportSettings {
    container: None,
    sides: None,
    top: None,
    right: None,
    bottom: None,
    left: None,
};

/// Containment queries against one surface.
pub struct Viewport<'a, S: ?Sized> {
    surface: &'a S,
    defaults: &'a ViewportSettings,
}

impl<'a, S: Surface + ?Sized> Viewport<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self {
            surface,
            defaults: &NO_DEFAULTS,
        }
    }

    /// Queries that fall back to `defaults` for anything neither the call
    /// nor the element's inline settings specify.
    pub fn with_defaults(surface: &'a S, defaults: &'a ViewportSettings) -> Self {
        Self { surface, defaults }
    }

    /// Whether `id` is inside its container on every requested edge.
    ///
    /// `settings` is either a full [`ViewportSettings`] or a side string
    /// such as `"top left"`. Fails with `InvalidArgument` if `id` is not an
    /// element and with a parse error if its inline settings are malformed.
    pub fn is_within(&self, id: &ElementId, settings: impl Into<ViewportSettings>) -> Result<bool> {
        self.require_element(id)?;
        let inline = self.surface.inline_settings(id);
        let settings: ViewportSettings = settings.into();
        let config = settings.resolve(inline.as_deref(), self.defaults)?;
        self.test(id, &config)
    }

    pub fn is_top(&self, id: &ElementId) -> Result<bool> {
        self.is_within(id, "top")
    }

    pub fn is_right(&self, id: &ElementId) -> Result<bool> {
        self.is_within(id, "right")
    }

    pub fn is_bottom(&self, id: &ElementId) -> Result<bool> {
        self.is_within(id, "bottom")
    }

    pub fn is_left(&self, id: &ElementId) -> Result<bool> {
        self.is_within(id, "left")
    }

    /// Run the edge tests with an already resolved configuration.
    ///
    /// Sides are tested from the last listed to the first, stopping at the
    /// first failure. A side list with no recognized edge is never within.
    pub fn test(&self, id: &ElementId, config: &ViewportConfig) -> Result<bool> {
        self.require_element(id)?;
        let rect = self
            .surface
            .bounding_rect(id)
            .ok_or_else(|| NtviewError::InvalidArgument(format!("{id} has no layout box")))?;

        let (rect, container) = self.measure(rect, &config.container);
        let edges = EdgeTest {
            rect,
            container,
            config,
        };

        let mut result = false;
        for &edge in config.sides.edges().iter().rev() {
            result = edges.passes(edge);
            if !result {
                break;
            }
        }

        trace!(element = %id, sides = %config.sides, result, "containment checked");
        Ok(result)
    }

    fn require_element(&self, id: &ElementId) -> Result<()> {
        match self.surface.node_kind(id) {
            Some(NodeKind::Element) => Ok(()),
            Some(kind) => Err(NtviewError::InvalidArgument(format!(
                "{id} is a {kind:?} node, not an element"
            ))),
            None => Err(NtviewError::InvalidArgument(format!(
                "{id} does not resolve to an element"
            ))),
        }
    }

    /// Express `rect` relative to the container and report the
    /// container's inner size. Containers that are not elements measure
    /// as the viewport.
    fn measure(&self, rect: BoundingRect, container: &Container) -> (BoundingRect, Size) {
        if let Container::Element(cid) = container {
            if self.surface.node_kind(cid) == Some(NodeKind::Element) {
                let origin = self.surface.bounding_rect(cid);
                let size = self.surface.inner_size(cid);
                if let (Some(origin), Some(size)) = (origin, size) {
                    return (rect.relative_to(&origin), size);
                }
            }
            trace!(container = %cid, "container is not a measurable element, using viewport");
        }
        (rect, self.surface.effective_viewport())
    }
}
