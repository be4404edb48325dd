//! The rendering environment, as seen by the queries in this crate.

use ntview_common::{BoundingRect, ElementId, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Document,
}

/// Read-only access to live layout state.
///
/// Rectangles are reported relative to the viewport, the way a client
/// rectangle query does. Implementations must not cache: every call
/// reflects the current layout.
pub trait Surface {
    /// Kind of the node `id` resolves to, or `None` if nothing matches.
    fn node_kind(&self, id: &ElementId) -> Option<NodeKind>;

    /// Current layout box of `id`, viewport-relative.
    fn bounding_rect(&self, id: &ElementId) -> Option<BoundingRect>;

    /// Raw inline settings attached to the element (a JSON object).
    fn inline_settings(&self, _id: &ElementId) -> Option<String> {
        None
    }

    /// Inner viewport size. `None` on engines that do not report it.
    fn viewport_size(&self) -> Option<Size>;

    /// Client size of the root document element.
    fn document_client_size(&self) -> Size;

    /// Inner (content + padding) size of an element.
    fn inner_size(&self, id: &ElementId) -> Option<Size>;

    /// Vertical scroll offset of the page.
    fn scroll_y(&self) -> f64 {
        0.0
    }

    /// Full scrollable height of the document.
    fn scroll_height(&self) -> f64 {
        self.document_client_size().height
    }

    /// Value of a page-level meta property such as `og:type`.
    fn meta_property(&self, _name: &str) -> Option<String> {
        None
    }

    fn title(&self) -> String {
        String::new()
    }

    /// Host the page was served from.
    fn host(&self) -> Option<String> {
        None
    }

    /// Viewport size, falling back to the document client size on
    /// engines that do not report one.
    fn effective_viewport(&self) -> Size {
        self.viewport_size()
            .unwrap_or_else(|| self.document_client_size())
    }
}
