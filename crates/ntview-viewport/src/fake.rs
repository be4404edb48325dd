//! In-memory [`Surface`] for tests and headless hosts.
//!
//! Element rectangles are stored in document coordinates; scrolling the
//! fake page shifts every reported rectangle by the scroll offset.

use std::collections::HashMap;

use ntview_common::{BoundingRect, ElementId, Size};

use crate::surface::{NodeKind, Surface};

#[derive(Debug, Clone)]
struct FakeNode {
    kind: NodeKind,
    rect: BoundingRect,
    inner: Option<Size>,
    inline: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeSurface {
    nodes: HashMap<ElementId, FakeNode>,
    viewport: Option<Size>,
    document: Size,
    scroll_y: f64,
    scroll_height: Option<f64>,
    meta: HashMap<String, String>,
    title: String,
    host: Option<String>,
}

impl FakeSurface {
    /// A page whose viewport and document client area are both
    /// `width` x `height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            viewport: Some(Size::new(width, height)),
            document: Size::new(width, height),
            scroll_y: 0.0,
            scroll_height: None,
            meta: HashMap::new(),
            title: String::new(),
            host: None,
        }
    }

    /// A page on an engine that does not report viewport dimensions.
    pub fn legacy(width: f64, height: f64) -> Self {
        Self {
            viewport: None,
            ..Self::new(width, height)
        }
    }

    pub fn with_viewport(mut self, size: Option<Size>) -> Self {
        self.viewport = size;
        self
    }

    /// Add an element with a document-relative layout box.
    pub fn with_element(mut self, id: &str, rect: BoundingRect) -> Self {
        self.insert(id, NodeKind::Element, rect);
        self
    }

    /// Add a node of an arbitrary kind.
    pub fn with_node(mut self, id: &str, kind: NodeKind) -> Self {
        self.insert(id, kind, BoundingRect::from_xywh(0.0, 0.0, 0.0, 0.0));
        self
    }

    pub fn with_inline_settings(mut self, id: &str, json: &str) -> Self {
        if let Some(node) = self.nodes.get_mut(&ElementId::from(id)) {
            node.inline = Some(json.to_string());
        }
        self
    }

    pub fn with_inner_size(mut self, id: &str, size: Size) -> Self {
        if let Some(node) = self.nodes.get_mut(&ElementId::from(id)) {
            node.inner = Some(size);
        }
        self
    }

    pub fn with_scroll_height(mut self, height: f64) -> Self {
        self.scroll_height = Some(height);
        self
    }

    pub fn with_meta(mut self, name: &str, value: &str) -> Self {
        self.meta.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Move an element to a new document-relative box.
    pub fn set_rect(&mut self, id: &str, rect: BoundingRect) {
        if let Some(node) = self.nodes.get_mut(&ElementId::from(id)) {
            node.rect = rect;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.nodes.remove(&ElementId::from(id));
    }

    fn insert(&mut self, id: &str, kind: NodeKind, rect: BoundingRect) {
        self.nodes.insert(
            ElementId::from(id),
            FakeNode {
                kind,
                rect,
                inner: None,
                inline: None,
            },
        );
    }
}

impl Surface for FakeSurface {
    fn node_kind(&self, id: &ElementId) -> Option<NodeKind> {
        self.nodes.get(id).map(|n| n.kind)
    }

    fn bounding_rect(&self, id: &ElementId) -> Option<BoundingRect> {
        self.nodes
            .get(id)
            .map(|n| n.rect.translate(0.0, -self.scroll_y))
    }

    fn inline_settings(&self, id: &ElementId) -> Option<String> {
        self.nodes.get(id).and_then(|n| n.inline.clone())
    }

    fn viewport_size(&self) -> Option<Size> {
        self.viewport
    }

    fn document_client_size(&self) -> Size {
        self.document
    }

    fn inner_size(&self, id: &ElementId) -> Option<Size> {
        self.nodes
            .get(id)
            .map(|n| n.inner.unwrap_or(Size::new(n.rect.width(), n.rect.height())))
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height.unwrap_or(self.document.height)
    }

    fn meta_property(&self, name: &str) -> Option<String> {
        self.meta.get(name).cloned()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn host(&self) -> Option<String> {
        self.host.clone()
    }
}
