use ntview_common::{BoundingRect, Edge, Size};
use ntview_config::ViewportConfig;

pub(super) struct EdgeTest<'a> {
    pub rect: BoundingRect,
    pub container: Size,
    pub config: &'a ViewportConfig,
}

impl EdgeTest<'_> {
    pub fn passes(&self, edge: Edge) -> bool {
        match edge {
            Edge::Top => self.top(),
            Edge::Right => self.right(),
            Edge::Bottom => self.bottom(),
            Edge::Left => self.left(),
            Edge::All => self.all(),
        }
    }

    fn top(&self) -> bool {
        self.rect.top >= self.config.top
    }

    // `rect.right` is measured from the container's left edge.
    fn right(&self) -> bool {
        self.rect.right <= self.container.width - self.config.right
    }

    // `rect.bottom` is measured from the container's top edge.
    fn bottom(&self) -> bool {
        self.rect.bottom <= self.container.height - self.config.bottom
    }

    fn left(&self) -> bool {
        self.rect.left >= self.config.left
    }

    // Vertical edges first: pages mostly scroll vertically.
    fn all(&self) -> bool {
        self.top() && self.bottom() && self.left() && self.right()
    }
}
