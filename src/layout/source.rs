use std::collections::BTreeMap;

use crate::foundation::core::Rect;

/// Read-only geometry provided by the rendering collaborator.
pub trait LayoutSource {
    /// Bounds of `target` relative to the viewport's top-left corner, or `None` when the
    /// element is not mounted.
    fn element_bounds(&self, target: &str) -> Option<Rect>;

    /// Whether `target` is currently mounted.
    fn is_mounted(&self, target: &str) -> bool {
        self.element_bounds(target).is_some()
    }
}

/// In-memory layout: elements placed in document coordinates, viewed at a scroll offset.
#[derive(Clone, Debug, Default)]
pub struct StaticLayout {
    elements: BTreeMap<String, Rect>,
    scroll_offset: f64,
}

impl StaticLayout {
    /// Empty layout at scroll offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`StaticLayout::insert`].
    pub fn with_element(mut self, target: impl Into<String>, doc_rect: Rect) -> Self {
        self.insert(target, doc_rect);
        self
    }

    /// Mount (or move) `target` at `doc_rect`.
    pub fn insert(&mut self, target: impl Into<String>, doc_rect: Rect) {
        self.elements.insert(target.into(), doc_rect);
    }

    /// Unmount `target`, returning its last document rect.
    pub fn remove(&mut self, target: &str) -> Option<Rect> {
        self.elements.remove(target)
    }

    /// Scroll offset used to convert to viewport coordinates.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Move the view.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }
}

impl LayoutSource for StaticLayout {
    fn element_bounds(&self, target: &str) -> Option<Rect> {
        self.elements.get(target).map(|r| {
            Rect::new(
                r.x0,
                r.y0 - self.scroll_offset,
                r.x1,
                r.y1 - self.scroll_offset,
            )
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/source.rs"]
mod tests;
