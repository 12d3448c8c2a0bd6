//! In-memory document implementing [`Surface`].

use std::collections::BTreeMap;

use tracing::debug;

use crate::surface::{ElementId, Rect, Surface};

/// A single element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    width: Option<String>,
    rect: Rect,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Flat element arena with a scrollable viewport.
///
/// Document order is insertion order.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    viewport: Rect,
}

impl MemoryDocument {
    /// Create an empty document viewed through `viewport`.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            elements: Vec::new(),
            viewport,
        }
    }

    /// Append an element and return its id.
    pub fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Move an element's layout box.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(id.0) {
            el.rect = rect;
        }
    }

    /// Lowest edge of any element; the scrollable page height.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.rect.bottom())
            .fold(0.0, f64::max)
    }

    /// Maximum vertical scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.content_height() - self.viewport.height).max(0.0)
    }

    /// Scroll the viewport to `y`, clamped to the page.
    pub fn scroll_to(&mut self, y: f64) {
        self.viewport.y = y.clamp(0.0, self.max_scroll());
    }

    /// Scroll the viewport by `dy`, clamped to the page.
    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_to(self.viewport.y + dy);
    }

    /// Resize the viewport, keeping its scroll offset.
    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.scroll_to(self.viewport.y);
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let el = self.elements.get_mut(id.0);
        if el.is_none() {
            debug!(%id, "write to unknown element ignored");
        }
        el
    }
}

impl Surface for MemoryDocument {
    fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_class(class))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)?.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(Element::text)
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.element_mut(id) {
            text.clone_into(&mut el.text);
        }
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    fn width(&self, id: ElementId) -> Option<&str> {
        self.element(id)?.width()
    }

    fn set_width(&mut self, id: ElementId, width: &str) {
        if let Some(el) = self.element_mut(id) {
            el.width = Some(width.to_string());
        }
    }

    fn bounding_rect(&self, id: ElementId) -> Option<Rect> {
        self.element(id).map(Element::rect)
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> MemoryDocument {
        MemoryDocument::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn query_class_in_document_order() {
        let mut d = doc();
        let a = d.push(Element::new("div").with_class("tab-item"));
        d.push(Element::new("div").with_class("other"));
        let c = d.push(Element::new("div").with_class("tab-item"));
        assert_eq!(d.query_class("tab-item"), vec![a, c]);
        assert!(d.query_class("missing").is_empty());
    }

    #[test]
    fn classes_are_a_set() {
        let mut d = doc();
        let id = d.push(Element::new("div").with_class("a").with_class("a"));
        d.add_class(id, "a");
        assert_eq!(d.element(id).unwrap().classes().len(), 1);
        d.remove_class(id, "a");
        assert!(!d.has_class(id, "a"));
    }

    #[test]
    fn attributes_text_and_width() {
        let mut d = doc();
        let id = d.push(Element::new("span").with_attr("data-value", "42"));
        assert_eq!(d.attribute(id, "data-value"), Some("42"));
        d.set_attribute(id, "aria-selected", "true");
        assert_eq!(d.attribute(id, "aria-selected"), Some("true"));
        d.set_text(id, "42+");
        assert_eq!(d.text(id), Some("42+"));
        assert!(d.width(id).is_none());
        d.set_width(id, "10%");
        assert_eq!(d.width(id), Some("10%"));
    }

    #[test]
    fn writes_to_unknown_elements_are_ignored() {
        let mut d = doc();
        d.set_text(ElementId(99), "x");
        d.add_class(ElementId(99), "x");
        assert!(d.text(ElementId(99)).is_none());
        assert!(!d.has_class(ElementId(99), "x"));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut d = doc();
        d.push(Element::new("div").with_rect(Rect::new(0.0, 0.0, 800.0, 1000.0)));
        assert!((d.max_scroll() - 400.0).abs() < f64::EPSILON);
        d.scroll_by(1000.0);
        assert!((d.viewport().y - 400.0).abs() < f64::EPSILON);
        d.scroll_to(-50.0);
        assert!(d.viewport().y.abs() < f64::EPSILON);
    }

    #[test]
    fn resize_keeps_scroll_in_range() {
        let mut d = doc();
        d.push(Element::new("div").with_rect(Rect::new(0.0, 0.0, 800.0, 1000.0)));
        d.scroll_to(400.0);
        d.resize_viewport(800.0, 900.0);
        assert!((d.viewport().y - 100.0).abs() < f64::EPSILON);
    }
}
