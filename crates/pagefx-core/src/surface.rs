//! The document surface the effects read from and write to.
//!
//! Effects only see a page through [`Surface`]: class queries, attributes,
//! text, an inline width style and layout geometry. Writes to unknown
//! elements are ignored; a cosmetic effect never fails the page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to an element of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the rectangle by `margin` on every side (shrinks for negative margins).
    #[must_use]
    pub fn grow(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + 2.0 * margin).max(0.0),
            height: (self.height + 2.0 * margin).max(0.0),
        }
    }

    /// Overlapping region of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

/// Read/write access to a rendered page.
pub trait Surface {
    /// Elements carrying `class`, in document order.
    fn query_class(&self, class: &str) -> Vec<ElementId>;

    /// Value of attribute `name`; data attributes use their `data-*` name.
    fn attribute(&self, id: ElementId, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str);

    fn text(&self, id: ElementId) -> Option<&str>;

    fn set_text(&mut self, id: ElementId, text: &str);

    fn has_class(&self, id: ElementId, class: &str) -> bool;

    fn add_class(&mut self, id: ElementId, class: &str);

    fn remove_class(&mut self, id: ElementId, class: &str);

    /// Inline `width` style, e.g. `"40%"`.
    fn width(&self, id: ElementId) -> Option<&str>;

    fn set_width(&mut self, id: ElementId, width: &str);

    /// Layout box of the element in page coordinates.
    fn bounding_rect(&self, id: ElementId) -> Option<Rect>;

    /// Visible region of the page in page coordinates.
    fn viewport(&self) -> Rect;
}

/// CSS percentage for a proportion in `[0, 1]`.
///
/// # Example
/// ```
/// use pagefx_core::surface::percent_width;
///
/// assert_eq!(percent_width(0.0), "0%");
/// assert_eq!(percent_width(0.25), "25%");
/// assert_eq!(percent_width(1.0), "100%");
/// ```
#[must_use]
pub fn percent_width(proportion: f64) -> String {
    format!("{}%", proportion * 100.0)
}

/// Parse a CSS percentage back into a proportion. Garbage yields `None`.
#[must_use]
pub fn parse_percent(width: &str) -> Option<f64> {
    let value: f64 = width.trim().strip_suffix('%')?.trim().parse().ok()?;
    value.is_finite().then_some(value / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn grow_and_shrink() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(r.grow(5.0), Rect::new(5.0, 5.0, 30.0, 30.0));
        assert!(r.grow(-20.0).area().abs() < f64::EPSILON);
    }

    #[test]
    fn percent_round_trip() {
        let p = parse_percent(&percent_width(0.4)).unwrap();
        assert!((p - 0.4).abs() < 1e-12);
    }

    #[test]
    fn parse_percent_rejects_garbage() {
        assert!(parse_percent("40px").is_none());
        assert!(parse_percent("%").is_none());
        assert!(parse_percent("").is_none());
    }

    #[test]
    fn element_id_display() {
        assert_eq!(ElementId(3).to_string(), "#3");
    }
}
