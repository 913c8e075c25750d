//! Hit testing: point → element lookup.
//!
//! Walks the element list back to front (last painted = topmost) and returns
//! the first element whose padded box contains the point. The topmost element
//! always wins overlaps.

use crate::geometry::Point;
use crate::{Element, ElementId};

/// Touch slop added on every side of an element box when hit-testing.
pub const SELECTION_PADDING: f32 = 10.0;

/// Find the topmost element at `point`.
/// Returns `None` if the point hits the bare canvas.
#[must_use]
pub fn hit_test(elements: &[Element], point: Point, padding: f32) -> Option<ElementId> {
    elements
        .iter()
        .rev()
        .find(|el| el.bounds().contains_padded(point, padding))
        .map(|el| el.id)
}

/// Find every element at `point`, topmost first.
#[must_use]
pub fn hit_test_all(elements: &[Element], point: Point, padding: f32) -> Vec<ElementId> {
    elements
        .iter()
        .rev()
        .filter(|el| el.bounds().contains_padded(point, padding))
        .map(|el| el.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::ShapeKind;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Element {
        Element::shape(ShapeKind::Rectangle, Bounds::new(x, y, w, h), "#FF6B6B")
    }

    #[test]
    fn test_hit_inside_and_miss() {
        let elements = vec![rect(100.0, 100.0, 100.0, 50.0)];
        let id = elements[0].id;
        assert_eq!(
            hit_test(&elements, Point::new(150.0, 120.0), SELECTION_PADDING),
            Some(id)
        );
        assert_eq!(
            hit_test(&elements, Point::new(10.0, 10.0), SELECTION_PADDING),
            None
        );
    }

    #[test]
    fn test_padding_extends_hit_area() {
        let elements = vec![rect(100.0, 100.0, 100.0, 50.0)];
        let edge = Point::new(95.0, 160.0);
        assert!(hit_test(&elements, edge, 0.0).is_none());
        assert!(hit_test(&elements, edge, SELECTION_PADDING).is_some());
    }

    #[test]
    fn test_topmost_wins_overlap() {
        let bottom = rect(0.0, 0.0, 200.0, 200.0);
        let top = rect(50.0, 50.0, 200.0, 200.0);
        let top_id = top.id;
        let bottom_id = bottom.id;
        let elements = vec![bottom, top];

        assert_eq!(
            hit_test(&elements, Point::new(100.0, 100.0), SELECTION_PADDING),
            Some(top_id)
        );
        assert_eq!(
            hit_test_all(&elements, Point::new(100.0, 100.0), SELECTION_PADDING),
            vec![top_id, bottom_id]
        );
    }

    #[test]
    fn test_text_uses_derived_box() {
        // 4 chars at 20px: 48 x 20
        let text = Element::text(100.0, 100.0, "abcd", 20.0, "System", "#000000");
        let elements = vec![text];
        assert!(hit_test(&elements, Point::new(147.0, 110.0), 0.0).is_some());
        assert!(hit_test(&elements, Point::new(149.0, 110.0), 0.0).is_none());
        assert!(hit_test(&elements, Point::new(120.0, 125.0), 0.0).is_none());
    }
}
