//! Render view: the draw list and handle squares handed to the UI layer.
//!
//! The UI draws [`DrawCommand`]s in order (later above earlier) and the
//! [`HandleRect`]s on top of everything.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};
use crate::handle::ResizeHandle;
use crate::store::DesignStore;
use crate::{Element, ElementId, ElementKind, ShapeKind};

/// Stroke color used to highlight selected elements and draw handles.
pub const HIGHLIGHT_COLOR: &str = "#007AFF";

/// How to draw one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    /// Filled axis-aligned rectangle.
    Rect {
        /// Box to fill.
        bounds: Bounds,
        /// Fill color.
        fill: String,
    },
    /// Filled circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius (half the box width).
        radius: f32,
        /// Fill color.
        fill: String,
    },
    /// Filled ellipse.
    Ellipse {
        /// Center.
        center: Point,
        /// Horizontal radius.
        rx: f32,
        /// Vertical radius.
        ry: f32,
        /// Fill color.
        fill: String,
    },
    /// Filled polygon (triangle, star).
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Fill color.
        fill: String,
    },
    /// Stroked line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        stroke: String,
    },
    /// A run of text.
    Text {
        /// Left end of the baseline.
        baseline: Point,
        /// Content.
        text: String,
        /// Font size in pixels.
        font_size: f32,
        /// Font family.
        font_family: String,
        /// Text color.
        color: String,
    },
    /// A bitmap stretched over a box.
    Image {
        /// Target box.
        bounds: Bounds,
        /// Bitmap reference.
        uri: String,
    },
}

/// One entry of the draw list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCommand {
    /// Element being drawn.
    pub element_id: ElementId,
    /// Whether to draw the selection highlight.
    pub selected: bool,
    /// What to draw.
    pub primitive: Primitive,
}

/// A drawable resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleRect {
    /// Element the handle belongs to.
    pub element_id: ElementId,
    /// Which handle.
    pub handle: ResizeHandle,
    /// Square to fill.
    pub bounds: Bounds,
}

/// Vertices of the triangle inscribed in `b`: top corners and bottom middle.
#[must_use]
pub fn triangle_points(b: Bounds) -> Vec<Point> {
    vec![
        Point::new(b.x, b.y),
        Point::new(b.x + b.width / 2.0, b.bottom()),
        Point::new(b.right(), b.y),
    ]
}

/// Vertices of the star glyph drawn in `b`.
#[must_use]
pub fn star_points(b: Bounds) -> Vec<Point> {
    vec![
        Point::new(b.x + b.width / 2.0, b.y),
        Point::new(b.x + b.width * 0.16, b.y + b.height * 0.16),
        Point::new(b.x + b.width * 0.5, b.y + b.height * 0.5),
        Point::new(b.x + b.width * 0.84, b.y + b.height * 0.16),
        Point::new(b.x, b.y),
    ]
}

fn primitive(element: &Element) -> Option<Primitive> {
    let b = element.bounds();
    let center = Point::new(b.x + b.width / 2.0, b.y + b.height / 2.0);
    let primitive = match &element.kind {
        ElementKind::Shape {
            shape,
            background_color,
        } => {
            let fill = background_color.clone();
            match shape {
                ShapeKind::Rectangle => Primitive::Rect { bounds: b, fill },
                ShapeKind::Circle => Primitive::Circle {
                    center,
                    radius: b.width / 2.0,
                    fill,
                },
                ShapeKind::Ellipse => Primitive::Ellipse {
                    center,
                    rx: b.width / 2.0,
                    ry: b.height / 2.0,
                    fill,
                },
                ShapeKind::Triangle => Primitive::Polygon {
                    points: triangle_points(b),
                    fill,
                },
                ShapeKind::Star => Primitive::Polygon {
                    points: star_points(b),
                    fill,
                },
                ShapeKind::Line => Primitive::Line {
                    from: b.origin(),
                    to: Point::new(b.right(), b.bottom()),
                    stroke: fill,
                },
            }
        }
        ElementKind::Text {
            text,
            font_size,
            font_family,
            color,
        } => Primitive::Text {
            baseline: Point::new(b.x, b.y + font_size),
            text: text.clone(),
            font_size: *font_size,
            font_family: font_family.clone(),
            color: color.clone(),
        },
        ElementKind::Image { uri } => {
            if uri.is_empty() {
                tracing::warn!("Skipping image {} with empty uri", element.id);
                return None;
            }
            Primitive::Image {
                bounds: b,
                uri: uri.clone(),
            }
        }
    };
    Some(primitive)
}

impl DesignStore {
    /// Draw commands for every renderable element, in z-order.
    ///
    /// Images with an empty URI are skipped but stay in the design.
    #[must_use]
    pub fn render_list(&self) -> Vec<DrawCommand> {
        self.elements()
            .iter()
            .filter_map(|element| {
                primitive(element).map(|primitive| DrawCommand {
                    element_id: element.id,
                    selected: element.selected,
                    primitive,
                })
            })
            .collect()
    }

    /// The eight handle squares of every selected element, using `half` as
    /// the half side of each square.
    #[must_use]
    pub fn handle_rects(&self, half: f32) -> Vec<HandleRect> {
        self.selected_elements()
            .flat_map(|element| {
                let bounds = element.bounds();
                ResizeHandle::ALL.into_iter().map(move |handle| HandleRect {
                    element_id: element.id,
                    handle,
                    bounds: handle.square(bounds, half),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HANDLE_DRAW_SIZE;

    #[test]
    fn test_render_list_in_z_order() {
        let mut store = DesignStore::default();
        let a = store
            .add_element(Element::shape(
                ShapeKind::Circle,
                Bounds::new(0.0, 0.0, 50.0, 50.0),
                "#4ECDC4",
            ))
            .expect("add");
        let b = store
            .add_element(Element::text(10.0, 100.0, "Hi", 16.0, "System", "#000000"))
            .expect("add");

        let list = store.render_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].element_id, a);
        assert!(!list[0].selected);
        assert_eq!(
            list[0].primitive,
            Primitive::Circle {
                center: Point::new(25.0, 25.0),
                radius: 25.0,
                fill: "#4ECDC4".into(),
            }
        );
        assert_eq!(list[1].element_id, b);
        assert!(list[1].selected);
        assert!(matches!(
            &list[1].primitive,
            Primitive::Text { baseline, .. } if *baseline == Point::new(10.0, 116.0)
        ));
    }

    #[test]
    fn test_empty_uri_image_skipped_but_kept() {
        let mut store = DesignStore::default();
        store
            .add_element(Element::image(Bounds::new(0.0, 0.0, 20.0, 20.0), ""))
            .expect("add");
        assert!(store.render_list().is_empty());
        assert_eq!(store.elements().len(), 1);
    }

    #[test]
    fn test_handle_rects_for_selection() {
        let mut store = DesignStore::default();
        let id = store
            .add_element(Element::shape(
                ShapeKind::Rectangle,
                Bounds::new(100.0, 100.0, 100.0, 50.0),
                "#FF6B6B",
            ))
            .expect("add");
        let rects = store.handle_rects(HANDLE_DRAW_SIZE);
        assert_eq!(rects.len(), 8);
        let br = rects
            .iter()
            .find(|r| r.handle == ResizeHandle::BottomRight)
            .expect("bottom-right");
        assert_eq!(br.element_id, id);
        assert_eq!(br.bounds, Bounds::new(194.0, 144.0, 12.0, 12.0));

        store.clear_selection();
        assert!(store.handle_rects(HANDLE_DRAW_SIZE).is_empty());
    }

    #[test]
    fn test_triangle_points() {
        let pts = triangle_points(Bounds::new(0.0, 0.0, 80.0, 70.0));
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 70.0),
                Point::new(80.0, 0.0)
            ]
        );
    }
}
