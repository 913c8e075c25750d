//! Tools, tabs and the element factories they drive.
//!
//! | Tool | Tap on canvas |
//! |------|---------------|
//! | `select` | select the topmost element, or clear the selection |
//! | shape | create that shape at the tap point, then return to `select` |
//!
//! The `text` tab overrides the tool: a tap creates a text element and hands
//! it to the text editor.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};
use crate::{Element, ShapeKind};

/// Default text for a freshly placed text element.
pub const DEFAULT_TEXT: &str = "Double tap to edit";
/// Default font size for new text.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
/// Default font family for new text.
pub const DEFAULT_FONT_FAMILY: &str = "System";
/// Default text color.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
/// Where picked images are placed, and their initial size.
pub const DEFAULT_IMAGE_BOUNDS: Bounds = Bounds::new(100.0, 100.0, 200.0, 150.0);

/// The active tool determines how taps are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, drag and resize existing elements.
    #[default]
    Select,
    /// Place rectangles.
    Rectangle,
    /// Place circles.
    Circle,
    /// Place ellipses.
    Ellipse,
    /// Place triangles.
    Triangle,
    /// Place stars.
    Star,
    /// Place lines.
    Line,
}

impl Tool {
    /// The shape this tool places, if it is a shape tool.
    #[must_use]
    pub const fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Select => None,
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Triangle => Some(ShapeKind::Triangle),
            Self::Star => Some(ShapeKind::Star),
            Self::Line => Some(ShapeKind::Line),
        }
    }
}

impl From<ShapeKind> for Tool {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => Self::Rectangle,
            ShapeKind::Circle => Self::Circle,
            ShapeKind::Ellipse => Self::Ellipse,
            ShapeKind::Triangle => Self::Triangle,
            ShapeKind::Star => Self::Star,
            ShapeKind::Line => Self::Line,
        }
    }
}

/// The editor tab shown in the bottom bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Plain selection.
    Select,
    /// Taps place text.
    #[default]
    Text,
    /// Image picking.
    Images,
    /// Shape palette.
    Shapes,
    /// Canvas background color.
    Background,
}

/// Size, placement and color a shape tool uses for new elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTemplate {
    /// Initial width.
    pub width: f32,
    /// Initial height.
    pub height: f32,
    /// Offset from the tap point to the top-left corner.
    pub anchor: Point,
    /// Fill color.
    pub color: &'static str,
}

impl ShapeKind {
    /// The template used when a tap creates this shape.
    #[must_use]
    pub const fn template(self) -> ShapeTemplate {
        match self {
            Self::Rectangle => ShapeTemplate {
                width: 100.0,
                height: 50.0,
                anchor: Point::new(-50.0, -25.0),
                color: "#FF6B6B",
            },
            Self::Circle => ShapeTemplate {
                width: 50.0,
                height: 50.0,
                anchor: Point::new(-25.0, -25.0),
                color: "#4ECDC4",
            },
            Self::Ellipse => ShapeTemplate {
                width: 80.0,
                height: 40.0,
                anchor: Point::new(-40.0, -20.0),
                color: "#FFD166",
            },
            Self::Triangle => ShapeTemplate {
                width: 80.0,
                height: 70.0,
                anchor: Point::new(-40.0, -35.0),
                color: "#118AB2",
            },
            Self::Star => ShapeTemplate {
                width: 80.0,
                height: 70.0,
                anchor: Point::new(-40.0, -35.0),
                color: "#EF476F",
            },
            Self::Line => ShapeTemplate {
                width: 80.0,
                height: 10.0,
                anchor: Point::new(0.0, 0.0),
                color: "#073B4C",
            },
        }
    }
}

/// Build the shape a tap with `kind`'s tool creates at `at`.
///
/// The result is not yet clamped; the store normalizes it on insert.
#[must_use]
pub fn create_shape(kind: ShapeKind, at: Point) -> Element {
    let t = kind.template();
    Element::shape(
        kind,
        Bounds::new(at.x + t.anchor.x, at.y + t.anchor.y, t.width, t.height),
        t.color,
    )
}

/// Build the default text element placed by a tap in the text tab.
#[must_use]
pub fn create_text(at: Point) -> Element {
    Element::text(
        at.x,
        at.y,
        DEFAULT_TEXT,
        DEFAULT_FONT_SIZE,
        DEFAULT_FONT_FAMILY,
        DEFAULT_TEXT_COLOR,
    )
}

/// Build an image element for a picked URI.
#[must_use]
pub fn create_image(uri: impl Into<String>) -> Element {
    Element::image(DEFAULT_IMAGE_BOUNDS, uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;

    #[test]
    fn test_tool_shape_mapping_round_trips() {
        assert_eq!(Tool::Select.shape_kind(), None);
        for kind in ShapeKind::ALL {
            assert_eq!(Tool::from(kind).shape_kind(), Some(kind));
        }
    }

    #[test]
    fn test_rectangle_centered_on_tap() {
        let el = create_shape(ShapeKind::Rectangle, Point::new(200.0, 100.0));
        assert_eq!(el.bounds(), Bounds::new(150.0, 75.0, 100.0, 50.0));
        assert_eq!(el.background_color(), Some("#FF6B6B"));
    }

    #[test]
    fn test_line_anchored_at_tap() {
        let el = create_shape(ShapeKind::Line, Point::new(30.0, 40.0));
        assert_eq!(el.bounds(), Bounds::new(30.0, 40.0, 80.0, 10.0));
    }

    #[test]
    fn test_every_template_meets_minimum() {
        for kind in ShapeKind::ALL {
            let t = kind.template();
            assert!(t.width >= crate::MIN_ELEMENT_SIZE, "{kind:?}");
            assert!(t.height >= crate::MIN_ELEMENT_SIZE, "{kind:?}");
        }
    }

    #[test]
    fn test_default_text() {
        let el = create_text(Point::new(10.0, 10.0));
        match &el.kind {
            ElementKind::Text {
                text,
                font_size,
                font_family,
                color,
            } => {
                assert_eq!(text, DEFAULT_TEXT);
                assert!((font_size - 16.0).abs() < f32::EPSILON);
                assert_eq!(font_family, "System");
                assert_eq!(color, "#000000");
            }
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn test_tool_serde_names() {
        assert_eq!(
            serde_json::to_string(&Tool::Triangle).expect("serialize"),
            "\"triangle\""
        );
        let tab: Tab = serde_json::from_str("\"background\"").expect("deserialize");
        assert_eq!(tab, Tab::Background);
    }
}
