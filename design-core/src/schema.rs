//! Canonical serialized representation of a design.
//!
//! Elements are flat JSON objects discriminated by `type`:
//!
//! ```text
//! { "id": "…", "type": "rectangle", "x": 100, "y": 100, "width": 100,
//!   "height": 50, "backgroundColor": "#FF6B6B" }
//! { "id": "…", "type": "text", "x": 10, "y": 10, "width": 172.8, "height": 16,
//!   "text": "Double tap to edit", "fontSize": 16, "fontFamily": "System",
//!   "color": "#000000" }
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, CanvasSize};
use crate::validation::{
    validate_color, validate_finite, validate_text, ValidationError, MAX_ELEMENTS_PER_DESIGN,
};
use crate::{CanvasError, CanvasResult, Element, ElementId, ElementKind, ShapeKind};

/// The `type` tag of a serialized element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Rectangle shape.
    Rectangle,
    /// Circle shape.
    Circle,
    /// Ellipse shape.
    Ellipse,
    /// Triangle shape.
    Triangle,
    /// Star shape.
    Star,
    /// Line shape.
    Line,
    /// Text label.
    Text,
    /// Bitmap.
    Image,
}

impl ElementType {
    const fn shape(self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Triangle => Some(ShapeKind::Triangle),
            Self::Star => Some(ShapeKind::Star),
            Self::Line => Some(ShapeKind::Line),
            Self::Text | Self::Image => None,
        }
    }
}

impl From<ShapeKind> for ElementType {
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

/// Document-friendly element description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDocument {
    /// Element identifier.
    pub id: String,
    /// Variant tag.
    #[serde(rename = "type")]
    pub kind: ElementType,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (informational for text).
    pub width: f32,
    /// Height (informational for text).
    pub height: f32,
    /// Shape fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl From<&Element> for ElementDocument {
    fn from(element: &Element) -> Self {
        let mut doc = Self {
            id: element.id.to_string(),
            kind: ElementType::Text,
            x: element.x,
            y: element.y,
            width: element.width,
            height: element.height,
            background_color: None,
            text: None,
            font_size: None,
            font_family: None,
            color: None,
            uri: None,
        };
        match &element.kind {
            ElementKind::Shape {
                shape,
                background_color,
            } => {
                doc.kind = ElementType::from(*shape);
                doc.background_color = Some(background_color.clone());
            }
            ElementKind::Text {
                text,
                font_size,
                font_family,
                color,
            } => {
                doc.text = Some(text.clone());
                doc.font_size = Some(*font_size);
                doc.font_family = Some(font_family.clone());
                doc.color = Some(color.clone());
            }
            ElementKind::Image { uri } => {
                doc.kind = ElementType::Image;
                doc.uri = Some(uri.clone());
            }
        }
        doc
    }
}

impl ElementDocument {
    /// Convert document to runtime element.
    ///
    /// Text boxes are re-derived; the stored width and height are ignored.
    /// Geometry is not clamped here; the store normalizes on load.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::MalformedDocument`] for a bad id or a missing
    /// variant field, and [`CanvasError::Validation`] for bad colors, text or
    /// numbers.
    pub fn into_element(self) -> CanvasResult<Element> {
        let id = ElementId::parse(&self.id)
            .map_err(|e| CanvasError::MalformedDocument(format!("element id {}: {e}", self.id)))?;
        validate_finite("x", self.x)?;
        validate_finite("y", self.y)?;
        validate_finite("width", self.width)?;
        validate_finite("height", self.height)?;
        let bounds = Bounds::new(self.x, self.y, self.width, self.height);

        let element = if let Some(shape) = self.kind.shape() {
            let color = required(&self.id, "backgroundColor", self.background_color)?;
            validate_color(&color)?;
            Element::shape(shape, bounds, color)
        } else if self.kind == ElementType::Text {
            let text = required(&self.id, "text", self.text)?;
            validate_text(&text)?;
            let font_size = required(&self.id, "fontSize", self.font_size)?;
            validate_finite("fontSize", font_size)?;
            let color = required(&self.id, "color", self.color)?;
            validate_color(&color)?;
            let family = required(&self.id, "fontFamily", self.font_family)?;
            Element::text(self.x, self.y, text, font_size, family, color)
        } else {
            Element::image(bounds, self.uri.unwrap_or_default())
        };
        Ok(element.with_id(id))
    }
}

fn required<T>(id: &str, field: &str, value: Option<T>) -> CanvasResult<T> {
    value.ok_or_else(|| CanvasError::MalformedDocument(format!("element {id} is missing `{field}`")))
}

/// Canonical design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    /// Design identifier.
    pub design_id: String,
    /// Canvas extent the design was saved with.
    pub canvas: CanvasSize,
    /// Canvas background color.
    pub background_color: String,
    /// Elements in z-order.
    pub elements: Vec<ElementDocument>,
    /// Save time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
}

impl DesignDocument {
    /// Build a document from live state.
    #[must_use]
    pub fn from_elements(
        design_id: impl Into<String>,
        canvas: CanvasSize,
        background_color: impl Into<String>,
        elements: &[Element],
        timestamp: u64,
    ) -> Self {
        Self {
            design_id: design_id.into(),
            canvas,
            background_color: background_color.into(),
            elements: elements.iter().map(ElementDocument::from).collect(),
            timestamp,
        }
    }

    /// Convert every element back to runtime form, keeping z-order.
    ///
    /// # Errors
    ///
    /// Returns the first element conversion error,
    /// [`CanvasError::MalformedDocument`] for duplicate ids, and
    /// [`CanvasError::Validation`] for an oversized design.
    pub fn to_elements(&self) -> CanvasResult<Vec<Element>> {
        if self.elements.len() > MAX_ELEMENTS_PER_DESIGN {
            return Err(ValidationError::TooManyElements.into());
        }
        let mut elements: Vec<Element> = Vec::with_capacity(self.elements.len());
        for doc in &self.elements {
            let element = doc.clone().into_element()?;
            if elements.iter().any(|e| e.id == element.id) {
                return Err(CanvasError::MalformedDocument(format!(
                    "duplicate element id {}",
                    element.id
                )));
            }
            elements.push(element);
        }
        Ok(elements)
    }
}
