//! Design elements - the shapes, text and images placed on the canvas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, CanvasSize, MIN_ELEMENT_SIZE};
use crate::validation::{validate_color, validate_finite, validate_text};
use crate::{CanvasError, CanvasResult};

/// Width of one character as a fraction of the font size.
///
/// Text boxes are estimated, not measured: `font_size * 0.6 * chars`.
pub const TEXT_WIDTH_FACTOR: f32 = 0.6;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the string form produced by `Display`.
    ///
    /// # Errors
    ///
    /// Returns the UUID parse error if `s` is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rectangle,
    /// Circle inscribed in the box (radius = width / 2).
    Circle,
    /// Ellipse inscribed in the box.
    Ellipse,
    /// Triangle with its apex on the bottom edge.
    Triangle,
    /// Star polygon.
    Star,
    /// Straight line along the box diagonal.
    Line,
}

impl ShapeKind {
    /// All shape kinds, in palette order.
    pub const ALL: [Self; 6] = [
        Self::Rectangle,
        Self::Circle,
        Self::Ellipse,
        Self::Triangle,
        Self::Star,
        Self::Line,
    ];

    /// The `type` tag used in the serialized schema.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Triangle => "triangle",
            Self::Star => "star",
            Self::Line => "line",
        }
    }
}

/// The type-specific content of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A filled geometric shape.
    Shape {
        /// Which shape.
        shape: ShapeKind,
        /// Fill color as hex (stroke color for lines).
        background_color: String,
    },

    /// A single-line text label.
    Text {
        /// Text content.
        text: String,
        /// Font size in pixels; also the box height.
        font_size: f32,
        /// Font family name.
        font_family: String,
        /// Text color as hex.
        color: String,
    },

    /// A bitmap supplied by the image source.
    Image {
        /// Opaque reference to the bitmap.
        uri: String,
    },
}

/// Width and height of a text box under the glyph-width heuristic.
///
/// Empty text still occupies one character cell so it stays hittable.
#[must_use]
#[allow(clippy::cast_precision_loss)] // char counts stay far below f32 precision limits
pub fn text_extent(text: &str, font_size: f32) -> (f32, f32) {
    let chars = text.chars().count().max(1) as f32;
    (font_size * TEXT_WIDTH_FACTOR * chars, font_size)
}

/// Smallest font size whose derived box is at least [`MIN_ELEMENT_SIZE`]
/// on both axes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn min_font_size(text: &str) -> f32 {
    let chars = text.chars().count().max(1) as f32;
    let mut size = MIN_ELEMENT_SIZE.max(MIN_ELEMENT_SIZE / (TEXT_WIDTH_FACTOR * chars));
    // The division can round down; step up until the width clears the minimum.
    while text_extent(text, size).0 < MIN_ELEMENT_SIZE {
        size = f32::from_bits(size.to_bits() + 1);
    }
    size
}

/// A partial update merged into an element by `update_element`.
///
/// Fields left `None` are untouched. Setting a field the element's variant
/// does not carry is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// New left edge.
    pub x: Option<f32>,
    /// New top edge.
    pub y: Option<f32>,
    /// New width (ignored by text, which derives its box).
    pub width: Option<f32>,
    /// New height (maps onto font size for text).
    pub height: Option<f32>,
    /// New shape fill color.
    pub background_color: Option<String>,
    /// New text content.
    pub text: Option<String>,
    /// New font size.
    pub font_size: Option<f32>,
    /// New font family.
    pub font_family: Option<String>,
    /// New text color.
    pub color: Option<String>,
    /// New image URI.
    pub uri: Option<String>,
}

impl ElementPatch {
    /// A patch that only moves the element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch that only resizes the element.
    #[must_use]
    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// A patch replacing the whole box.
    #[must_use]
    pub fn bounds(bounds: Bounds) -> Self {
        Self {
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: Some(bounds.width),
            height: Some(bounds.height),
            ..Self::default()
        }
    }

    /// A patch that only changes the shape fill color.
    #[must_use]
    pub fn background_color(color: impl Into<String>) -> Self {
        Self {
            background_color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A design element with content and geometry.
///
/// `width`/`height` of a text element are always re-derived from its text
/// and font size; they are never authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Unique identifier, immutable once assigned.
    pub id: ElementId,
    /// Left edge in canvas-local space.
    pub x: f32,
    /// Top edge in canvas-local space.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Mirrors membership in the store's selection.
    pub selected: bool,
    /// Element content type.
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element with the given kind and box.
    #[must_use]
    pub fn new(kind: ElementKind, bounds: Bounds) -> Self {
        let mut element = Self {
            id: ElementId::new(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            selected: false,
            kind,
        };
        element.derive_text_box();
        element
    }

    /// Create a shape element.
    #[must_use]
    pub fn shape(shape: ShapeKind, bounds: Bounds, background_color: impl Into<String>) -> Self {
        Self::new(
            ElementKind::Shape {
                shape,
                background_color: background_color.into(),
            },
            bounds,
        )
    }

    /// Create a text element with its top-left corner at `(x, y)`.
    #[must_use]
    pub fn text(
        x: f32,
        y: f32,
        text: impl Into<String>,
        font_size: f32,
        font_family: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self::new(
            ElementKind::Text {
                text: text.into(),
                font_size,
                font_family: font_family.into(),
                color: color.into(),
            },
            Bounds::new(x, y, 0.0, 0.0),
        )
    }

    /// Create an image element.
    #[must_use]
    pub fn image(bounds: Bounds, uri: impl Into<String>) -> Self {
        Self::new(ElementKind::Image { uri: uri.into() }, bounds)
    }

    /// Replace the generated id (used when materializing saved documents).
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// The element's box.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// The `type` tag used in the serialized schema.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ElementKind::Shape { shape, .. } => shape.as_str(),
            ElementKind::Text { .. } => "text",
            ElementKind::Image { .. } => "image",
        }
    }

    /// Whether this is a text element.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Shape fill color, if this element has one.
    #[must_use]
    pub fn background_color(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Shape {
                background_color, ..
            } => Some(background_color),
            _ => None,
        }
    }

    /// Replace the box.
    ///
    /// Text keeps its origin, maps the height onto its font size and
    /// re-derives the width.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        if let ElementKind::Text {
            text, font_size, ..
        } = &mut self.kind
        {
            *font_size = bounds.height.max(min_font_size(text));
        } else {
            self.width = bounds.width;
            self.height = bounds.height;
        }
        self.derive_text_box();
    }

    /// Enforce the size minimum and pull the element inside the canvas.
    ///
    /// Text font size is raised until the derived box meets the minimum on
    /// both axes. Text too wide for the canvas has its font size reduced
    /// until it fits, never below that floor.
    pub fn normalize(&mut self, canvas: CanvasSize) {
        if let ElementKind::Text {
            text, font_size, ..
        } = &mut self.kind
        {
            let floor = min_font_size(text);
            *font_size = font_size.max(floor);
            let (width, _) = text_extent(text, *font_size);
            if width > canvas.width {
                let per_size = width / *font_size;
                let mut size = (canvas.width / per_size).max(floor);
                while size > floor && text_extent(text, size).0 > canvas.width {
                    size = (size * (1.0 - 4.0 * f32::EPSILON)).max(floor);
                }
                *font_size = size;
            }
            *font_size = font_size.min(canvas.height);
            self.derive_text_box();
            let fitted = self.bounds().clamp_position(canvas);
            self.x = fitted.x;
            self.y = fitted.y;
            if !canvas.contains(&self.bounds()) {
                tracing::warn!(
                    "Text element {} is wider than the canvas at minimum font size",
                    self.id
                );
            }
            return;
        }
        let fitted = self.bounds().fit_within(canvas);
        self.set_bounds(fitted);
    }

    /// Merge a patch into this element.
    ///
    /// The element is left untouched if any field fails validation or does
    /// not apply to this variant.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidOperation`] for fields the variant lacks
    /// and [`CanvasError::Validation`] for bad colors, text or numbers.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> CanvasResult<()> {
        let mut next = self.clone();
        for (field, value) in [
            ("x", patch.x),
            ("y", patch.y),
            ("width", patch.width),
            ("height", patch.height),
            ("fontSize", patch.font_size),
        ] {
            if let Some(v) = value {
                validate_finite(field, v)?;
            }
        }

        let mut bounds = next.bounds();
        bounds.x = patch.x.unwrap_or(bounds.x);
        bounds.y = patch.y.unwrap_or(bounds.y);
        bounds.width = patch.width.unwrap_or(bounds.width);
        bounds.height = patch.height.unwrap_or(bounds.height);
        next.set_bounds(bounds);

        let id = next.id;
        match &mut next.kind {
            ElementKind::Shape {
                background_color, ..
            } => {
                reject(id, "text", patch.text.is_some())?;
                reject(id, "fontSize", patch.font_size.is_some())?;
                reject(id, "fontFamily", patch.font_family.is_some())?;
                reject(id, "color", patch.color.is_some())?;
                reject(id, "uri", patch.uri.is_some())?;
                if let Some(color) = &patch.background_color {
                    validate_color(color)?;
                    background_color.clone_from(color);
                }
            }
            ElementKind::Text {
                text,
                font_size,
                font_family,
                color,
            } => {
                reject(id, "backgroundColor", patch.background_color.is_some())?;
                reject(id, "uri", patch.uri.is_some())?;
                if let Some(new_text) = &patch.text {
                    validate_text(new_text)?;
                    text.clone_from(new_text);
                }
                if let Some(size) = patch.font_size {
                    *font_size = size;
                }
                *font_size = font_size.max(min_font_size(text));
                if let Some(family) = &patch.font_family {
                    font_family.clone_from(family);
                }
                if let Some(new_color) = &patch.color {
                    validate_color(new_color)?;
                    color.clone_from(new_color);
                }
            }
            ElementKind::Image { uri } => {
                reject(id, "backgroundColor", patch.background_color.is_some())?;
                reject(id, "text", patch.text.is_some())?;
                reject(id, "fontSize", patch.font_size.is_some())?;
                reject(id, "fontFamily", patch.font_family.is_some())?;
                reject(id, "color", patch.color.is_some())?;
                if let Some(new_uri) = &patch.uri {
                    uri.clone_from(new_uri);
                }
            }
        }
        next.derive_text_box();
        *self = next;
        Ok(())
    }

    fn derive_text_box(&mut self) {
        if let ElementKind::Text {
            text, font_size, ..
        } = &self.kind
        {
            let (width, height) = text_extent(text, *font_size);
            self.width = width;
            self.height = height;
        }
    }
}

fn reject(id: ElementId, field: &str, present: bool) -> CanvasResult<()> {
    if present {
        Err(CanvasError::InvalidOperation(format!(
            "element {id} has no `{field}` field"
        )))
    } else {
        Ok(())
    }
}
