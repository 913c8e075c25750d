//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides:
//!
//! ```text
//! { "canvasWidth": 390, "canvasHeight": 590, "historyLimit": 100 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::{CanvasSize, MIN_ELEMENT_SIZE};
use crate::handle::{HANDLE_DRAW_SIZE, HANDLE_HIT_SIZE};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::hit::SELECTION_PADDING;
use crate::tool::Tab;
use crate::validation::validate_color;
use crate::{CanvasError, CanvasResult};

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;
/// Default canvas background color.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
/// Default double-tap window in milliseconds.
pub const DEFAULT_DOUBLE_TAP_MS: u64 = 350;

/// Configuration for the store and interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Canvas width in pixels.
    pub canvas_width: f32,
    /// Canvas height in pixels.
    pub canvas_height: f32,
    /// Background color for new and cleared designs.
    pub background_color: String,
    /// Maximum number of history snapshots.
    pub history_limit: usize,
    /// Touch slop around element boxes.
    pub selection_padding: f32,
    /// Half side of a handle's touch hotspot.
    pub handle_hit_size: f32,
    /// Half side of a handle's drawn square.
    pub handle_draw_size: f32,
    /// Two taps on the same text element closer than this enter edit mode.
    pub double_tap_ms: u64,
    /// Tab active when the editor opens.
    pub initial_tab: Tab,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            background_color: DEFAULT_BACKGROUND.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            selection_padding: SELECTION_PADDING,
            handle_hit_size: HANDLE_HIT_SIZE,
            handle_draw_size: HANDLE_DRAW_SIZE,
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
            initial_tab: Tab::Text,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Serialization`] for malformed JSON and the
    /// errors of [`EditorConfig::validate`].
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Io`] if the file cannot be read, otherwise as
    /// [`EditorConfig::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidOperation`] for a canvas smaller than the
    /// minimum element size, a zero history limit or negative sizes, and
    /// [`CanvasError::Validation`] for a bad background color.
    pub fn validate(&self) -> CanvasResult<()> {
        let canvas_ok = self.canvas_width.is_finite()
            && self.canvas_height.is_finite()
            && self.canvas_width >= MIN_ELEMENT_SIZE
            && self.canvas_height >= MIN_ELEMENT_SIZE;
        if !canvas_ok {
            return Err(CanvasError::InvalidOperation(format!(
                "canvas must be at least {MIN_ELEMENT_SIZE}x{MIN_ELEMENT_SIZE}, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.history_limit == 0 {
            return Err(CanvasError::InvalidOperation(
                "historyLimit must be at least 1".into(),
            ));
        }
        if self.selection_padding < 0.0 || self.handle_hit_size < 0.0 || self.handle_draw_size < 0.0
        {
            return Err(CanvasError::InvalidOperation(
                "padding and handle sizes must not be negative".into(),
            ));
        }
        validate_color(&self.background_color)?;
        Ok(())
    }

    /// The canvas extent.
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }
}
