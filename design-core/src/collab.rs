//! Hand-off types for the collaborators around the editor: the image
//! picker, the text-edit overlay and the color picker.

use serde::{Deserialize, Serialize};

use crate::{CanvasResult, ElementId};

/// What the image source returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ImagePick {
    /// The user picked a bitmap.
    Picked {
        /// Opaque reference to the bitmap.
        uri: String,
    },
    /// The user closed the picker.
    Cancelled,
    /// The platform refused media access.
    PermissionDenied,
}

/// Provides bitmaps for new image elements.
pub trait ImageSource {
    /// Ask the user for an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the picker itself failed. Cancellation and
    /// permission denial are not errors.
    fn pick_image(&mut self) -> CanvasResult<ImagePick>;
}

/// A non-fatal, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notice", content = "message", rename_all = "camelCase")]
pub enum Notice {
    /// The user cancelled the picker.
    ImagePickCancelled,
    /// Media library access was refused.
    PermissionDenied(String),
    /// The image source failed.
    ImageSourceFailed(String),
}

/// Result of [`crate::DesignStore::insert_image`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "value", rename_all = "camelCase")]
pub enum ImageInsert {
    /// An image element was added and selected.
    Inserted(ElementId),
    /// Nothing changed; show the notice.
    Notice(Notice),
}

/// What the text-edit overlay hands back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextEdit {
    /// New content.
    pub text: Option<String>,
    /// New font size.
    pub font_size: Option<f32>,
    /// New font family.
    pub font_family: Option<String>,
    /// New text color.
    pub color: Option<String>,
}

/// Where a picked color goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTarget {
    /// The canvas background.
    Canvas,
    /// Every selected element with a fill color.
    Selection,
}
