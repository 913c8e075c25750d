//! Input validation for data crossing the store boundary.
//!
//! Colors, design ids and text content arrive from collaborators (pickers,
//! text editor overlay, persistence) and are checked before they reach an
//! element.

use thiserror::Error;

/// Maximum length for design IDs.
pub const MAX_DESIGN_ID_LEN: usize = 64;
/// Maximum text content length in a text element.
pub const MAX_TEXT_CONTENT_LEN: usize = 65_536;
/// Maximum elements per design.
pub const MAX_ELEMENTS_PER_DESIGN: usize = 10_000;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Design ID exceeds maximum length.
    #[error("design_id too long (max {MAX_DESIGN_ID_LEN} chars)")]
    DesignIdTooLong,
    /// Design ID is empty or contains invalid characters.
    #[error("design_id contains invalid characters")]
    DesignIdInvalidChars,
    /// Color is not a `#RGB`, `#RRGGBB` or `#RRGGBBAA` hex string.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    /// Text content exceeds maximum length.
    #[error("text content too long (max {MAX_TEXT_CONTENT_LEN} bytes)")]
    TextContentTooLong,
    /// Too many elements in the design.
    #[error("too many elements (max {MAX_ELEMENTS_PER_DESIGN})")]
    TooManyElements,
    /// A numeric field is NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
}

/// Check if a character is valid for IDs (alphanumeric, hyphen, or underscore).
fn is_valid_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Validate a design ID.
///
/// Valid design IDs are 1-64 characters of ASCII alphanumerics, hyphen or
/// underscore. They double as file stems in [`crate::FileRepository`].
///
/// # Errors
///
/// Returns [`ValidationError::DesignIdTooLong`] if the ID exceeds 64 characters.
/// Returns [`ValidationError::DesignIdInvalidChars`] if the ID is empty or contains invalid characters.
pub fn validate_design_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_DESIGN_ID_LEN {
        return Err(ValidationError::DesignIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::DesignIdInvalidChars);
    }
    Ok(())
}

/// Validate a hex color string.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidColor`] unless the string is `#` followed
/// by 3, 6 or 8 hex digits.
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidColor(color.to_string()))
    }
}

/// Validate text element content.
///
/// # Errors
///
/// Returns [`ValidationError::TextContentTooLong`] if the content exceeds the limit.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.len() > MAX_TEXT_CONTENT_LEN {
        return Err(ValidationError::TextContentTooLong);
    }
    Ok(())
}

/// Validate that a numeric field is finite.
///
/// # Errors
///
/// Returns [`ValidationError::NonFinite`] naming the field.
pub fn validate_finite(field: &'static str, value: f32) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite(field))
    }
}
