//! Error types for design operations.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for design operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in design operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Element not found in the store.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid element operation (for example a text field patched onto a shape).
    #[error("Invalid operation on element: {0}")]
    InvalidOperation(String),

    /// Input rejected by validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Design document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No design stored under the requested id.
    #[error("Design not found: {0}")]
    DesignNotFound(String),

    /// A saved document could not be turned back into elements.
    #[error("Malformed design document: {0}")]
    MalformedDocument(String),

    /// The image source collaborator failed.
    #[error("Image source failed: {0}")]
    ImageSource(String),
}
