//! Pointer input delivered to the interaction engine.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Finger down.
    Press,
    /// Finger dragging.
    Move,
    /// Finger up.
    Release,
    /// Gesture cancelled by the platform (e.g., palm rejection).
    Cancel,
}

/// A single pointer event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    /// Pointer identifier (for telling fingers apart).
    #[serde(default)]
    pub pointer_id: u32,
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in page coordinates.
    pub x: f32,
    /// Y position in page coordinates.
    pub y: f32,
    /// Timestamp in milliseconds.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create a new pointer event for pointer 0.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            pointer_id: 0,
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Finger down at `(x, y)`.
    #[must_use]
    pub const fn press(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Press, x, y, timestamp_ms)
    }

    /// Finger moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp_ms)
    }

    /// Finger up at `(x, y)`.
    #[must_use]
    pub const fn release(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Release, x, y, timestamp_ms)
    }

    /// Gesture cancelled at `(x, y)`.
    #[must_use]
    pub const fn cancel(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, x, y, timestamp_ms)
    }

    /// Set the pointer id.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Position in canvas-local space, given where the canvas sits on the page.
    #[must_use]
    pub fn canvas_point(&self, canvas_offset: Point) -> Point {
        Point::new(self.x - canvas_offset.x, self.y - canvas_offset.y)
    }
}
