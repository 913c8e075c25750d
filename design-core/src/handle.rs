//! Resize handles: the eight hotspots around a selected element and the
//! per-handle resize rule.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, CanvasSize, Point, MIN_ELEMENT_SIZE};

/// Half the side of a handle's touch hotspot.
pub const HANDLE_HIT_SIZE: f32 = 12.0;

/// Half the side of a handle's drawn square.
pub const HANDLE_DRAW_SIZE: f32 = 6.0;

/// One of the eight resize handles of an element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
    /// Middle of the top edge.
    Top,
    /// Middle of the right edge.
    Right,
    /// Middle of the bottom edge.
    Bottom,
    /// Middle of the left edge.
    Left,
}

impl ResizeHandle {
    /// All handles in hit-test priority order: corners, then edges.
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
    ];

    const fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    const fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    const fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    const fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    /// The point this handle is centered on.
    #[must_use]
    pub fn center(self, b: Bounds) -> Point {
        let mid_x = b.x + b.width / 2.0;
        let mid_y = b.y + b.height / 2.0;
        match self {
            Self::TopLeft => Point::new(b.x, b.y),
            Self::TopRight => Point::new(b.right(), b.y),
            Self::BottomLeft => Point::new(b.x, b.bottom()),
            Self::BottomRight => Point::new(b.right(), b.bottom()),
            Self::Top => Point::new(mid_x, b.y),
            Self::Right => Point::new(b.right(), mid_y),
            Self::Bottom => Point::new(mid_x, b.bottom()),
            Self::Left => Point::new(b.x, mid_y),
        }
    }

    /// The square of half-side `half` centered on this handle.
    #[must_use]
    pub fn square(self, b: Bounds, half: f32) -> Bounds {
        let c = self.center(b);
        Bounds::new(c.x - half, c.y - half, half * 2.0, half * 2.0)
    }

    /// Geometry after dragging this handle by `(dx, dy)` from `start`.
    ///
    /// Each handle moves only the edges it touches; the opposite edges stay
    /// put. Dimensions are raised to the minimum size first, then the edges
    /// are clamped into the canvas.
    #[must_use]
    pub fn resize(self, start: Bounds, dx: f32, dy: f32, canvas: CanvasSize) -> Bounds {
        let (mut left, mut top) = (start.x, start.y);
        let (mut right, mut bottom) = (start.right(), start.bottom());

        if self.moves_left() {
            left = (left + dx).min(right - MIN_ELEMENT_SIZE);
        }
        if self.moves_right() {
            right = (right + dx).max(left + MIN_ELEMENT_SIZE);
        }
        if self.moves_top() {
            top = (top + dy).min(bottom - MIN_ELEMENT_SIZE);
        }
        if self.moves_bottom() {
            bottom = (bottom + dy).max(top + MIN_ELEMENT_SIZE);
        }

        Bounds::new(left, top, right - left, bottom - top)
            .with_min_size()
            .clamp_edges(canvas)
    }
}

/// Find the handle of `bounds` under `point`.
///
/// Corners are tested before edges so tiny elements, whose hotspots overlap,
/// resolve to a corner.
#[must_use]
pub fn handle_at(point: Point, bounds: Bounds, half: f32) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .into_iter()
        .find(|h| h.square(bounds, half).contains_padded(point, 0.0))
}
