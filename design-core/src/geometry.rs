//! Canvas-local geometry: points, element boxes and the canvas clamp region.

use serde::{Deserialize, Serialize};

/// Smallest width or height any element may have, in canvas pixels.
pub const MIN_ELEMENT_SIZE: f32 = 10.0;

/// A point in canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (pixels from the canvas left edge).
    pub x: f32,
    /// Y coordinate (pixels from the canvas top edge).
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The fixed canvas extent. All committed element geometry lies inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
}

impl CanvasSize {
    /// Create a canvas size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether `bounds` lies entirely within `[0, 0, width, height]`.
    #[must_use]
    pub fn contains(&self, bounds: &Bounds) -> bool {
        bounds.x >= 0.0
            && bounds.y >= 0.0
            && bounds.right() <= self.width
            && bounds.bottom() <= self.height
    }
}

/// An axis-aligned element box: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Bounds {
    /// Create a box.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check if a point lies within this box grown by `padding` on every side.
    #[must_use]
    pub fn contains_padded(&self, point: Point, padding: f32) -> bool {
        point.x >= self.x - padding
            && point.x <= self.right() + padding
            && point.y >= self.y - padding
            && point.y <= self.bottom() + padding
    }

    /// Raise width and height to [`MIN_ELEMENT_SIZE`].
    #[must_use]
    pub fn with_min_size(self) -> Self {
        Self {
            width: self.width.max(MIN_ELEMENT_SIZE),
            height: self.height.max(MIN_ELEMENT_SIZE),
            ..self
        }
    }

    /// Move the box into the canvas without changing its size (drag clamp).
    ///
    /// A box larger than the canvas is pinned to the origin on that axis.
    #[must_use]
    pub fn clamp_position(self, canvas: CanvasSize) -> Self {
        Self {
            x: clamp_start(self.x, self.width, canvas.width),
            y: clamp_start(self.y, self.height, canvas.height),
            ..self
        }
    }

    /// Clamp each edge into the canvas independently (resize clamp).
    ///
    /// Edges that cross the canvas border are pulled back onto it. If that
    /// leaves a dimension under [`MIN_ELEMENT_SIZE`], the box is regrown away
    /// from the border it touches.
    #[must_use]
    pub fn clamp_edges(self, canvas: CanvasSize) -> Self {
        let (x, width) = clamp_span(self.x, self.width, canvas.width);
        let (y, height) = clamp_span(self.y, self.height, canvas.height);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Enforce the minimum size, then shrink and shift the box into the canvas.
    #[must_use]
    pub fn fit_within(self, canvas: CanvasSize) -> Self {
        let sized = Self {
            width: self.width.max(MIN_ELEMENT_SIZE).min(canvas.width),
            height: self.height.max(MIN_ELEMENT_SIZE).min(canvas.height),
            ..self
        };
        sized.clamp_position(canvas)
    }
}

fn clamp_start(start: f32, len: f32, limit: f32) -> f32 {
    if start >= 0.0 && start + len <= limit {
        return start;
    }
    let mut s = start.min(limit - len).max(0.0);
    // `limit - len` can round up; step down until the far edge fits.
    while s > 0.0 && s + len > limit {
        s = f32::from_bits(s.to_bits() - 1);
    }
    s
}

fn clamp_span(start: f32, len: f32, limit: f32) -> (f32, f32) {
    let lo = start.max(0.0);
    let hi = (start + len).min(limit);
    if hi - lo >= MIN_ELEMENT_SIZE {
        return (lo, hi - lo);
    }
    if lo + MIN_ELEMENT_SIZE <= limit {
        (lo, MIN_ELEMENT_SIZE)
    } else {
        ((limit - MIN_ELEMENT_SIZE).max(0.0), MIN_ELEMENT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize::new(800.0, 600.0);

    #[test]
    fn test_contains_padded() {
        let b = Bounds::new(100.0, 100.0, 50.0, 20.0);
        assert!(b.contains_padded(Point::new(100.0, 100.0), 0.0));
        assert!(b.contains_padded(Point::new(92.0, 95.0), 10.0));
        assert!(!b.contains_padded(Point::new(89.0, 100.0), 10.0));
        assert!(b.contains_padded(Point::new(160.0, 130.0), 10.0));
        assert!(!b.contains_padded(Point::new(160.1, 130.0), 10.0));
    }

    #[test]
    fn test_clamp_position_keeps_size() {
        let b = Bounds::new(780.0, -5.0, 100.0, 50.0).clamp_position(CANVAS);
        assert_eq!(b, Bounds::new(700.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_clamp_edges_trims_overflow() {
        let b = Bounds::new(-20.0, 580.0, 100.0, 50.0).clamp_edges(CANVAS);
        assert_eq!(b, Bounds::new(0.0, 580.0, 80.0, 20.0));
    }

    #[test]
    fn test_clamp_edges_regrows_to_minimum() {
        let b = Bounds::new(795.0, 0.0, 30.0, 40.0).clamp_edges(CANVAS);
        assert_eq!(b, Bounds::new(790.0, 0.0, 10.0, 40.0));
    }

    #[test]
    fn test_fit_within_shrinks_oversized() {
        let b = Bounds::new(50.0, 50.0, 2000.0, 5.0).fit_within(CANVAS);
        assert_eq!(b, Bounds::new(0.0, 50.0, 800.0, 10.0));
        assert!(CANVAS.contains(&b));
    }
}
