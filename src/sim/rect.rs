//! Axis-aligned rectangle geometry for paddles and the ball
//!
//! Screen space: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Whether the vertical extents share at least one point (edges touching count)
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        !(self.bottom() < other.top() || self.top() > other.bottom())
    }
}

/// Anything with a rectangular footprint the ball can bounce off
pub trait Body {
    fn rect(&self) -> Rect;
}

impl Body for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_vertical_overlap() {
        let paddle = Rect::new(10.0, 100.0, 10.0, 100.0);

        assert!(Rect::new(0.0, 150.0, 7.0, 7.0).overlaps_vertically(&paddle));
        // Touching edges count as overlap
        assert!(Rect::new(0.0, 93.0, 7.0, 7.0).overlaps_vertically(&paddle));
        assert!(Rect::new(0.0, 200.0, 7.0, 7.0).overlaps_vertically(&paddle));
        // Clear misses above and below
        assert!(!Rect::new(0.0, 92.0, 7.0, 7.0).overlaps_vertically(&paddle));
        assert!(!Rect::new(0.0, 200.5, 7.0, 7.0).overlaps_vertically(&paddle));
    }
}
