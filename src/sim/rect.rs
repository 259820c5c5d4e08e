//! Axis-aligned rectangle geometry
//!
//! A rect is its min corner plus a size. Every hitbox in the game is one of
//! these; overlap tests are strict, so rects sharing an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (min corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Min corner (top-left in screen convention)
    pub pos: Vec2,
    /// Extent; zero size is a point
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rect centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    /// Zero-size rect at a point (an arrow tip in flight)
    pub fn point(p: Vec2) -> Self {
        Self {
            pos: p,
            size: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.max().x
            && self.max().x > other.pos.x
            && self.pos.y < other.max().y
            && self.max().y > other.pos.y
    }

    /// Overlap rectangle of two rects, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        Some(Rect {
            pos: min,
            size: max - min,
        })
    }

    /// Check if a point is inside (strictly within edges)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.pos.x && p.x < self.max().x && p.y > self.pos.y && p.y < self.max().y
    }
}
