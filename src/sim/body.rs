//! Physics body: force accumulation, friction and integration
//!
//! Forces are accelerations accumulated over one tick and consumed by
//! `integrate`. Friction is applied directly to velocity so the clamp
//! against overshooting zero is exact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::polar_to_cartesian;

/// A movable entity body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Min corner of the bounding rect
    pub pos: Vec2,
    /// Bounding extent
    pub size: Vec2,
    pub vel: Vec2,
    /// Net acceleration accumulated for the current tick
    #[serde(skip)]
    pub force: Vec2,
    /// Deceleration magnitude opposing current velocity
    pub friction: f32,
    /// Speed cap applied after integration (None = unclamped)
    pub max_speed: Option<f32>,
    /// Axis chosen on the last exact-tie tile resolution
    #[serde(default)]
    pub tie_flip: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            friction: 0.0,
            max_speed: None,
            tie_flip: false,
        }
    }

    /// Bounding rect at the current position
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Accumulate `magnitude * (cos dir, sin dir)` into this tick's force
    pub fn apply_force(&mut self, direction: f32, magnitude: f32) {
        self.force += polar_to_cartesian(magnitude, direction);
    }

    /// Decelerate against the current velocity direction.
    ///
    /// The speed drop is clamped to the current speed: friction may stop a
    /// body dead within one tick but never reverses it.
    pub fn apply_friction(&mut self, dt: f32) {
        let speed = self.vel.length();
        if speed == 0.0 {
            return;
        }
        let drop = self.friction * dt;
        if drop >= speed {
            self.vel = Vec2::ZERO;
        } else {
            self.vel -= self.vel * (drop / speed);
        }
    }

    /// Advance one tick: velocity from accumulated force, speed cap,
    /// position from velocity. The force accumulator resets afterward.
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.force * dt;
        if let Some(max) = self.max_speed {
            let speed = self.vel.length();
            if speed > max {
                // Rescale to exactly max, preserving direction
                self.vel = if max > 0.0 {
                    self.vel * (max / speed)
                } else {
                    Vec2::ZERO
                };
            }
        }
        self.pos += self.vel * dt;
        self.force = Vec2::ZERO;
    }

    /// Kill all motion (knockback zeroes velocity before the shove)
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.force = Vec2::ZERO;
    }
}
