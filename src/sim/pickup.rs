//! XP orbs dropped by defeated enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::Collidable;
use super::rect::Rect;
use crate::consts::*;
use crate::direction_between;

/// An XP orb scattered on death and drawn toward a nearby player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub body: Body,
    /// XP granted on collection
    pub value: u32,
}

impl Pickup {
    pub fn new(id: u32, center: Vec2, value: u32) -> Self {
        let mut body = Body::new(center - Vec2::splat(PICKUP_SIZE) * 0.5, Vec2::splat(PICKUP_SIZE));
        body.friction = PICKUP_FRICTION;
        body.max_speed = Some(PICKUP_MAX_SPEED);
        Self { id, body, value }
    }

    /// Force phase: magnet toward a close player, friction either way
    pub fn drift(&mut self, player_center: Vec2, dt: f32) {
        let center = self.body.center();
        if center.distance(player_center) <= PICKUP_ATTRACT_RADIUS {
            let dir = direction_between(center, player_center);
            self.body.apply_force(dir, PICKUP_ATTRACT_FORCE);
        }
        self.body.apply_friction(dt);
    }
}

impl Collidable for Pickup {
    fn hitbox(&self) -> Rect {
        self.body.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orb_is_pulled_only_when_close() {
        let mut orb = Pickup::new(1, Vec2::new(100.0, 100.0), 1);
        let far = Vec2::new(100.0 + PICKUP_ATTRACT_RADIUS + 50.0, 100.0);
        orb.drift(far, 0.016);
        assert_eq!(orb.body.force, Vec2::ZERO);

        let near = Vec2::new(100.0 + PICKUP_ATTRACT_RADIUS - 10.0, 100.0);
        orb.drift(near, 0.016);
        assert!(orb.body.force.x > 0.0);
        assert_eq!(orb.body.force.y, 0.0);
    }

    #[test]
    fn test_scatter_velocity_drains_out() {
        let mut orb = Pickup::new(1, Vec2::ZERO, 1);
        orb.body.vel = Vec2::new(PICKUP_SCATTER_SPEED, 0.0);
        let player_far = Vec2::new(10_000.0, 0.0);
        for _ in 0..120 {
            orb.drift(player_far, 1.0 / 60.0);
            orb.body.integrate(1.0 / 60.0);
        }
        assert_eq!(orb.body.vel, Vec2::ZERO);
        assert!(orb.body.pos.x > 0.0);
    }

    #[test]
    fn test_hitbox_is_centered_on_spawn_point() {
        let orb = Pickup::new(1, Vec2::new(64.0, 32.0), 2);
        assert_eq!(orb.body.center(), Vec2::new(64.0, 32.0));
        assert_eq!(orb.hitbox().size, Vec2::splat(PICKUP_SIZE));
    }
}
