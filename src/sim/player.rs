//! The player body: health, invulnerability, dodge

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::Collidable;
use super::rect::Rect;
use crate::consts::*;
use crate::{direction_between, vec_direction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub max_health: i32,
    pub health: i32,
    /// Remaining invulnerability (hit grace or dodge i-frames)
    pub invuln_timer: f32,
    /// Remaining dodge cooldown; dodging is available at zero
    pub dodge_timer: f32,
    /// Cleared during forced transitions (death, room handoff)
    pub can_move: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        let mut body = Body::new(pos, Vec2::splat(PLAYER_SIZE));
        body.friction = PLAYER_FRICTION;
        body.max_speed = Some(PLAYER_MAX_SPEED);
        Self {
            body,
            max_health: PLAYER_MAX_HEALTH,
            health: PLAYER_MAX_HEALTH,
            invuln_timer: 0.0,
            dodge_timer: 0.0,
            can_move: true,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.health > 0
    }

    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    /// Tick down grace timers
    pub fn update_timers(&mut self, dt: f32) {
        self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        self.dodge_timer = (self.dodge_timer - dt).max(0.0);
    }

    /// Movement force from the input intent vector
    pub fn apply_move_input(&mut self, move_dir: Vec2) {
        if !self.can_move || !self.alive() {
            return;
        }
        let dir = move_dir.normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        self.body.apply_force(vec_direction(dir), PLAYER_MOVE_FORCE);
    }

    /// Dodge: a burst shove along the movement direction plus i-frames.
    /// Silent no-op while on cooldown, without a direction, or when the
    /// player cannot act.
    pub fn try_dodge(&mut self, move_dir: Vec2) -> bool {
        if self.dodge_timer > 0.0 || !self.can_move || !self.alive() {
            return false;
        }
        let dir = move_dir.normalize_or_zero();
        if dir == Vec2::ZERO {
            return false;
        }
        self.body.stop();
        self.body.apply_force(vec_direction(dir), PLAYER_DODGE_IMPULSE);
        self.dodge_timer = PLAYER_DODGE_COOLDOWN;
        self.invuln_timer = self.invuln_timer.max(PLAYER_DODGE_INVULN);
        true
    }

    /// Damage plus knockback away from the source. Returns false when the
    /// hit was ignored (invulnerable or already down).
    pub fn take_damage(&mut self, amount: i32, source: Vec2) -> bool {
        if self.invulnerable() || !self.alive() {
            return false;
        }
        self.health = (self.health - amount).max(0);
        self.invuln_timer = PLAYER_HURT_INVULN;
        let away = direction_between(source, self.hitbox().center());
        self.body.stop();
        self.body.apply_force(away, PLAYER_KNOCKBACK_FORCE);
        if self.health == 0 {
            self.can_move = false;
        }
        true
    }
}

impl Collidable for Player {
    fn hitbox(&self) -> Rect {
        self.body.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_applies_knockback_and_invuln() {
        let mut p = Player::new(Vec2::new(100.0, 100.0));
        // Source directly left of the player center
        let hit = p.take_damage(1, Vec2::new(50.0, 116.0));
        assert!(hit);
        assert_eq!(p.health, PLAYER_MAX_HEALTH - 1);
        assert!(p.invulnerable());
        // Shove points right, away from the source
        assert!(p.body.force.x > 0.0);
        assert!(p.body.force.y.abs() < 1e-3);
    }

    #[test]
    fn test_invulnerability_blocks_repeat_hits() {
        let mut p = Player::new(Vec2::ZERO);
        assert!(p.take_damage(1, Vec2::new(-50.0, 0.0)));
        assert!(!p.take_damage(1, Vec2::new(-50.0, 0.0)));
        assert_eq!(p.health, PLAYER_MAX_HEALTH - 1);
        // Grace expires, hits land again
        p.update_timers(PLAYER_HURT_INVULN + 0.01);
        assert!(p.take_damage(1, Vec2::new(-50.0, 0.0)));
    }

    #[test]
    fn test_death_disables_movement() {
        let mut p = Player::new(Vec2::ZERO);
        p.health = 1;
        assert!(p.take_damage(1, Vec2::new(-50.0, 0.0)));
        assert!(!p.alive());
        assert!(!p.can_move);
        // Dead players take no further hits
        p.invuln_timer = 0.0;
        assert!(!p.take_damage(1, Vec2::new(-50.0, 0.0)));
    }

    #[test]
    fn test_dodge_cooldown_gates_repeats() {
        let mut p = Player::new(Vec2::ZERO);
        assert!(p.try_dodge(Vec2::new(1.0, 0.0)));
        assert!(p.invulnerable());
        assert!(!p.try_dodge(Vec2::new(1.0, 0.0)));
        p.update_timers(PLAYER_DODGE_COOLDOWN + 0.01);
        assert!(p.try_dodge(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_dodge_requires_a_direction() {
        let mut p = Player::new(Vec2::ZERO);
        assert!(!p.try_dodge(Vec2::ZERO));
        assert_eq!(p.dodge_timer, 0.0);
    }
}
