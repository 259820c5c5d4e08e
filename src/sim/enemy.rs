//! Enemy archetypes and their behavior state machines
//!
//! One `Enemy` struct covers every archetype; behavior that differs only by
//! parameters lives in the `EnemyKind` tagged union. All archetypes share
//! the same damage/knockback path and the same dying phase before removal.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::Collidable;
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Difficulty;
use crate::{direction_between, polar_to_cartesian};

/// Spawnable enemy archetypes (the spawn manager's vocabulary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Chases the player inside its provoke radius
    Charger,
    /// Charger whose provoke radius grows permanently per knockback
    Berserker,
    /// Stationary turret firing at the player's last known position
    Shooter,
    /// Hops toward the player after randomized rests
    Hopper,
}

/// Runtime behavior state, tagged by archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Charger {
        escalating: bool,
        provoke_radius: f32,
    },
    Shooter {
        /// Seconds until the next shot
        cooldown: f32,
    },
    Hopper {
        /// Seconds since the current hop cycle started
        clock: f32,
        /// Rest tail rolled for this cycle
        rest: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyLife {
    Alive,
    /// Death animation window before removal
    Dying { timer: f32 },
    /// Pruned at the end of the frame
    Dead,
}

/// Hop cycle animation phase, a pure function of the cycle clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopPhase {
    Anticipate,
    Jump,
    Fall,
    Land,
    Rest,
}

/// Map elapsed time since cycle start to the animation phase.
/// The impulse lands at the Anticipate -> Jump edge.
pub fn hop_phase(clock: f32) -> HopPhase {
    let mut t = HOP_ANTICIPATE;
    if clock < t {
        return HopPhase::Anticipate;
    }
    t += HOP_JUMP;
    if clock < t {
        return HopPhase::Jump;
    }
    t += HOP_FALL;
    if clock < t {
        return HopPhase::Fall;
    }
    t += HOP_LAND;
    if clock < t {
        return HopPhase::Land;
    }
    HopPhase::Rest
}

/// Result of an enemy taking damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already dying or dead; nothing happened
    Ignored,
    Hurt { knocked_back: bool },
    /// Health reached zero; the dying phase has started
    Killed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    pub health: i32,
    pub life: EnemyLife,
    /// Hurt flash window (presentation reads it, sim owns it)
    pub hurt_timer: f32,
    /// Knockback recovery: movement policy is suspended while positive
    pub recover_timer: f32,
}

impl Enemy {
    /// Build an enemy of the given archetype at a position. The RNG only
    /// feeds the hopper's first rest roll so spawns stay deterministic.
    pub fn spawn(
        id: u32,
        archetype: EnemyArchetype,
        pos: Vec2,
        difficulty: Difficulty,
        rng: &mut Pcg32,
    ) -> Self {
        let (kind, size, health) = match archetype {
            EnemyArchetype::Charger => (
                EnemyKind::Charger {
                    escalating: false,
                    provoke_radius: CHARGER_PROVOKE_RADIUS,
                },
                CHARGER_SIZE,
                3,
            ),
            EnemyArchetype::Berserker => (
                EnemyKind::Charger {
                    escalating: true,
                    provoke_radius: CHARGER_PROVOKE_RADIUS,
                },
                CHARGER_SIZE,
                4,
            ),
            EnemyArchetype::Shooter => (
                EnemyKind::Shooter {
                    cooldown: difficulty.shooter_cooldown(),
                },
                SHOOTER_SIZE,
                3,
            ),
            EnemyArchetype::Hopper => {
                let (lo, hi) = difficulty.hopper_rest_range();
                (
                    EnemyKind::Hopper {
                        // Spawn into the rest tail so fresh rooms do not
                        // open with a synchronized volley of hops
                        clock: HOP_ANTICIPATE + HOP_JUMP + HOP_FALL + HOP_LAND,
                        rest: rng.random_range(lo..hi),
                    },
                    HOPPER_SIZE,
                    2,
                )
            }
        };

        let mut body = Body::new(pos, Vec2::splat(size));
        match kind {
            EnemyKind::Charger { .. } => {
                body.friction = CHARGER_FRICTION;
                body.max_speed = Some(CHARGER_MAX_SPEED);
            }
            EnemyKind::Shooter { .. } => {}
            EnemyKind::Hopper { .. } => {
                body.friction = HOPPER_FRICTION;
                body.max_speed = Some(HOPPER_MAX_SPEED);
            }
        }

        Self {
            id,
            kind,
            body,
            health,
            life: EnemyLife::Alive,
            hurt_timer: 0.0,
            recover_timer: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self.life, EnemyLife::Alive)
    }

    /// Shooters hold their ground no matter what hits them
    #[inline]
    pub fn knockback_immune(&self) -> bool {
        matches!(self.kind, EnemyKind::Shooter { .. })
    }

    /// Orbs released when this enemy is removed
    pub fn orb_reward(&self) -> u32 {
        match self.kind {
            EnemyKind::Charger { escalating: false, .. } => 2,
            EnemyKind::Charger { escalating: true, .. } => 3,
            EnemyKind::Shooter { .. } => 3,
            EnemyKind::Hopper { .. } => 2,
        }
    }

    /// Per-frame behavior: decide movement forces and, for shooters, a
    /// shot to fire as `(muzzle, direction)`. Runs in the force phase.
    pub fn think(
        &mut self,
        player_center: Vec2,
        difficulty: Difficulty,
        dt: f32,
        rng: &mut Pcg32,
    ) -> Option<(Vec2, f32)> {
        if !self.is_alive() {
            return None;
        }
        self.hurt_timer = (self.hurt_timer - dt).max(0.0);
        self.recover_timer = (self.recover_timer - dt).max(0.0);
        let center = self.body.center();
        let recovering = self.recover_timer > 0.0;

        match &mut self.kind {
            EnemyKind::Charger { provoke_radius, .. } => {
                if !recovering {
                    let dist = center.distance(player_center);
                    if dist > CHASE_EPSILON && dist <= *provoke_radius {
                        let dir = direction_between(center, player_center);
                        self.body.apply_force(dir, CHARGER_FORCE);
                    }
                }
                None
            }
            EnemyKind::Shooter { cooldown } => {
                *cooldown -= dt;
                if *cooldown <= 0.0 {
                    *cooldown = difficulty.shooter_cooldown();
                    // Aim is sampled here; the shot is never re-aimed
                    let dir = direction_between(center, player_center);
                    return Some((center, dir));
                }
                None
            }
            EnemyKind::Hopper { clock, rest } => {
                let prev = *clock;
                *clock += dt;
                if prev < HOP_ANTICIPATE && *clock >= HOP_ANTICIPATE && !recovering {
                    // One impulse toward where the player is right now
                    let dir = direction_between(center, player_center);
                    self.body.stop();
                    self.body.apply_force(dir, HOPPER_IMPULSE);
                }
                let cycle = HOP_ANTICIPATE + HOP_JUMP + HOP_FALL + HOP_LAND + *rest;
                if *clock >= cycle {
                    *clock = 0.0;
                    let (lo, hi) = difficulty.hopper_rest_range();
                    *rest = rng.random_range(lo..hi);
                }
                None
            }
        }
    }

    /// Damage, then either the dying transition or hurt-flash + knockback
    /// away from the source's hitbox center.
    pub fn take_damage(&mut self, amount: i32, source: Vec2) -> HitOutcome {
        if !self.is_alive() {
            return HitOutcome::Ignored;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.life = EnemyLife::Dying {
                timer: ENEMY_DYING_TIME,
            };
            self.body.stop();
            return HitOutcome::Killed;
        }

        self.hurt_timer = HURT_FLASH_TIME;
        if self.knockback_immune() {
            return HitOutcome::Hurt {
                knocked_back: false,
            };
        }

        let away = direction_between(source, self.body.center());
        self.body.stop();
        self.body.apply_force(away, KNOCKBACK_FORCE);
        self.recover_timer = KNOCKBACK_RECOVERY;
        if let EnemyKind::Charger {
            escalating: true,
            provoke_radius,
        } = &mut self.kind
        {
            *provoke_radius += CHARGER_PROVOKE_GROWTH;
        }
        HitOutcome::Hurt { knocked_back: true }
    }

    /// Advance the dying animation; removal happens at the prune pass
    pub fn advance_life(&mut self, dt: f32) {
        if let EnemyLife::Dying { timer } = &mut self.life {
            *timer -= dt;
            if *timer <= 0.0 {
                self.life = EnemyLife::Dead;
            }
        }
    }
}

impl Collidable for Enemy {
    fn hitbox(&self) -> Rect {
        self.body.bounds()
    }
}

/// A pooled shooter projectile. Inactive slots park off-world for reuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub id: u32,
    pub body: Body,
    pub active: bool,
    /// Remaining lifetime; expires in open space
    pub ttl: f32,
}

impl Shot {
    pub fn inactive(id: u32) -> Self {
        Self {
            id,
            body: Body::new(Vec2::splat(ARROW_PARK), Vec2::splat(SHOT_SIZE)),
            active: false,
            ttl: 0.0,
        }
    }

    /// Reactivate this slot as a fresh shot
    pub fn fire(&mut self, from: Vec2, direction: f32) {
        self.body.pos = from - self.body.size * 0.5;
        self.body.vel = polar_to_cartesian(SHOT_SPEED, direction);
        self.body.force = Vec2::ZERO;
        self.active = true;
        self.ttl = SHOT_TTL;
    }

    /// Park the slot back in the pool
    pub fn expire(&mut self) {
        self.active = false;
        self.ttl = 0.0;
        self.body.stop();
        self.body.pos = Vec2::splat(ARROW_PARK);
    }
}

impl Collidable for Shot {
    fn hitbox(&self) -> Rect {
        self.body.bounds()
    }
}
