//! Arrow lifecycle and the crossbow that fires it
//!
//! One retrievable arrow loops through: loaded in the quiver, in flight,
//! stuck wherever it landed, pulled back toward the player, retrieved.
//! Arrows are pooled: retrieval parks them off-world instead of dropping
//! them, and firing reactivates a parked slot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::Collidable;
use super::rect::Rect;
use crate::consts::*;
use crate::{direction_between, polar_to_cartesian};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArrowState {
    /// In the quiver, parked off-world, ready to fire
    Loaded,
    /// Moving under its launch velocity; hitbox is the tip point
    InFlight,
    /// Grounded after an impact; the despawn countdown runs
    Stuck { countdown: f32 },
    /// Pulled toward the player until contact or countdown expiry
    Returning { countdown: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub id: u32,
    pub body: Body,
    /// Flight heading (radians). Kept after impact so the shaft keeps
    /// pointing the way it flew even while the body recoils backward.
    pub direction: f32,
    pub state: ArrowState,
}

impl Arrow {
    pub fn new(id: u32) -> Self {
        let mut body = Body::new(Vec2::splat(ARROW_PARK), Vec2::splat(ARROW_SIZE));
        body.friction = 0.0;
        Self {
            id,
            body,
            direction: 0.0,
            state: ArrowState::Loaded,
        }
    }

    /// Pooling flag: loaded arrows are not world entities
    #[inline]
    pub fn active(&self) -> bool {
        !matches!(self.state, ArrowState::Loaded)
    }

    #[inline]
    pub fn in_air(&self) -> bool {
        matches!(self.state, ArrowState::InFlight)
    }

    /// Grounded arrows can be picked back up by walking over them
    #[inline]
    pub fn grounded(&self) -> bool {
        matches!(
            self.state,
            ArrowState::Stuck { .. } | ArrowState::Returning { .. }
        )
    }

    /// Presentation flag: countdown has entered its final window
    pub fn flashing(&self) -> bool {
        match self.state {
            ArrowState::Stuck { countdown } | ArrowState::Returning { countdown } => {
                countdown <= ARROW_FLASH_WINDOW
            }
            _ => false,
        }
    }

    /// Tip position, ahead of the shaft center along the flight heading
    pub fn tip(&self) -> Vec2 {
        self.body.center() + polar_to_cartesian(ARROW_TIP_OFFSET, self.direction)
    }

    /// Fire from a muzzle point with a fixed speed along `direction`
    pub fn launch(&mut self, muzzle: Vec2, direction: f32) {
        self.direction = direction;
        self.body.pos = muzzle - self.body.size * 0.5;
        self.body.vel = polar_to_cartesian(ARROW_SPEED, direction);
        self.body.force = Vec2::ZERO;
        self.body.friction = 0.0;
        self.body.max_speed = None;
        self.state = ArrowState::InFlight;
    }

    /// Impact reaction: invert velocity and spike friction for the abrupt
    /// stop, then start the despawn countdown. Ignored unless in flight.
    pub fn hit_something(&mut self) {
        if !self.in_air() {
            return;
        }
        self.body.vel = -self.body.vel;
        self.body.friction = ARROW_STUCK_FRICTION;
        self.state = ArrowState::Stuck {
            countdown: ARROW_DESPAWN_TIME,
        };
    }

    /// Back to the quiver: park off-world, clear the countdown
    pub fn retrieve(&mut self) {
        self.state = ArrowState::Loaded;
        self.body.stop();
        self.body.friction = 0.0;
        self.body.max_speed = None;
        self.body.pos = Vec2::splat(ARROW_PARK);
    }

    /// Per-frame state advance during the force phase. Returns true when
    /// the countdown force-retrieved the arrow this tick.
    pub fn update(&mut self, player_center: Vec2, dt: f32) -> bool {
        match self.state {
            ArrowState::Stuck { countdown } => {
                let countdown = countdown - dt;
                if countdown <= 0.0 {
                    // Unreachable arrows must still come home
                    self.retrieve();
                    return true;
                }
                self.body.apply_friction(dt);
                let near_player =
                    self.body.center().distance(player_center) <= ARROW_PULL_RADIUS;
                if countdown <= ARROW_FLASH_WINDOW || near_player {
                    self.body.friction = 0.0;
                    self.body.max_speed = Some(ARROW_RETURN_MAX_SPEED);
                    self.state = ArrowState::Returning { countdown };
                } else {
                    self.state = ArrowState::Stuck { countdown };
                }
            }
            ArrowState::Returning { countdown } => {
                let countdown = countdown - dt;
                if countdown <= 0.0 {
                    self.retrieve();
                    return true;
                }
                let pull = direction_between(self.body.center(), player_center);
                self.body.apply_force(pull, ARROW_PULL_FORCE);
                self.state = ArrowState::Returning { countdown };
            }
            ArrowState::Loaded | ArrowState::InFlight => {}
        }
        false
    }
}

impl Collidable for Arrow {
    /// In flight the hitbox is a zero-size point at the tip; grounded it is
    /// a small box centered on the shaft.
    fn hitbox(&self) -> Rect {
        if self.in_air() {
            Rect::point(self.tip())
        } else {
            Rect::from_center(self.body.center(), Vec2::splat(ARROW_SIZE))
        }
    }
}

/// The player's crossbow: cooldown plus a fixed-capacity quiver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crossbow {
    /// Remaining cooldown since the last shot
    pub cooldown: f32,
    /// Arrow pool; slots are reused, never dropped
    pub arrows: Vec<Arrow>,
}

impl Crossbow {
    pub fn new() -> Self {
        Self {
            cooldown: 0.0,
            arrows: Vec::with_capacity(QUIVER_CAPACITY),
        }
    }

    /// Add a pooled arrow slot (called once per quiver slot at world setup)
    pub fn load_arrow(&mut self, id: u32) {
        self.arrows.push(Arrow::new(id));
    }

    pub fn update_cooldown(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Fire toward `direction` from the wielder's center.
    ///
    /// Silent no-op while cooling down or when no loaded arrow is in the
    /// quiver; returns the fired arrow's id otherwise.
    pub fn shoot(&mut self, from: Vec2, direction: f32) -> Option<u32> {
        if self.cooldown > 0.0 {
            return None;
        }
        let arrow = self
            .arrows
            .iter_mut()
            .find(|a| matches!(a.state, ArrowState::Loaded))?;
        let muzzle = from + polar_to_cartesian(CROSSBOW_OFFSET, direction);
        arrow.launch(muzzle, direction);
        self.cooldown = CROSSBOW_COOLDOWN;
        Some(arrow.id)
    }
}

impl Default for Crossbow {
    fn default() -> Self {
        Self::new()
    }
}
