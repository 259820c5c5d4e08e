//! Quarrel - physics and collision core for a 2D crossbow action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics bodies, collision resolution,
//!   arrow/enemy state machines, per-frame tick)
//! - `settings`: Difficulty and gameplay preferences
//!
//! Rendering, audio, menus and level loading are external collaborators:
//! they feed the sim a tile list, an input snapshot and elapsed time, and
//! consume entity state plus the per-frame event queue.

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tile grid size in world units
    pub const TILE_SIZE: f32 = 64.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_MOVE_FORCE: f32 = 2400.0;
    pub const PLAYER_FRICTION: f32 = 1400.0;
    pub const PLAYER_MAX_SPEED: f32 = 260.0;
    pub const PLAYER_MAX_HEALTH: i32 = 5;
    /// Invulnerability window after taking a hit (seconds)
    pub const PLAYER_HURT_INVULN: f32 = 1.0;
    pub const PLAYER_KNOCKBACK_FORCE: f32 = 18_000.0;
    pub const PLAYER_DODGE_IMPULSE: f32 = 26_000.0;
    pub const PLAYER_DODGE_COOLDOWN: f32 = 0.8;
    pub const PLAYER_DODGE_INVULN: f32 = 0.25;

    /// Crossbow defaults
    pub const CROSSBOW_COOLDOWN: f32 = 0.45;
    /// Arrow spawn offset from the player center, along the aim direction
    pub const CROSSBOW_OFFSET: f32 = 20.0;
    pub const QUIVER_CAPACITY: usize = 1;

    /// Arrow defaults
    pub const ARROW_SPEED: f32 = 760.0;
    /// Shaft hitbox edge length once the arrow is grounded
    pub const ARROW_SIZE: f32 = 12.0;
    /// Tip distance from the shaft center while in flight
    pub const ARROW_TIP_OFFSET: f32 = 10.0;
    /// Friction spike applied on impact for the abrupt stop
    pub const ARROW_STUCK_FRICTION: f32 = 6400.0;
    /// Seconds a stuck arrow waits before forcing its way home
    pub const ARROW_DESPAWN_TIME: f32 = 30.0;
    /// Final countdown window: the arrow flashes and starts returning
    pub const ARROW_FLASH_WINDOW: f32 = 2.5;
    /// Player proximity that starts the return pull early
    pub const ARROW_PULL_RADIUS: f32 = 90.0;
    pub const ARROW_PULL_FORCE: f32 = 2600.0;
    pub const ARROW_RETURN_MAX_SPEED: f32 = 640.0;
    /// Off-world parking coordinate for inactive pooled projectiles
    pub const ARROW_PARK: f32 = -4096.0;
    pub const ARROW_DAMAGE: i32 = 1;

    /// Enemy defaults
    pub const ENEMY_CONTACT_DAMAGE: i32 = 1;
    pub const KNOCKBACK_FORCE: f32 = 30_000.0;
    /// Seconds an enemy ignores its own movement policy after a knockback
    pub const KNOCKBACK_RECOVERY: f32 = 0.35;
    /// Duration of the hurt flash flag (presentation reads it, sim owns it)
    pub const HURT_FLASH_TIME: f32 = 0.2;
    pub const ENEMY_DYING_TIME: f32 = 0.4;
    /// Chase cutoff distance so chargers never jitter on top of the player
    pub const CHASE_EPSILON: f32 = 2.0;

    pub const CHARGER_SIZE: f32 = 36.0;
    pub const CHARGER_FORCE: f32 = 900.0;
    pub const CHARGER_FRICTION: f32 = 600.0;
    pub const CHARGER_MAX_SPEED: f32 = 150.0;
    pub const CHARGER_PROVOKE_RADIUS: f32 = 240.0;
    /// Permanent provoke radius gain per knockback (escalating variant)
    pub const CHARGER_PROVOKE_GROWTH: f32 = 40.0;

    pub const SHOOTER_SIZE: f32 = 40.0;
    pub const SHOT_SPEED: f32 = 330.0;
    pub const SHOT_TTL: f32 = 3.0;
    pub const SHOT_SIZE: f32 = 10.0;
    pub const SHOT_DAMAGE: i32 = 1;
    /// Fixed shot pool capacity shared by all shooters in a room
    pub const SHOT_POOL: usize = 16;

    pub const HOPPER_SIZE: f32 = 28.0;
    pub const HOPPER_IMPULSE: f32 = 21_000.0;
    pub const HOPPER_FRICTION: f32 = 520.0;
    pub const HOPPER_MAX_SPEED: f32 = 330.0;
    /// Hop animation phase durations (seconds since cycle start)
    pub const HOP_ANTICIPATE: f32 = 0.25;
    pub const HOP_JUMP: f32 = 0.22;
    pub const HOP_FALL: f32 = 0.22;
    pub const HOP_LAND: f32 = 0.15;

    /// Experience orb defaults
    pub const PICKUP_SIZE: f32 = 10.0;
    pub const PICKUP_ATTRACT_RADIUS: f32 = 110.0;
    pub const PICKUP_ATTRACT_FORCE: f32 = 2600.0;
    pub const PICKUP_FRICTION: f32 = 300.0;
    pub const PICKUP_MAX_SPEED: f32 = 240.0;
    /// Initial scatter speed when a dying enemy releases orbs
    pub const PICKUP_SCATTER_SPEED: f32 = 120.0;
}

/// Angle (radians) of the vector from `from` to `to`.
///
/// Coincident points resolve to 0, never NaN. `atan2` on two negative
/// zeros would otherwise yield ±π.
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    if d.x == 0.0 && d.y == 0.0 {
        return 0.0;
    }
    d.y.atan2(d.x)
}

/// Angle (radians) of a vector; the zero vector resolves to 0.
#[inline]
pub fn vec_direction(v: Vec2) -> f32 {
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    v.y.atan2(v.x)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
