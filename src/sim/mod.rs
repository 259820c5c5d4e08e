//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod arrow;
pub mod body;
pub mod collision;
pub mod enemy;
pub mod pickup;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tile;

pub use arrow::{Arrow, ArrowState, Crossbow};
pub use body::Body;
pub use collision::{Collidable, overlapping, tile_push_out};
pub use enemy::{Enemy, EnemyArchetype, EnemyKind, EnemyLife, HitOutcome, HopPhase, Shot, hop_phase};
pub use pickup::Pickup;
pub use player::Player;
pub use rect::Rect;
pub use state::{GameEvent, RngState, WorldState, xp_to_next};
pub use tick::{TickInput, tick};
pub use tile::{Door, Tile, solid_rects};
