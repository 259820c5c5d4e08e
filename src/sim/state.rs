//! World state: every entity, counter, and RNG stream a tick touches
//!
//! The whole struct serializes to JSON for saves and replay checks. Scratch
//! data that is rebuilt every tick (the event queue, accumulated forces) is
//! skipped so two snapshots of the same logical state compare equal.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arrow::Crossbow;
use super::enemy::{Enemy, EnemyArchetype, Shot};
use super::pickup::Pickup;
use super::player::Player;
use super::tile::{Door, Tile};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::settings::Difficulty;

/// Things that happened during the latest tick, for presentation layers
/// (sound, screenshake, UI). The sim never reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ArrowFired { id: u32 },
    ArrowStuck { id: u32 },
    ArrowRetrieved { id: u32 },
    EnemyHit { id: u32, damage: i32 },
    EnemyKnockback { id: u32, from: Vec2 },
    EnemyKilled { id: u32 },
    PlayerHurt { damage: i32 },
    PlayerDied,
    Pickup { value: u32 },
    LeveledUp { level: u32 },
    DoorOpened { id: u32 },
    RoomCleared,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Derive a generator on a fresh stream. Every call advances the
    /// stream counter, so a replay that draws at the same points gets
    /// the same values regardless of how many values each site takes.
    pub fn to_rng(&mut self) -> Pcg32 {
        self.stream = self.stream.wrapping_add(1);
        Pcg32::new(self.seed, self.stream)
    }
}

/// XP required to advance from `level` to the next
#[inline]
pub fn xp_to_next(level: u32) -> u32 {
    6 + 4 * level
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Difficulty the run was started with
    pub difficulty: Difficulty,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// The player's weapon and its quiver of pooled arrows
    pub crossbow: Crossbow,
    /// Active enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Fixed pool of enemy projectiles; slots toggle active
    pub shots: Vec<Shot>,
    /// XP orbs on the floor (sorted by id for determinism)
    pub pickups: Vec<Pickup>,
    /// Room geometry
    pub tiles: Vec<Tile>,
    pub doors: Vec<Door>,
    /// Latched when the room empties so doors open exactly once
    pub room_cleared: bool,
    pub xp: u32,
    pub level: u32,
    /// Events from the latest tick (rebuilt each tick, not saved)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl WorldState {
    /// Create a new world with the given seed. The quiver and the shot
    /// pool are filled up front; nothing else is spawned yet.
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        let mut world = Self {
            seed,
            rng_state: RngState::new(seed),
            difficulty,
            time_ticks: 0,
            player: Player::new(Vec2::ZERO),
            crossbow: Crossbow::new(),
            enemies: Vec::new(),
            shots: Vec::new(),
            pickups: Vec::new(),
            tiles: Vec::new(),
            doors: Vec::new(),
            room_cleared: false,
            xp: 0,
            level: 0,
            events: Vec::new(),
            next_id: 1,
        };

        for _ in 0..QUIVER_CAPACITY {
            let id = world.next_entity_id();
            world.crossbow.load_arrow(id);
        }
        for _ in 0..SHOT_POOL {
            let id = world.next_entity_id();
            world.shots.push(Shot::inactive(id));
        }

        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start the run over with the same seed and difficulty
    pub fn reset(&mut self) {
        *self = Self::new(self.seed, self.difficulty);
    }

    /// Swap in a room's geometry and re-arm the player. Enemies, orbs and
    /// projectiles from the previous room are dropped; arrows return to
    /// the quiver.
    pub fn load_room(&mut self, tiles: Vec<Tile>, doors: Vec<Door>, player_center: Vec2) {
        self.tiles = tiles;
        self.doors = doors;
        self.enemies.clear();
        self.pickups.clear();
        for shot in &mut self.shots {
            shot.expire();
        }
        for arrow in &mut self.crossbow.arrows {
            arrow.retrieve();
        }
        self.room_cleared = false;
        self.player.body.pos = player_center - self.player.body.size * 0.5;
        self.player.body.stop();
    }

    /// Spawn an enemy of the given archetype with its hitbox corner at `pos`
    pub fn spawn_enemy(&mut self, archetype: EnemyArchetype, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let mut rng = self.rng_state.to_rng();
        let enemy = Enemy::spawn(id, archetype, pos, self.difficulty, &mut rng);
        self.enemies.push(enemy);
        id
    }

    /// Fire a projectile from the pool. Returns `None` when every slot is
    /// in flight; the shot is simply dropped in that case.
    pub fn spawn_shot(&mut self, from: Vec2, direction: f32) -> Option<u32> {
        let slot = self.shots.iter_mut().find(|s| !s.active)?;
        slot.fire(from, direction);
        Some(slot.id)
    }

    /// Scatter `count` single-value orbs around a point
    pub fn spawn_pickup_burst(&mut self, center: Vec2, count: u32) {
        let mut rng = self.rng_state.to_rng();
        for _ in 0..count {
            let id = self.next_entity_id();
            let mut orb = Pickup::new(id, center, 1);
            let dir = rng.random_range(0.0..std::f32::consts::TAU);
            orb.body.vel = polar_to_cartesian(PICKUP_SCATTER_SPEED, dir);
            self.pickups.push(orb);
        }
    }

    /// Bank XP and roll over any level-ups
    pub fn award_xp(&mut self, value: u32) {
        self.xp += value;
        while self.xp >= xp_to_next(self.level) {
            self.xp -= xp_to_next(self.level);
            self.level += 1;
            self.events.push(GameEvent::LeveledUp { level: self.level });
        }
    }

    /// Ensure entity vectors are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.pickups.sort_by_key(|p| p.id);
    }
}
