//! Quarrel entry point
//!
//! Headless demo: builds a bordered arena, drives the simulation with a
//! small scripted bot, and prints a run summary as JSON. The same seed is
//! run twice and the final snapshots compared, so a broken determinism
//! guarantee shows up right in the console.

use std::path::Path;

use glam::Vec2;
use serde::Serialize;

use quarrel::consts::*;
use quarrel::settings::{Difficulty, Settings};
use quarrel::sim::{
    Door, EnemyArchetype, GameEvent, Rect, Tile, TickInput, WorldState, tick,
};

/// Fixed timestep driver: wall-clock frames in, whole ticks out
struct Driver {
    world: WorldState,
    accumulator: f32,
    input: TickInput,
}

impl Driver {
    fn new(world: WorldState) -> Self {
        Self {
            world,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Feed one frame of elapsed time through the accumulator
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.world, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.dodge = false;
        }
    }
}

/// What a demo run ends with
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    difficulty: Difficulty,
    frames: u64,
    ticks: u64,
    xp: u32,
    level: u32,
    player_health: i32,
    enemies_left: usize,
    room_cleared: bool,
}

/// A bordered arena with one closed doorway on the east wall and one
/// enemy of each archetype in the corners.
fn build_demo_room(world: &mut WorldState) {
    let cols = 13;
    let rows = 10;
    let mut tiles = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let edge = row == 0 || row == rows - 1 || col == 0 || col == cols - 1;
            if !edge {
                continue;
            }
            // The doorway tile stays open; the door rect covers it
            if col == cols - 1 && row == rows / 2 {
                continue;
            }
            tiles.push(Tile::new(Rect::new(
                col as f32 * TILE_SIZE,
                row as f32 * TILE_SIZE,
                TILE_SIZE,
                TILE_SIZE,
            )));
        }
    }

    let door_id = world.next_entity_id();
    let doors = vec![Door::closed(
        door_id,
        Rect::new(
            (cols - 1) as f32 * TILE_SIZE,
            (rows / 2) as f32 * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        ),
    )];

    let center = Vec2::new(
        cols as f32 * TILE_SIZE * 0.5,
        rows as f32 * TILE_SIZE * 0.5,
    );
    world.load_room(tiles, doors, center);

    world.spawn_enemy(EnemyArchetype::Charger, Vec2::new(2.0, 2.0) * TILE_SIZE);
    world.spawn_enemy(EnemyArchetype::Berserker, Vec2::new(10.0, 2.0) * TILE_SIZE);
    world.spawn_enemy(EnemyArchetype::Shooter, Vec2::new(10.0, 7.0) * TILE_SIZE);
    world.spawn_enemy(EnemyArchetype::Hopper, Vec2::new(2.0, 7.0) * TILE_SIZE);
}

/// Tiny bot: circle the room, aim at the nearest living enemy, fire
/// whenever the quiver holds an arrow, dodge on a slow clock.
fn script_input(world: &WorldState, frame: u64) -> TickInput {
    let center = world.player.body.center();
    let aim = world
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .min_by(|a, b| {
            let da = a.body.center().distance(center);
            let db = b.body.center().distance(center);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.body.center())
        .unwrap_or(center + Vec2::X);

    let move_dir = match (frame / 40) % 4 {
        0 => Vec2::new(1.0, 0.0),
        1 => Vec2::new(0.0, 1.0),
        2 => Vec2::new(-1.0, 0.0),
        _ => Vec2::new(0.0, -1.0),
    };

    TickInput {
        move_dir,
        aim,
        fire: world.crossbow.arrows.iter().any(|a| !a.active()),
        dodge: frame > 0 && frame % 180 == 0,
    }
}

fn log_events(world: &WorldState) {
    for event in &world.events {
        match event {
            GameEvent::RoomCleared => log::info!("room cleared after {} ticks", world.time_ticks),
            GameEvent::DoorOpened { id } => log::info!("door {id} opened"),
            GameEvent::LeveledUp { level } => log::info!("level up -> {level}"),
            GameEvent::PlayerDied => log::warn!("player died"),
            _ => log::debug!("{event:?}"),
        }
    }
}

/// Run the scripted demo to completion; returns the summary plus a final
/// world snapshot for the replay comparison.
fn run_demo(seed: u64, difficulty: Difficulty) -> (RunSummary, String) {
    let mut driver = Driver::new(WorldState::new(seed, difficulty));
    build_demo_room(&mut driver.world);

    let max_frames = 60 * 60;
    let mut frames = 0u64;
    while frames < max_frames {
        driver.input = script_input(&driver.world, frames);
        driver.update(SIM_DT);
        log_events(&driver.world);
        frames += 1;

        let done = driver.world.room_cleared && driver.world.pickups.is_empty();
        if done || !driver.world.player.alive() {
            break;
        }
    }

    let snapshot = match serde_json::to_string(&driver.world) {
        Ok(json) => json,
        Err(err) => {
            log::error!("snapshot serialization failed: {err}");
            String::new()
        }
    };

    let world = &driver.world;
    let summary = RunSummary {
        seed,
        difficulty,
        frames,
        ticks: world.time_ticks,
        xp: world.xp,
        level: world.level,
        player_health: world.player.health,
        enemies_left: world.enemies.len(),
        room_cleared: world.room_cleared,
    };
    (summary, snapshot)
}

fn main() {
    env_logger::init();
    log::info!("Quarrel (headless) starting...");

    let settings = Settings::load(Path::new("quarrel.json"));
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .or(settings.seed_override)
        .unwrap_or(0xC0FFEE);
    log::info!(
        "seed {} on {} difficulty",
        seed,
        settings.difficulty.as_str()
    );

    let (summary, first_snapshot) = run_demo(seed, settings.difficulty);
    let (_, second_snapshot) = run_demo(seed, settings.difficulty);
    if first_snapshot == second_snapshot {
        log::info!("replay check passed: snapshots match");
    } else {
        log::error!("replay check FAILED: same seed produced different worlds");
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("summary serialization failed: {err}"),
    }
}
