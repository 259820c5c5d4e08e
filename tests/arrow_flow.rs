//! Arrow lifecycle through the public API: fire, lodge, recall, reload

use glam::Vec2;

use quarrel::consts::*;
use quarrel::settings::Difficulty;
use quarrel::sim::{ArrowState, GameEvent, Rect, Tile, TickInput, WorldState, tick};

fn open_field(seed: u64) -> WorldState {
    let mut world = WorldState::new(seed, Difficulty::Normal);
    world.load_room(Vec::new(), Vec::new(), Vec2::new(400.0, 300.0));
    world
}

fn fire_east() -> TickInput {
    TickInput {
        aim: Vec2::new(600.0, 300.0),
        fire: true,
        ..Default::default()
    }
}

#[test]
fn test_wall_stick_then_walkup_recall() {
    let mut world = open_field(11);
    world.tiles = vec![
        Tile::new(Rect::new(600.0, 256.0, TILE_SIZE, TILE_SIZE)),
        Tile::new(Rect::new(600.0, 320.0, TILE_SIZE, TILE_SIZE)),
    ];
    let arrow_id = world.crossbow.arrows[0].id;

    tick(&mut world, &fire_east(), SIM_DT);
    assert!(world.crossbow.arrows[0].in_air());

    // Fly until it lodges in the wall
    let mut lodged = false;
    for _ in 0..60 {
        tick(&mut world, &TickInput::default(), SIM_DT);
        if world.events.contains(&GameEvent::ArrowStuck { id: arrow_id }) {
            lodged = true;
            break;
        }
    }
    assert!(lodged);
    assert!(matches!(
        world.crossbow.arrows[0].state,
        ArrowState::Stuck { .. }
    ));

    // Walking toward it flips the arrow into its return flight, and the
    // catch reloads the quiver
    let walk = TickInput {
        move_dir: Vec2::new(1.0, 0.0),
        ..Default::default()
    };
    let mut retrieved = false;
    for _ in 0..600 {
        tick(&mut world, &walk, SIM_DT);
        if world
            .events
            .contains(&GameEvent::ArrowRetrieved { id: arrow_id })
        {
            retrieved = true;
            break;
        }
    }
    assert!(retrieved);
    assert!(matches!(world.crossbow.arrows[0].state, ArrowState::Loaded));
}

#[test]
fn test_final_window_recalls_from_across_the_room() {
    let mut world = open_field(12);
    world.tiles = vec![
        Tile::new(Rect::new(600.0, 256.0, TILE_SIZE, TILE_SIZE)),
        Tile::new(Rect::new(600.0, 320.0, TILE_SIZE, TILE_SIZE)),
    ];
    let arrow_id = world.crossbow.arrows[0].id;

    tick(&mut world, &fire_east(), SIM_DT);
    for _ in 0..60 {
        tick(&mut world, &TickInput::default(), SIM_DT);
        if world.crossbow.arrows[0].grounded() {
            break;
        }
    }
    assert!(matches!(
        world.crossbow.arrows[0].state,
        ArrowState::Stuck { .. }
    ));

    // Age the countdown to the edge of the warning window. The player
    // stays put, far outside pull range, yet the arrow comes home.
    world.crossbow.arrows[0].state = ArrowState::Stuck {
        countdown: ARROW_FLASH_WINDOW + 0.01,
    };
    tick(&mut world, &TickInput::default(), SIM_DT);
    tick(&mut world, &TickInput::default(), SIM_DT);
    assert!(world.crossbow.arrows[0].flashing());
    assert!(matches!(
        world.crossbow.arrows[0].state,
        ArrowState::Returning { .. }
    ));

    let mut retrieved = false;
    for _ in 0..120 {
        tick(&mut world, &TickInput::default(), SIM_DT);
        if world
            .events
            .contains(&GameEvent::ArrowRetrieved { id: arrow_id })
        {
            retrieved = true;
            break;
        }
    }
    assert!(retrieved);
    assert_eq!(world.player.body.center(), Vec2::new(400.0, 300.0));
}

#[test]
fn test_single_arrow_quiver_cannot_double_fire() {
    let mut world = open_field(13);
    let arrow_id = world.crossbow.arrows[0].id;

    tick(&mut world, &fire_east(), SIM_DT);
    assert!(world.events.contains(&GameEvent::ArrowFired { id: arrow_id }));

    // Quiver is empty while the arrow is out
    tick(&mut world, &fire_east(), SIM_DT);
    assert!(!world.events.contains(&GameEvent::ArrowFired { id: arrow_id }));
    assert!(world.crossbow.arrows.iter().all(|a| a.active()));
}
