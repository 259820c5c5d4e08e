//! Fixed timestep simulation tick
//!
//! Core frame loop that advances the world deterministically. Every tick
//! runs the same phase order: timers, input and behavior forces, friction,
//! integration, tile resolution, combat collisions, deferred spawns,
//! pruning, room clear. Forces applied during a tick move bodies on the
//! next integration, so hits land one frame before their shove.

use glam::Vec2;

use super::body::Body;
use super::collision::{Collidable, overlapping, tile_push_out};
use super::enemy::{EnemyLife, HitOutcome};
use super::rect::Rect;
use super::state::{GameEvent, WorldState};
use super::tile::solid_rects;
use crate::consts::*;
use crate::direction_between;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction; any magnitude, normalized internally
    pub move_dir: Vec2,
    /// World-space point the player is aiming at
    pub aim: Vec2,
    /// Fire the crossbow
    pub fire: bool,
    /// Dodge along the movement direction
    pub dodge: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut WorldState, input: &TickInput, dt: f32) {
    world.events.clear();
    world.time_ticks += 1;

    // --- TIMERS ---
    world.player.update_timers(dt);
    world.crossbow.update_cooldown(dt);

    // Positions sampled here feed every decision this tick; bodies only
    // move at the integration phase below.
    let player_center = world.player.body.center();

    // --- PLAYER INPUT ---
    if world.player.alive() {
        world.player.apply_move_input(input.move_dir);
        if input.dodge {
            world.player.try_dodge(input.move_dir);
        }
        if input.fire {
            let dir = direction_between(player_center, input.aim);
            if let Some(id) = world.crossbow.shoot(player_center, dir) {
                world.events.push(GameEvent::ArrowFired { id });
            }
        }
    }
    world.player.body.apply_friction(dt);

    // --- ENEMY BEHAVIOR ---
    let mut shots_to_fire: Vec<(Vec2, f32)> = Vec::new();
    {
        let mut rng = world.rng_state.to_rng();
        for enemy in &mut world.enemies {
            if let Some(shot) = enemy.think(player_center, world.difficulty, dt, &mut rng) {
                shots_to_fire.push(shot);
            }
            enemy.body.apply_friction(dt);
        }
    }

    // --- ARROWS ---
    for arrow in &mut world.crossbow.arrows {
        if arrow.update(player_center, dt) {
            world.events.push(GameEvent::ArrowRetrieved { id: arrow.id });
        }
    }

    // --- PICKUPS ---
    for orb in &mut world.pickups {
        orb.drift(player_center, dt);
    }

    // --- INTEGRATION ---
    world.player.body.integrate(dt);
    for enemy in &mut world.enemies {
        if enemy.is_alive() {
            enemy.body.integrate(dt);
        }
    }
    for arrow in &mut world.crossbow.arrows {
        if arrow.active() {
            arrow.body.integrate(dt);
        }
    }
    for orb in &mut world.pickups {
        orb.body.integrate(dt);
    }
    for shot in &mut world.shots {
        if !shot.active {
            continue;
        }
        shot.ttl -= dt;
        if shot.ttl <= 0.0 {
            shot.expire();
        } else {
            shot.body.integrate(dt);
        }
    }

    // --- TILE RESOLUTION ---
    let obstacles: Vec<Rect> = solid_rects(&world.tiles, &world.doors).collect();

    resolve_against_tiles(&mut world.player.body, &obstacles);
    for enemy in &mut world.enemies {
        if enemy.is_alive() {
            resolve_against_tiles(&mut enemy.body, &obstacles);
        }
    }
    for orb in &mut world.pickups {
        resolve_against_tiles(&mut orb.body, &obstacles);
    }

    // Arrows lodge into walls instead of being pushed out
    for arrow in &mut world.crossbow.arrows {
        if !arrow.in_air() {
            continue;
        }
        let tip = arrow.tip();
        if obstacles.iter().any(|r| r.contains(tip)) {
            arrow.hit_something();
            world.events.push(GameEvent::ArrowStuck { id: arrow.id });
        }
    }

    // Enemy shots just vanish on walls
    for shot in &mut world.shots {
        if shot.active && obstacles.iter().any(|r| r.overlaps(&shot.body.bounds())) {
            shot.expire();
        }
    }

    // --- COMBAT ---
    // Arrow tip vs enemies: damage, then the arrow is spent and lodges
    for arrow in &mut world.crossbow.arrows {
        if !arrow.in_air() {
            continue;
        }
        let tip = arrow.tip();
        for enemy in &mut world.enemies {
            if !enemy.is_alive() || !enemy.hitbox().contains(tip) {
                continue;
            }
            world.events.push(GameEvent::EnemyHit {
                id: enemy.id,
                damage: ARROW_DAMAGE,
            });
            match enemy.take_damage(ARROW_DAMAGE, tip) {
                HitOutcome::Killed => {
                    world.events.push(GameEvent::EnemyKilled { id: enemy.id });
                }
                HitOutcome::Hurt { knocked_back: true } => {
                    world.events.push(GameEvent::EnemyKnockback {
                        id: enemy.id,
                        from: tip,
                    });
                }
                _ => {}
            }
            arrow.hit_something();
            world.events.push(GameEvent::ArrowStuck { id: arrow.id });
            break;
        }
    }

    // Enemy shots vs the player
    for shot in &mut world.shots {
        if !shot.active || !overlapping(shot, &world.player) {
            continue;
        }
        let from = shot.body.center();
        shot.expire();
        if world.player.take_damage(SHOT_DAMAGE, from) {
            world.events.push(GameEvent::PlayerHurt {
                damage: SHOT_DAMAGE,
            });
            if !world.player.alive() {
                world.events.push(GameEvent::PlayerDied);
            }
        }
    }

    // Enemy contact vs the player
    for enemy in &world.enemies {
        if !enemy.is_alive() || !overlapping(enemy, &world.player) {
            continue;
        }
        let from = enemy.body.center();
        if world.player.take_damage(ENEMY_CONTACT_DAMAGE, from) {
            world.events.push(GameEvent::PlayerHurt {
                damage: ENEMY_CONTACT_DAMAGE,
            });
            if !world.player.alive() {
                world.events.push(GameEvent::PlayerDied);
            }
        }
    }

    // Walking over a grounded arrow takes it back
    for arrow in &mut world.crossbow.arrows {
        if arrow.grounded() && overlapping(arrow, &world.player) {
            arrow.retrieve();
            world.events.push(GameEvent::ArrowRetrieved { id: arrow.id });
        }
    }

    // Orb collection
    let mut collected_xp = 0;
    world.pickups.retain(|orb| {
        if overlapping(orb, &world.player) {
            world.events.push(GameEvent::Pickup { value: orb.value });
            collected_xp += orb.value;
            false
        } else {
            true
        }
    });
    if collected_xp > 0 {
        world.award_xp(collected_xp);
    }

    // --- DEFERRED SPAWNS ---
    for (from, dir) in shots_to_fire {
        world.spawn_shot(from, dir);
    }

    // --- DYING AND REMOVAL ---
    for enemy in &mut world.enemies {
        enemy.advance_life(dt);
    }
    let mut orb_bursts: Vec<(Vec2, u32)> = Vec::new();
    world.enemies.retain(|enemy| {
        if enemy.life == EnemyLife::Dead {
            orb_bursts.push((enemy.body.center(), enemy.orb_reward()));
            false
        } else {
            true
        }
    });
    for (center, count) in orb_bursts {
        world.spawn_pickup_burst(center, count);
    }

    // --- ROOM CLEAR ---
    if !world.room_cleared && world.enemies.is_empty() {
        world.room_cleared = true;
        world.events.push(GameEvent::RoomCleared);
        for door in &mut world.doors {
            if !door.open {
                door.open = true;
                world.events.push(GameEvent::DoorOpened { id: door.id });
            }
        }
    }

    world.normalize_order();
}

/// Push a body out of every obstacle it overlaps, one pass
fn resolve_against_tiles(body: &mut Body, obstacles: &[Rect]) {
    for rect in obstacles {
        if let Some(push) = tile_push_out(body.bounds(), *rect, &mut body.tie_flip) {
            body.pos += push;
        }
    }
}
