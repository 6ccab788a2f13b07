//! Fixed timestep simulation tick
//!
//! Advances one world by exactly one step. Within a step the order is fixed:
//! input, backdrop, spawns, player motion, entity updates.

use super::clock::Tick;
use super::entity::EntityKind;
use super::state::{World, WorldEvent};
use crate::gesture::JumpEvent;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump request, from the gesture bridge or any other source
    pub jump: Option<JumpEvent>,
    /// Horizontal move direction (-1 left, 1 right, 0 none)
    pub horizontal: f32,
}

/// Advance the world by one fixed step at tick `now`
pub fn tick(world: &mut World, input: &TickInput, now: Tick) -> Vec<WorldEvent> {
    let mut events = Vec::new();

    // Frozen for good once the run is lost
    if world.paused {
        return events;
    }
    world.last_tick = now;

    if let Some(player) = world.player.as_mut() {
        // Mid-air requests are dropped without an event
        if let Some(jump) = input.jump {
            if player.jump(jump) {
                events.push(WorldEvent::Jumped);
            }
        }
        if input.horizontal != 0.0 {
            player.move_horizontal(input.horizontal);
        }
    }

    world.backdrop.advance();

    // Spawns before entity updates: a new entity moves on its first tick
    let mut due = Vec::new();
    for scheduler in &mut world.schedulers {
        if scheduler.should_spawn(now, &mut world.rng) {
            due.push(scheduler.kind());
        }
    }
    for kind in due {
        let id = world.spawn(kind);
        events.push(WorldEvent::Spawned { id, kind });
    }

    if let Some(player) = world.player.as_mut() {
        player.step();
    }

    update_entities(world, now, &mut events);

    events
}

/// Move, collide and cull every live entity. Entities are only marked dead
/// during the pass; the collection is compacted afterwards.
fn update_entities(world: &mut World, now: Tick, events: &mut Vec<WorldEvent>) {
    let phase = world.bob_phase(now);

    for entity in world.entities.iter_mut() {
        // A loss freezes whatever has not moved yet this tick
        if world.paused {
            break;
        }
        if !entity.alive {
            continue;
        }

        let profile = world.kinds.get(entity.kind);
        entity.advance(profile.oscillation, phase);

        if !entity.is_finite() {
            log::warn!(
                "{}: {} #{} has a non-finite position, dropping it",
                world.name,
                entity.kind.as_str(),
                entity.id
            );
            entity.alive = false;
            events.push(WorldEvent::Faulted { id: entity.id });
            continue;
        }

        // No player bound yet: nothing to collide with
        let hit = world
            .player
            .as_ref()
            .is_some_and(|player| player.is_colliding(entity.location));

        if hit {
            entity.alive = false;
            world.score += profile.outcome.score_delta;
            log::debug!(
                "{}: {} #{} hit the player, score {}",
                world.name,
                entity.kind.as_str(),
                entity.id,
                world.score
            );
            events.push(match entity.kind {
                EntityKind::Collectible => WorldEvent::Collected {
                    id: entity.id,
                    score: world.score,
                },
                EntityKind::Hazard => WorldEvent::Struck {
                    id: entity.id,
                    score: world.score,
                },
            });

            if profile.outcome.ends_run_below_zero && world.score < 0 {
                world.paused = true;
                log::info!("{}: run lost with score {}", world.name, world.score);
                events.push(WorldEvent::Lost { score: world.score });
            }
            continue;
        }

        if entity.is_offscreen() {
            entity.alive = false;
            events.push(WorldEvent::Culled { id: entity.id });
        }
    }

    world.entities.retain(|e| e.alive);
}
