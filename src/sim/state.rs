//! World state
//!
//! A world owns everything that advances on a tick: the player, the live
//! entities, the spawn schedulers, the score and the terminal flag.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Tick;
use super::entity::{Entity, EntityKind, KindTable, spawn_location};
use super::player::Player;
use super::spawn::{SpawnPolicy, SpawnScheduler};
use crate::settings::Settings;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Player left the ground
    Jumped,
    Spawned { id: u32, kind: EntityKind },
    /// Collectible picked up
    Collected { id: u32, score: i64 },
    /// Hazard hit the player
    Struck { id: u32, score: i64 },
    /// Left the playfield without touching the player
    Culled { id: u32 },
    /// Dropped because its state went bad (non-finite position)
    Faulted { id: u32 },
    /// Run over
    Lost { score: i64 },
}

/// Two backdrop tiles scrolling left and wrapping around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    pub offsets: [f32; 2],
    pub width: f32,
    pub speed: f32,
}

impl Backdrop {
    pub fn new(width: f32, speed: f32) -> Self {
        Self {
            offsets: [0.0, width],
            width,
            speed,
        }
    }

    pub fn advance(&mut self) {
        for offset in &mut self.offsets {
            *offset -= self.speed;
            if *offset < -self.width {
                *offset = self.width;
            }
        }
    }
}

/// A named world
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) name: String,
    pub(crate) settings: Settings,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) kinds: KindTable,
    pub(crate) schedulers: Vec<SpawnScheduler>,
    /// Live entities, never containing the player
    pub(crate) entities: Vec<Entity>,
    pub(crate) player: Option<Player>,
    pub(crate) score: i64,
    /// Terminal flag: set on loss, never cleared
    pub(crate) paused: bool,
    pub(crate) backdrop: Backdrop,
    pub(crate) last_tick: Tick,
    next_id: u32,
}

impl World {
    /// Create a world whose schedulers start counting at `start`
    pub fn new(name: impl Into<String>, settings: &Settings, seed: u64, start: Tick) -> Self {
        let schedulers = EntityKind::ALL
            .iter()
            .map(|&kind| SpawnScheduler::new(kind, SpawnPolicy::for_kind(kind, settings), start))
            .collect();

        Self {
            name: name.into(),
            settings: settings.clone(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            kinds: KindTable::new(settings),
            schedulers,
            entities: Vec::new(),
            player: None,
            score: 0,
            paused: false,
            backdrop: Backdrop::new(settings.backdrop_width(), settings.backdrop_speed),
            last_tick: start,
            next_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Terminal "lost" state (the simulation is frozen)
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Tick of the last update that ran
    pub fn last_tick(&self) -> Tick {
        self.last_tick
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn schedulers(&self) -> &[SpawnScheduler] {
        &self.schedulers
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Make `player` this world's collision target, replacing any previous one
    pub fn bind_player(&mut self, player: Player) {
        self.player = Some(player);
    }

    /// Remove the player (used when re-parenting to another world)
    pub fn take_player(&mut self) -> Option<Player> {
        self.player.take()
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Instantiate an entity of `kind` at its spawn point
    pub fn spawn(&mut self, kind: EntityKind) -> u32 {
        let id = self.next_entity_id();
        let profile = *self.kinds.get(kind);
        let location = spawn_location(
            &profile,
            self.settings.playfield_width,
            self.settings.ground_y(),
            &mut self.rng,
        );
        let speed = profile.speed.draw(&mut self.rng);
        self.entities.push(Entity::new(id, &profile, location, speed));
        log::debug!(
            "{}: spawned {} #{} at ({}, {}) speed {}",
            self.name,
            kind.as_str(),
            id,
            location.x,
            location.y,
            speed
        );
        id
    }

    /// Oscillator phase for `now`: whole bob steps of simulated time
    pub(crate) fn bob_phase(&self, now: Tick) -> f32 {
        (self.settings.millis_at(now) / self.settings.bob_step_ms.max(1)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world() {
        let world = World::new("Forest", &Settings::default(), 1, 0);
        assert_eq!(world.name(), "Forest");
        assert_eq!(world.score(), 0);
        assert!(!world.is_paused());
        assert!(world.entities().is_empty());
        assert!(world.player().is_none());
        assert_eq!(world.schedulers().len(), 2);
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut world = World::new("Forest", &Settings::default(), 1, 0);
        let a = world.spawn(EntityKind::Collectible);
        let b = world.spawn(EntityKind::Hazard);
        assert_ne!(a, b);
        assert_eq!(world.entities().len(), 2);
        assert!(world.entities().iter().all(|e| e.location.x == 1120.0));
        assert_eq!(world.entities()[0].movement_speed, 7.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let settings = Settings::default();
        let mut a = World::new("A", &settings, 99, 0);
        let mut b = World::new("B", &settings, 99, 0);
        for _ in 0..10 {
            a.spawn(EntityKind::Hazard);
            b.spawn(EntityKind::Hazard);
        }
        for (x, y) in a.entities().iter().zip(b.entities()) {
            assert_eq!(x.location, y.location);
            assert_eq!(x.movement_speed, y.movement_speed);
        }
    }

    #[test]
    fn test_backdrop_wraps() {
        let mut backdrop = Backdrop::new(100.0, 5.0);
        for _ in 0..20 {
            backdrop.advance();
        }
        assert_eq!(backdrop.offsets, [-100.0, 0.0]);
        backdrop.advance();
        assert_eq!(backdrop.offsets, [100.0, -5.0]);
    }

    #[test]
    fn test_bob_phase_steps() {
        let world = World::new("Forest", &Settings::default(), 1, 0);
        // 40ms per tick, 200ms per step
        assert_eq!(world.bob_phase(4), 0.0);
        assert_eq!(world.bob_phase(5), 1.0);
        assert_eq!(world.bob_phase(26), 5.0);
    }
}
