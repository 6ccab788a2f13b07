//! Spawn scheduling
//!
//! One scheduler per entity kind. Collectibles arrive on a fixed beat;
//! hazards redraw their interval after every spawn.

use rand::Rng;

use super::clock::Tick;
use super::entity::EntityKind;
use crate::settings::Settings;

/// When the next spawn is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Constant gap between spawns
    Fixed { interval: Tick },
    /// Gap drawn uniformly from an inclusive bound after each spawn
    Variable { min: Tick, max: Tick },
}

impl SpawnPolicy {
    pub fn for_kind(kind: EntityKind, settings: &Settings) -> Self {
        match kind {
            EntityKind::Collectible => SpawnPolicy::Fixed {
                interval: settings.collectible_interval_ticks(),
            },
            EntityKind::Hazard => {
                let (min, max) = settings.hazard_interval_ticks();
                SpawnPolicy::Variable { min, max }
            }
        }
    }

    fn next_interval<R: Rng>(&self, rng: &mut R) -> Tick {
        match *self {
            SpawnPolicy::Fixed { interval } => interval,
            SpawnPolicy::Variable { min, max } if max > min => rng.random_range(min..=max),
            SpawnPolicy::Variable { min, .. } => min,
        }
    }
}

/// Per-kind spawn timer
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    kind: EntityKind,
    policy: SpawnPolicy,
    deadline: Tick,
    last_spawn: Option<Tick>,
}

impl SpawnScheduler {
    /// Fixed schedules wait one full interval after `start`; variable schedules
    /// fire on the first check.
    pub fn new(kind: EntityKind, policy: SpawnPolicy, start: Tick) -> Self {
        let deadline = match policy {
            SpawnPolicy::Fixed { interval } => start + interval,
            SpawnPolicy::Variable { .. } => start,
        };
        Self {
            kind,
            policy,
            deadline,
            last_spawn: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    pub fn deadline(&self) -> Tick {
        self.deadline
    }

    pub fn last_spawn(&self) -> Option<Tick> {
        self.last_spawn
    }

    /// Whether a new entity is due at `now`. A positive answer counts as the
    /// spawn and schedules the next deadline from `now`.
    pub fn should_spawn<R: Rng>(&mut self, now: Tick, rng: &mut R) -> bool {
        if now < self.deadline {
            return false;
        }
        self.last_spawn = Some(now);
        self.deadline = now + self.policy.next_interval(rng);
        true
    }
}
