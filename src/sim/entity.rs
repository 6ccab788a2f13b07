//! Scrolling entities
//!
//! Collectibles and hazards share one entity type. Everything that differs
//! between the two kinds lives in a [`KindProfile`] looked up by kind, so
//! the world update is a single pass over one collection.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Location;
use crate::settings::Settings;

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Steak: worth a point
    Collectible,
    /// Axe: costs a point, ends the run below zero
    Hazard,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Collectible, EntityKind::Hazard];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Collectible => "collectible",
            EntityKind::Hazard => "hazard",
        }
    }
}

/// Horizontal speed distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedRange {
    Fixed(f32),
    /// Whole speeds within the inclusive bound, drawn once per entity
    Uniform { min: f32, max: f32 },
}

impl SpeedRange {
    pub fn draw<R: Rng>(&self, rng: &mut R) -> f32 {
        match *self {
            SpeedRange::Fixed(speed) => speed,
            SpeedRange::Uniform { min, max } => {
                let (low, high) = (min.ceil() as i32, max.floor() as i32);
                // No whole speed inside the bound
                if high < low {
                    return min;
                }
                rng.random_range(low..=high) as f32
            }
        }
    }
}

/// What touching the player does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub score_delta: i64,
    /// A hit that leaves the score negative ends the run
    pub ends_run_below_zero: bool,
}

/// Per-kind behavior table
#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    pub kind: EntityKind,
    /// Periodic bob in [-1, 1]; the phase offset between kinds keeps them out of step
    pub oscillation: fn(f32) -> f32,
    pub outcome: CollisionOutcome,
    pub speed: SpeedRange,
    /// Height of the spawn band below the ground line
    pub band: f32,
    pub bob_amplitude: f32,
    /// Maximum bob drop below the base height
    pub bob_peak: f32,
}

impl KindProfile {
    pub fn for_kind(kind: EntityKind, settings: &Settings) -> Self {
        match kind {
            EntityKind::Collectible => Self {
                kind,
                oscillation: f32::sin,
                outcome: CollisionOutcome {
                    score_delta: 1,
                    ends_run_below_zero: false,
                },
                speed: SpeedRange::Fixed(settings.collectible_speed),
                band: settings.collectible_band,
                bob_amplitude: settings.bob_amplitude,
                bob_peak: settings.bob_peak,
            },
            EntityKind::Hazard => Self {
                kind,
                oscillation: f32::cos,
                outcome: CollisionOutcome {
                    score_delta: -1,
                    ends_run_below_zero: true,
                },
                speed: SpeedRange::Uniform {
                    min: settings.hazard_speed[0],
                    max: settings.hazard_speed[1],
                },
                band: settings.hazard_band,
                bob_amplitude: settings.bob_amplitude,
                bob_peak: settings.bob_peak,
            },
        }
    }
}

/// Profiles for every kind, built once per world
#[derive(Debug, Clone)]
pub struct KindTable {
    collectible: KindProfile,
    hazard: KindProfile,
}

impl KindTable {
    pub fn new(settings: &Settings) -> Self {
        Self {
            collectible: KindProfile::for_kind(EntityKind::Collectible, settings),
            hazard: KindProfile::for_kind(EntityKind::Hazard, settings),
        }
    }

    pub fn get(&self, kind: EntityKind) -> &KindProfile {
        match kind {
            EntityKind::Collectible => &self.collectible,
            EntityKind::Hazard => &self.hazard,
        }
    }
}

/// A scrolling collectible or hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub location: Location,
    pub base_location: Location,
    /// Bob amplitude
    pub amplitude: f32,
    /// Bob is clamped to `base_location.y + peak_offset`
    pub peak_offset: f32,
    /// Leftward pixels per tick (always positive)
    pub movement_speed: f32,
    pub alive: bool,
}

impl Entity {
    pub fn new(id: u32, profile: &KindProfile, base_location: Location, movement_speed: f32) -> Self {
        Self {
            id,
            kind: profile.kind,
            location: base_location,
            base_location,
            amplitude: profile.bob_amplitude,
            peak_offset: profile.bob_peak,
            movement_speed,
            alive: true,
        }
    }

    /// Vertical bob for the given oscillator phase
    pub fn bob(&mut self, oscillation: fn(f32) -> f32, phase: f32) {
        let base = self.base_location.y;
        self.location.y =
            (base + self.amplitude * (oscillation(phase) + 1.0)).min(base + self.peak_offset);
    }

    /// One tick of kinematics: bob, then scroll left
    pub fn advance(&mut self, oscillation: fn(f32) -> f32, phase: f32) {
        self.bob(oscillation, phase);
        self.location.x -= self.movement_speed;
    }

    /// Left the playfield
    pub fn is_offscreen(&self) -> bool {
        self.location.x < 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.location.is_finite()
    }
}

/// Spawn point: right edge, random height inside the kind's band
pub fn spawn_location<R: Rng>(
    profile: &KindProfile,
    playfield_width: f32,
    ground_y: f32,
    rng: &mut R,
) -> Location {
    // Leave room below for the bob
    let span = (profile.band - profile.bob_peak).floor() as i32;
    let offset = if span > 0 { rng.random_range(0..span) } else { 0 };
    Vec2::new(playfield_width, ground_y + offset as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn table() -> KindTable {
        KindTable::new(&Settings::default())
    }

    #[test]
    fn test_kind_outcomes() {
        let table = table();
        assert_eq!(table.get(EntityKind::Collectible).outcome.score_delta, 1);
        assert!(!table.get(EntityKind::Collectible).outcome.ends_run_below_zero);
        assert_eq!(table.get(EntityKind::Hazard).outcome.score_delta, -1);
        assert!(table.get(EntityKind::Hazard).outcome.ends_run_below_zero);
    }

    #[test]
    fn test_bob_is_clamped_to_peak() {
        let table = table();
        let profile = table.get(EntityKind::Collectible);
        let mut entity = Entity::new(1, profile, Vec2::new(1120.0, 446.0), 7.0);

        for step in 0..100 {
            entity.bob(profile.oscillation, step as f32);
            assert!(entity.location.y >= 446.0);
            assert!(entity.location.y <= 456.0);
        }

        // sin(0) + 1 = 1 -> 20px, clamped to the 10px peak
        entity.bob(profile.oscillation, 0.0);
        assert_eq!(entity.location.y, 456.0);
    }

    #[test]
    fn test_kinds_bob_out_of_phase() {
        let table = table();
        let steak = table.get(EntityKind::Collectible);
        let axe = table.get(EntityKind::Hazard);
        let mut a = Entity::new(1, steak, Vec2::new(0.0, 0.0), 7.0);
        let mut b = Entity::new(2, axe, Vec2::new(0.0, 0.0), 7.0);
        // sin(pi) + 1 = 1, cos(pi) + 1 = 0
        a.bob(steak.oscillation, std::f32::consts::PI);
        b.bob(axe.oscillation, std::f32::consts::PI);
        assert_eq!(a.location.y, 10.0);
        assert!(b.location.y.abs() < 1e-4);
    }

    #[test]
    fn test_advance_moves_left() {
        let table = table();
        let profile = table.get(EntityKind::Collectible);
        let mut entity = Entity::new(1, profile, Vec2::new(1120.0, 446.0), 7.0);
        entity.advance(profile.oscillation, 0.0);
        assert_eq!(entity.location.x, 1113.0);
        assert!(!entity.is_offscreen());
    }

    #[test]
    fn test_hazard_speed_in_bound() {
        let table = table();
        let profile = table.get(EntityKind::Hazard);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let speed = profile.speed.draw(&mut rng);
            assert!((4.0..=10.0).contains(&speed));
        }
        assert_eq!(
            table.get(EntityKind::Collectible).speed.draw(&mut rng),
            7.0
        );
    }

    #[test]
    fn test_hazard_speed_uniform_over_whole_speeds() {
        let speed = SpeedRange::Uniform { min: 4.0, max: 10.0 };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let drawn = speed.draw(&mut rng);
            assert_eq!(drawn.fract(), 0.0);
            counts[(drawn - 4.0) as usize] += 1;
        }
        // Endpoints as likely as the interior
        for count in counts {
            assert!((800..1200).contains(&count), "{counts:?}");
        }
    }

    #[test]
    fn test_fractional_speed_bound() {
        let mut rng = Pcg32::seed_from_u64(3);
        let narrow = SpeedRange::Uniform { min: 4.2, max: 4.4 };
        let wide = SpeedRange::Uniform { min: 4.5, max: 6.2 };
        for _ in 0..200 {
            assert_eq!(narrow.draw(&mut rng), 4.2);
            let drawn = wide.draw(&mut rng);
            assert!(drawn == 5.0 || drawn == 6.0, "{drawn}");
        }
        assert_eq!(SpeedRange::Uniform { min: 6.0, max: 6.0 }.draw(&mut rng), 6.0);
    }

    #[test]
    fn test_spawn_location_band() {
        let table = table();
        let mut rng = Pcg32::seed_from_u64(42);
        for kind in EntityKind::ALL {
            let profile = table.get(kind);
            for _ in 0..200 {
                let loc = spawn_location(profile, 1120.0, 446.0, &mut rng);
                assert_eq!(loc.x, 1120.0);
                assert!(loc.y >= 446.0);
                assert!(loc.y < 446.0 + profile.band - profile.bob_peak);
            }
        }
    }
}
