//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, with the tick passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod entity;
pub mod manager;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Clock, Tick};
pub use collision::Aabb;
pub use entity::{CollisionOutcome, Entity, EntityKind, KindProfile, KindTable, SpeedRange};
pub use manager::WorldManager;
pub use player::{MotionState, Player};
pub use spawn::{SpawnPolicy, SpawnScheduler};
pub use state::{Backdrop, World, WorldEvent};
pub use tick::{TickInput, tick};
