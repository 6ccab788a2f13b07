//! Mouth Runner - a gesture-driven endless runner
//!
//! Core modules:
//! - `sim`: Deterministic fixed-tick simulation (world, entities, spawning, player motion)
//! - `gesture`: Debounces the external mouth-openness signal into jump events
//! - `runner`: Fixed-rate simulation loop and its I/O boundaries
//! - `snapshot`: Render/HUD boundary exposed to external renderers
//! - `settings`: Data-driven game balance and playfield configuration

pub mod error;
pub mod gesture;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::{SettingsError, SignalError, SimError};
pub use gesture::{GestureBridge, JumpEvent, openness_from_landmarks};
pub use runner::{ControlEvent, FrameSink, OpennessSource, SimulationLoop, StepOutcome};
pub use settings::Settings;
pub use snapshot::RenderSnapshot;

use glam::Vec2;

/// A point on the playfield (pixels, y grows downward)
pub type Location = Vec2;

/// Game configuration defaults, matching the reference balance
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 25;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1120.0;
    pub const PLAYFIELD_HEIGHT: f32 = 580.0;
    /// Ground line as a fraction of playfield height
    pub const GROUND_RATIO: f32 = 0.77;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const JUMP_PEAK_OFFSET: f32 = 60.0;
    /// Single walk-cycle frame of the player sprite
    pub const PLAYER_FRAME_WIDTH: f32 = 48.0;
    pub const PLAYER_FRAME_HEIGHT: f32 = 48.0;

    /// Gesture: lip distance / face height above which the mouth counts as open
    pub const GESTURE_THRESHOLD: f32 = 0.17;

    /// Collectible (steak) defaults
    pub const COLLECTIBLE_INTERVAL_SECS: f32 = 3.0;
    pub const COLLECTIBLE_SPEED: f32 = 7.0;
    pub const COLLECTIBLE_BAND: f32 = 15.0;

    /// Hazard (axe) defaults
    pub const HAZARD_INTERVAL_SECS: [f32; 2] = [2.0, 4.0];
    pub const HAZARD_SPEED: [f32; 2] = [4.0, 10.0];
    pub const HAZARD_BAND: f32 = 20.0;

    /// Bob oscillation shared by every entity kind
    pub const BOB_AMPLITUDE: f32 = 20.0;
    pub const BOB_PEAK: f32 = 10.0;
    /// Milliseconds per oscillator step (the phase advances in whole steps)
    pub const BOB_STEP_MS: u64 = 200;

    /// Backdrop scroll speed (pixels/tick)
    pub const BACKDROP_SPEED: f32 = 5.0;

    /// Name of the world registered at startup
    pub const DEFAULT_WORLD: &str = "Forest";
}
