//! Game settings
//!
//! Externally supplied constants. Loaded once at startup from a JSON file;
//! missing fields fall back to the reference balance in [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::Tick;

/// Game settings/balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,

    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Ground line as a fraction of playfield height
    pub ground_ratio: f32,

    // === Player ===
    pub player_speed: f32,
    /// How far above the ground a jump peaks
    pub jump_peak_offset: f32,
    /// Sprite frame size used for the collision box
    pub player_frame: [f32; 2],

    // === Gesture ===
    pub gesture_threshold: f32,

    // === Collectible ===
    pub collectible_interval_secs: f32,
    pub collectible_speed: f32,
    pub collectible_band: f32,

    // === Hazard ===
    /// Inclusive [min, max] spawn interval
    pub hazard_interval_secs: [f32; 2],
    /// Inclusive [min, max] horizontal speed
    pub hazard_speed: [f32; 2],
    pub hazard_band: f32,

    // === Bob ===
    pub bob_amplitude: f32,
    pub bob_peak: f32,
    pub bob_step_ms: u64,

    // === Backdrop ===
    pub backdrop_speed: f32,
    /// Width of one backdrop tile (defaults to the playfield width)
    pub backdrop_width: Option<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,

            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_ratio: GROUND_RATIO,

            player_speed: PLAYER_SPEED,
            jump_peak_offset: JUMP_PEAK_OFFSET,
            player_frame: [PLAYER_FRAME_WIDTH, PLAYER_FRAME_HEIGHT],

            gesture_threshold: GESTURE_THRESHOLD,

            collectible_interval_secs: COLLECTIBLE_INTERVAL_SECS,
            collectible_speed: COLLECTIBLE_SPEED,
            collectible_band: COLLECTIBLE_BAND,

            hazard_interval_secs: HAZARD_INTERVAL_SECS,
            hazard_speed: HAZARD_SPEED,
            hazard_band: HAZARD_BAND,

            bob_amplitude: BOB_AMPLITUDE,
            bob_peak: BOB_PEAK,
            bob_step_ms: BOB_STEP_MS,

            backdrop_speed: BACKDROP_SPEED,
            backdrop_width: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_rate == 0 {
            return Err(SettingsError::invalid("tick_rate", "must be non-zero"));
        }
        for (field, value) in [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_speed", self.player_speed),
            ("collectible_interval_secs", self.collectible_interval_secs),
            ("collectible_speed", self.collectible_speed),
            ("player_frame", self.player_frame[0]),
            ("player_frame", self.player_frame[1]),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        for (field, value) in [
            ("jump_peak_offset", self.jump_peak_offset),
            ("collectible_band", self.collectible_band),
            ("hazard_band", self.hazard_band),
            ("bob_amplitude", self.bob_amplitude),
            ("bob_peak", self.bob_peak),
            ("backdrop_speed", self.backdrop_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::invalid(
                    field,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        if let Some(width) = self.backdrop_width {
            if !(width.is_finite() && width > 0.0) {
                return Err(SettingsError::invalid("backdrop_width", "must be positive"));
            }
        }
        if !(0.0..=1.0).contains(&self.ground_ratio) {
            return Err(SettingsError::invalid("ground_ratio", "must be within [0, 1]"));
        }
        if !(self.gesture_threshold.is_finite() && self.gesture_threshold >= 0.0) {
            return Err(SettingsError::invalid(
                "gesture_threshold",
                "must be a finite non-negative ratio",
            ));
        }
        check_bound("hazard_interval_secs", self.hazard_interval_secs)?;
        check_bound("hazard_speed", self.hazard_speed)?;
        if self.hazard_speed[0] <= 0.0 {
            return Err(SettingsError::invalid("hazard_speed", "entities must move leftward"));
        }
        if self.bob_step_ms == 0 {
            return Err(SettingsError::invalid("bob_step_ms", "must be non-zero"));
        }
        Ok(())
    }

    /// Convert simulated seconds to whole ticks at the configured rate
    pub fn secs_to_ticks(&self, secs: f32) -> Tick {
        (secs * self.tick_rate as f32).round() as Tick
    }

    /// Fixed Collectible spawn interval in ticks
    pub fn collectible_interval_ticks(&self) -> Tick {
        self.secs_to_ticks(self.collectible_interval_secs).max(1)
    }

    /// Inclusive Hazard spawn interval bound in ticks
    pub fn hazard_interval_ticks(&self) -> (Tick, Tick) {
        let [min, max] = self.hazard_interval_secs;
        (
            self.secs_to_ticks(min).max(1),
            self.secs_to_ticks(max).max(1),
        )
    }

    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        (self.playfield_height * self.ground_ratio).floor()
    }

    /// Wall-clock duration of one tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    /// Simulated milliseconds elapsed at `tick`
    pub fn millis_at(&self, tick: Tick) -> u64 {
        tick * 1000 / self.tick_rate.max(1) as u64
    }

    /// Backdrop tile width
    pub fn backdrop_width(&self) -> f32 {
        self.backdrop_width.unwrap_or(self.playfield_width)
    }
}

fn check_bound(field: &'static str, [min, max]: [f32; 2]) -> Result<(), SettingsError> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 {
        return Err(SettingsError::invalid(field, "bounds must be finite and non-negative"));
    }
    if min > max {
        return Err(SettingsError::invalid(field, format!("min {min} exceeds max {max}")));
    }
    Ok(())
}
