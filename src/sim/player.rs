//! Player motion
//!
//! The runner stays at a fixed column and only jumps. Vertical motion is a
//! scripted three-state machine, not a physics integration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::Location;
use crate::gesture::JumpEvent;
use crate::settings::Settings;

/// Vertical motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Grounded,
    Rising,
    Falling,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub location: Location,
    /// Rest position on the ground line
    pub base_location: Location,
    /// Pixels per tick, both for jumps and horizontal moves
    pub movement_speed: f32,
    /// Height of the jump apex above the ground line
    pub peak_offset: f32,
    /// Sprite frame size (collision box)
    pub frame: Vec2,
    state: MotionState,
}

impl Player {
    pub fn new(base_location: Location, movement_speed: f32, peak_offset: f32, frame: Vec2) -> Self {
        Self {
            location: base_location,
            base_location,
            movement_speed,
            peak_offset,
            frame,
            state: MotionState::Grounded,
        }
    }

    /// Player at its reference spot: one third across, standing on the ground line
    pub fn from_settings(settings: &Settings) -> Self {
        let base = Vec2::new(
            (settings.playfield_width / 3.0).floor(),
            settings.ground_y(),
        );
        Self::new(
            base,
            settings.player_speed,
            settings.jump_peak_offset,
            Vec2::from(settings.player_frame),
        )
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Airborne (rising or falling)
    pub fn jumping(&self) -> bool {
        self.state != MotionState::Grounded
    }

    pub fn peak_reached(&self) -> bool {
        self.state == MotionState::Falling
    }

    /// Y coordinate of the jump apex
    pub fn peak_y(&self) -> f32 {
        self.base_location.y - self.peak_offset
    }

    /// Start a jump. Ignored mid-air; returns whether the jump was taken.
    pub fn jump(&mut self, _event: JumpEvent) -> bool {
        if self.state != MotionState::Grounded {
            return false;
        }
        self.state = MotionState::Rising;
        true
    }

    /// Horizontal move, available in any motion state
    pub fn move_horizontal(&mut self, direction: f32) {
        self.location.x += direction * self.movement_speed;
    }

    /// Advance the vertical trajectory by one tick
    pub fn step(&mut self) {
        match self.state {
            MotionState::Grounded => {}
            MotionState::Rising => {
                let peak = self.peak_y();
                self.location.y = (self.location.y - self.movement_speed).max(peak);
                if self.location.y <= peak {
                    self.state = MotionState::Falling;
                }
            }
            MotionState::Falling => {
                let base = self.base_location.y;
                self.location.y += self.movement_speed;
                if self.location.y >= base {
                    self.location.y = base;
                    self.state = MotionState::Grounded;
                }
            }
        }
    }

    pub fn collision_box(&self) -> Aabb {
        Aabb::from_frame(self.location, self.frame)
    }

    /// Whether a point (an entity location) falls inside the player's frame
    pub fn is_colliding(&self, point: Location) -> bool {
        self.collision_box().contains_point(point)
    }
}
