//! Avatar physics
//!
//! First-order explicit Euler under constant gravity. Boundary handling
//! belongs to the collision detector, so nothing here clamps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// The player-controlled falling entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top edge of the avatar box (y grows downward)
    pub y: f32,
    /// Vertical velocity in units per tick (negative = up)
    pub velocity: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::start()
    }
}

impl Avatar {
    /// Start-of-run position and velocity
    pub fn start() -> Self {
        Self {
            y: AVATAR_START_Y,
            velocity: AVATAR_START_VELOCITY,
        }
    }

    /// One Euler step: velocity first, then position
    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    /// Flap: overwrites velocity, whatever it was
    #[inline]
    pub fn apply_impulse(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Bounding box at the fixed horizontal position
    pub fn bounds(&self) -> Rect {
        Self::bounds_at(self.y)
    }

    pub fn bounds_at(y: f32) -> Rect {
        Rect::from_min_size(Vec2::new(AVATAR_X, y), Vec2::splat(AVATAR_SIZE))
    }

    /// Nose tilt for drawing, in degrees (positive = nose down)
    pub fn tilt_degrees(&self) -> f32 {
        (self.velocity * 3.0).clamp(-30.0, 70.0)
    }
}

/// Attract-mode display height at wall-clock `time_ms`
pub fn idle_bob(time_ms: f64) -> f32 {
    AVATAR_START_Y + ((time_ms / IDLE_BOB_PERIOD_MS).sin() as f32) * IDLE_BOB_AMPLITUDE
}
