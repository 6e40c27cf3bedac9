//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One tick per call, constants tuned for ~60 Hz
//! - Randomness only through an injected `GapSource`
//! - Obstacles kept in spawn order

pub mod autopilot;
pub mod avatar;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, idle_bob};
pub use collision::{Collision, Rect, check_collision, detect_collision};
pub use obstacle::{GapSource, Obstacle, ObstacleSet, RandomGaps, gap_top_range};
pub use state::{GameMode, GameState};
pub use tick::{GameEvent, tick};
