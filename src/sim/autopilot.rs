//! Simple flap controller for headless demo runs
//!
//! Hovers the avatar just above the bottom of the next gap: flap whenever it
//! has fallen below the aim line.

use super::obstacle::Obstacle;
use super::state::GameState;
use crate::PlayArea;
use crate::consts::*;

/// Clearance kept between the avatar's bottom edge and the lower barrier
const BOTTOM_CLEARANCE: f32 = 25.0;

/// The first obstacle the avatar hasn't fully cleared yet
pub fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
    state.obstacles.iter().find(|o| o.right() >= AVATAR_X)
}

/// Avatar top-edge height the controller tries to stay at
pub fn aim_y(state: &GameState, area: PlayArea) -> f32 {
    match next_obstacle(state) {
        Some(o) => o.gap_bottom() - AVATAR_SIZE - BOTTOM_CLEARANCE,
        None => (area.height - AVATAR_SIZE) / 2.0,
    }
}

/// Whether to send an activation this frame
pub fn should_flap(state: &GameState, area: PlayArea) -> bool {
    state.is_playing() && state.avatar.velocity > 0.0 && state.avatar.y > aim_y(state, area)
}
