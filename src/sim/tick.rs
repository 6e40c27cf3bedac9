//! One simulation step
//!
//! Order within a tick: gravity, spawn/advance/pass detection, scoring,
//! collision, then pruning. Nothing runs outside of `Playing`.

use serde::{Deserialize, Serialize};

use super::collision::{Collision, detect_collision};
use super::obstacle::GapSource;
use super::state::GameState;
use crate::PlayArea;
use crate::consts::*;

/// Something the frame driver may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An obstacle was cleared; `score` is the new total
    Scored { score: u32 },
    /// The best score was raised in memory and should be persisted
    NewBest { best: u32 },
    /// The run ended
    Crashed { score: u32, collision: Collision },
}

/// Advance the simulation by one frame
pub fn tick(state: &mut GameState, area: PlayArea, gaps: &mut dyn GapSource) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_playing() {
        return events;
    }

    state.avatar.apply_gravity(GRAVITY);

    state.frame_count += 1;
    let passed = state.obstacles.tick(state.frame_count, area, gaps);
    for _ in 0..passed {
        let new_best = state.record_pass();
        events.push(GameEvent::Scored { score: state.score });
        if let Some(best) = new_best {
            events.push(GameEvent::NewBest { best });
        }
    }

    // Checked before pruning so nothing leaves the set unchecked
    if let Some(collision) = detect_collision(
        &state.avatar,
        state.obstacles.as_slice(),
        area.height,
        GROUND_MARGIN,
    ) {
        state.crash();
        events.push(GameEvent::Crashed {
            score: state.score,
            collision,
        });
    }

    state.obstacles.prune();
    events
}
