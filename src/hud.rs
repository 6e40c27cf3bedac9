//! Overlay view model
//!
//! One variant per game mode. The web layer only touches the DOM when the
//! view changes.

use crate::sim::{GameMode, GameState};

/// What the overlay should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudView {
    /// Title, attract animation, "tap to play", best score if non-zero
    Idle { best: Option<u32> },
    /// Live score
    Playing { score: u32 },
    /// Final score, best score, restart prompt
    GameOver { score: u32, best: u32 },
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        match state.mode {
            GameMode::Idle => HudView::Idle {
                best: Some(state.best_score()).filter(|&b| b > 0),
            },
            GameMode::Playing => HudView::Playing { score: state.score },
            GameMode::GameOver => HudView::GameOver {
                score: state.score,
                best: state.best_score(),
            },
        }
    }
}
