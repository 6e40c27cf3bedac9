//! Game state and the mode state machine
//!
//! Owns score and best-score bookkeeping. The best score is updated in memory
//! first; persisting it is the frame driver's job.

use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::obstacle::ObstacleSet;
use crate::consts::*;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Attract mode: avatar bobs, nothing is simulated
    #[default]
    Idle,
    /// Active run
    Playing,
    /// Run ended, simulation frozen
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Idle => "idle",
            GameMode::Playing => "playing",
            GameMode::GameOver => "gameover",
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub avatar: Avatar,
    pub obstacles: ObstacleSet,
    /// Ticks since the run started (drives spawning)
    pub frame_count: u32,
    pub score: u32,
    best_score: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameState {
    /// Fresh state in attract mode with a previously stored best score
    pub fn new(best_score: u32) -> Self {
        Self {
            mode: GameMode::Idle,
            avatar: Avatar::start(),
            obstacles: ObstacleSet::new(),
            frame_count: 0,
            score: 0,
            best_score,
        }
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn is_playing(&self) -> bool {
        self.mode == GameMode::Playing
    }

    /// The single activation handler (flap / start / dismiss)
    ///
    /// Returns the mode after the transition.
    pub fn activate(&mut self) -> GameMode {
        match self.mode {
            GameMode::Idle => {
                self.start_run();
                self.avatar.apply_impulse(IMPULSE);
                self.mode = GameMode::Playing;
            }
            GameMode::Playing => {
                self.avatar.apply_impulse(IMPULSE);
            }
            GameMode::GameOver => {
                self.mode = GameMode::Idle;
            }
        }
        self.mode
    }

    /// Reset everything a run accumulates
    fn start_run(&mut self) {
        self.avatar = Avatar::start();
        self.obstacles.clear();
        self.frame_count = 0;
        self.score = 0;
    }

    /// Award one point for a cleared obstacle.
    ///
    /// Returns `Some(best)` when this raised the best score. Ignored outside
    /// of `Playing`.
    pub fn record_pass(&mut self) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        self.score += 1;
        if self.score > self.best_score {
            self.best_score = self.score;
            Some(self.best_score)
        } else {
            None
        }
    }

    /// End the current run. Returns false if there was no run to end.
    pub fn crash(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.mode = GameMode::GameOver;
        true
    }
}
