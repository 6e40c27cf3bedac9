//! Flap Gap - a single-screen flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Simulation (avatar physics, obstacles, collisions, game state)
//! - `game`: Frame driver tying the simulation to persistence and rendering
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: Overlay view model for the three game modes
//! - `platform`: Browser mount/unmount, input and animation-frame loop
//! - `persistence`: Key-value storage and best-score persistence
//! - `settings`: Presentation preferences

pub mod game;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use hud::HudView;
pub use settings::{FramePacing, Settings};

/// Game configuration constants
///
/// Tuned for one simulation tick per ~60 Hz display frame.
pub mod consts {
    /// Canvas dimensions in logical units
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Ground strip drawn below the play area
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Downward acceleration added to velocity every tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity the avatar is set to on a flap (negative = up)
    pub const IMPULSE: f32 = -9.0;

    /// Avatar box
    pub const AVATAR_X: f32 = 80.0;
    pub const AVATAR_SIZE: f32 = 35.0;
    pub const AVATAR_START_Y: f32 = 250.0;
    pub const AVATAR_START_VELOCITY: f32 = 0.0;

    /// Obstacle geometry and motion
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_SPEED: f32 = 3.0;
    pub const GAP_SIZE: f32 = 160.0;
    /// Frames between obstacle spawns
    pub const SPAWN_PERIOD: u32 = 90;
    /// Minimum distance between the gap and the top / ground line
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// How far past the left edge an obstacle travels before removal
    pub const PRUNE_MARGIN: f32 = 10.0;

    /// Ground collision triggers this far above the ground line
    pub const GROUND_MARGIN: f32 = 10.0;

    /// Attract-mode bob: amplitude (units) and period divisor (ms)
    pub const IDLE_BOB_AMPLITUDE: f32 = 15.0;
    pub const IDLE_BOB_PERIOD_MS: f64 = 300.0;

    /// Fixed timestep used by `FramePacing::Fixed60`
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Storage keys
    pub const BEST_SCORE_KEY: &str = "flappyHighScore";
    pub const SETTINGS_KEY: &str = "flappySettings";
}

/// The region above the ground the avatar and obstacles move in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    /// Height of the ground line (canvas height minus ground strip)
    pub height: f32,
}

impl PlayArea {
    /// The reference 400x600 canvas with an 80-unit ground strip
    pub const STANDARD: PlayArea = PlayArea {
        width: consts::CANVAS_WIDTH,
        height: consts::CANVAS_HEIGHT - consts::GROUND_HEIGHT,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::STANDARD
    }
}
