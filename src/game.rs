//! Frame driver
//!
//! Owns the game state and everything that reacts to it: tick pacing,
//! write-through of new best scores, the FPS window and the HUD snapshot.
//! The browser layer calls `frame` once per animation frame and `activate`
//! on player input.

use crate::PlayArea;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::hud::HudView;
use crate::persistence::{BestScoreStore, KeyValueStore};
use crate::renderer::{SceneView, Vertex, build_scene};
use crate::settings::{FramePacing, Settings};
use crate::sim::{GameEvent, GameMode, GameState, GapSource, RandomGaps, tick};

/// Longest frame delta fed to the accumulator, in seconds
const MAX_FRAME_DT: f32 = 0.1;

const FPS_WINDOW: usize = 60;

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// What happened during one display frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Simulation ticks run this frame
    pub ticks: u32,
    pub events: Vec<GameEvent>,
}

/// Game instance holding all state
pub struct Game<S: KeyValueStore> {
    state: GameState,
    gaps: Box<dyn GapSource>,
    /// Holds the best score and the settings under separate keys
    store: S,
    settings: Settings,
    area: PlayArea,
    accumulator: f32,
    last_time: Option<f64>,
    fps: FpsCounter,
}

impl<S: KeyValueStore> Game<S> {
    /// New game with random gaps; the best score is read once from `store`
    pub fn new(seed: u64, store: S, settings: Settings) -> Self {
        Self::with_gaps(Box::new(RandomGaps::new(seed)), store, settings)
    }

    pub fn with_gaps(gaps: Box<dyn GapSource>, mut store: S, settings: Settings) -> Self {
        let best_score = BestScoreStore::new(&mut store).get().unwrap_or(0);
        log::info!(
            "Game ready (best {}, pacing {})",
            best_score,
            settings.pacing.as_str()
        );
        Self {
            state: GameState::new(best_score),
            gaps,
            store,
            settings,
            area: PlayArea::STANDARD,
            accumulator: 0.0,
            last_time: None,
            fps: FpsCounter::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings and persist them next to the best score
    pub fn update_settings(&mut self, settings: Settings) {
        if settings.pacing != self.settings.pacing {
            self.accumulator = 0.0;
        }
        self.settings = settings;
        self.settings.save(&mut self.store);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Player input: start a run, flap, or leave the game-over screen
    pub fn activate(&mut self) -> GameMode {
        let before = self.state.mode;
        let after = self.state.activate();
        if before != after {
            log::info!("Mode {} -> {}", before.as_str(), after.as_str());
            if after == GameMode::Playing {
                self.accumulator = 0.0;
            }
        }
        after
    }

    /// Advance one display frame at `time_ms` (animation-frame timestamp)
    pub fn frame(&mut self, time_ms: f64) -> FrameReport {
        let steps = match self.settings.pacing {
            FramePacing::PerFrame => 1,
            FramePacing::Fixed60 => self.fixed_steps(time_ms),
        };
        self.last_time = Some(time_ms);
        self.fps.record(time_ms);

        let mut report = FrameReport::default();
        for _ in 0..steps {
            if !self.state.is_playing() {
                break;
            }
            let events = tick(&mut self.state, self.area, self.gaps.as_mut());
            report.ticks += 1;
            for event in &events {
                self.handle_event(event);
            }
            report.events.extend(events);
        }
        report
    }

    /// Drain the accumulator in whole fixed steps
    fn fixed_steps(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Scored { score } => log::debug!("Scored: {}", score),
            GameEvent::NewBest { best } => {
                log::info!("New best score: {}", best);
                BestScoreStore::new(&mut self.store).set(best);
            }
            GameEvent::Crashed { score, collision } => {
                log::info!("Run over: score {} ({:?})", score, collision);
                log::info!("Mode playing -> gameover");
            }
        }
    }

    /// Triangle list for the current frame
    pub fn scene(&self, time_ms: f64) -> Vec<Vertex> {
        build_scene(&SceneView::from_state(
            &self.state,
            time_ms,
            self.settings.animate(),
        ))
    }

    pub fn hud(&self) -> HudView {
        HudView::from_state(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BEST_SCORE_KEY;
    use crate::persistence::MemoryStore;

    struct FixedGap(f32);

    impl GapSource for FixedGap {
        fn gap_top(&mut self, _min: f32, _max: f32) -> f32 {
            self.0
        }
    }

    fn game_with(store: MemoryStore, settings: Settings) -> Game<MemoryStore> {
        Game::with_gaps(Box::new(FixedGap(185.0)), store, settings)
    }

    #[test]
    fn test_best_read_at_startup() {
        let mut store = MemoryStore::new();
        store.write(BEST_SCORE_KEY, "12").unwrap();
        let game = game_with(store, Settings::default());
        assert_eq!(game.state().best_score(), 12);
        assert_eq!(game.hud(), HudView::Idle { best: Some(12) });
    }

    #[test]
    fn test_idle_frames_do_not_tick() {
        let mut game = game_with(MemoryStore::new(), Settings::default());
        let report = game.frame(16.0);
        assert_eq!(report.ticks, 0);
        assert_eq!(game.state().avatar.y, 250.0);
    }

    #[test]
    fn test_per_frame_pacing_ticks_once() {
        let mut game = game_with(MemoryStore::new(), Settings::default());
        game.activate();
        // Large gap between timestamps still yields one tick
        assert_eq!(game.frame(0.0).ticks, 1);
        assert_eq!(game.frame(500.0).ticks, 1);
        assert_eq!(game.state().frame_count, 2);
    }

    #[test]
    fn test_fixed_pacing_uses_accumulator() {
        let settings = Settings {
            pacing: FramePacing::Fixed60,
            ..Settings::default()
        };
        let mut game = game_with(MemoryStore::new(), settings);
        game.activate();
        assert_eq!(game.frame(1000.0).ticks, 1);
        // 120 Hz display: roughly every other frame ticks
        let ticks: u32 = (1..=10)
            .map(|i| game.frame(1000.0 + i as f64 * 1000.0 / 120.0).ticks)
            .sum();
        assert!((4..=6).contains(&ticks), "ticks = {}", ticks);
        // A long stall is clamped to the substep cap
        assert_eq!(game.frame(5000.0).ticks, MAX_SUBSTEPS);
    }

    #[test]
    fn test_crash_stops_ticking() {
        let mut game = game_with(MemoryStore::new(), Settings::default());
        game.activate();
        let mut t = 0.0;
        while game.state().mode == GameMode::Playing {
            game.frame(t);
            t += 16.0;
            assert!(t < 100_000.0);
        }
        assert_eq!(game.state().mode, GameMode::GameOver);
        assert_eq!(game.frame(t).ticks, 0);
        assert!(matches!(game.hud(), HudView::GameOver { .. }));
    }

    #[test]
    fn test_fps_counter_window() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }

    #[test]
    fn test_update_settings_persists() {
        let mut game = game_with(MemoryStore::new(), Settings::default());
        let settings = Settings {
            show_fps: true,
            ..Settings::default()
        };
        game.update_settings(settings.clone());
        assert_eq!(Settings::load(game.store()), settings);
    }

    #[test]
    fn test_settings_and_best_share_store() {
        let mut store = MemoryStore::new();
        store.write(BEST_SCORE_KEY, "7").unwrap();
        let mut game = game_with(store, Settings::default());
        game.update_settings(Settings {
            reduced_motion: true,
            ..Settings::default()
        });
        assert_eq!(
            game.store().read(BEST_SCORE_KEY).unwrap().as_deref(),
            Some("7")
        );
        assert!(Settings::load(game.store()).reduced_motion);
    }
}
