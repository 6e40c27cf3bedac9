//! Integration test: the frame driver end to end
//!
//! Drives `Game` through whole runs with an in-memory store and fixed gap
//! placement: mode lifecycle, best-score write-through, and an autopilot run
//! that has to keep scoring.

use flap_gap::consts::{BEST_SCORE_KEY, IMPULSE};
use flap_gap::persistence::{KeyValueStore, MemoryStore, StoreError};
use flap_gap::sim::{GameEvent, GameMode, GapSource, autopilot};
use flap_gap::{Game, HudView, Settings};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Every gap at the same height: gap spans 185..345
struct FixedGap(f32);

impl GapSource for FixedGap {
    fn gap_top(&mut self, _min: f32, _max: f32) -> f32 {
        self.0
    }
}

/// Store that refuses every write
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.read(key)
    }

    fn write(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write {
            key: key.to_string(),
            reason: "quota exceeded".to_string(),
        })
    }
}

fn store_with_best(best: u32) -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .write(BEST_SCORE_KEY, &best.to_string())
        .expect("memory store write");
    store
}

fn new_game<S: KeyValueStore>(store: S) -> Game<S> {
    Game::with_gaps(Box::new(FixedGap(185.0)), store, Settings::default())
}

/// Run one frame with the autopilot deciding on input first
fn autopilot_frame<S: KeyValueStore>(game: &mut Game<S>, frame: u32) -> Vec<GameEvent> {
    if autopilot::should_flap(game.state(), game.area()) {
        game.activate();
    }
    game.frame(frame as f64 * FRAME_MS).events
}

/// Let the avatar drop until the run ends, capped at 1000 frames
fn fall_until_crash<S: KeyValueStore>(game: &mut Game<S>) -> u32 {
    let mut frames = 0;
    while game.state().mode == GameMode::Playing && frames < 1000 {
        game.frame(frames as f64 * FRAME_MS);
        frames += 1;
    }
    frames
}

fn stored_best(game: &Game<MemoryStore>) -> Option<String> {
    game.store()
        .read(BEST_SCORE_KEY)
        .expect("memory store read")
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_full_lifecycle() {
    let mut game = new_game(MemoryStore::new());
    assert_eq!(game.hud(), HudView::Idle { best: None });

    // Idle -> playing applies the first flap
    assert_eq!(game.activate(), GameMode::Playing);
    assert_eq!(game.state().avatar.velocity, IMPULSE);
    assert_eq!(game.hud(), HudView::Playing { score: 0 });

    // No input: the avatar hits the ground well before the first spawn
    let frames = fall_until_crash(&mut game);
    assert!(frames < 90, "crashed after {} frames", frames);
    assert_eq!(game.state().mode, GameMode::GameOver);
    assert_eq!(game.hud(), HudView::GameOver { score: 0, best: 0 });

    // Frozen until the player acts
    let frozen = game.state().avatar;
    game.frame(100_000.0);
    assert_eq!(game.state().avatar, frozen);

    assert_eq!(game.activate(), GameMode::Idle);
    assert_eq!(game.activate(), GameMode::Playing);
    let state = game.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.frame_count, 0);
    assert!(state.obstacles.is_empty());
    assert_eq!(state.avatar.y, 250.0);
    assert_eq!(state.avatar.velocity, IMPULSE);
}

#[test]
fn test_flap_while_playing_overrides_velocity() {
    let mut game = new_game(MemoryStore::new());
    game.activate();
    for i in 0..25 {
        game.frame(i as f64 * FRAME_MS);
    }
    assert!(game.state().avatar.velocity > 0.0);
    assert_eq!(game.activate(), GameMode::Playing);
    assert_eq!(game.state().avatar.velocity, IMPULSE);
}

// =============================================================================
// Autopilot
// =============================================================================

#[test]
fn test_autopilot_keeps_scoring() {
    let mut game = new_game(MemoryStore::new());
    game.activate();

    let mut scored = 0;
    for frame in 0..1000 {
        let events = autopilot_frame(&mut game, frame);
        scored += events
            .iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .count();
        assert_eq!(
            game.state().mode,
            GameMode::Playing,
            "crashed at frame {} with score {}",
            frame,
            game.state().score
        );
    }

    assert!(game.state().score >= 5, "score {}", game.state().score);
    assert_eq!(scored as u32, game.state().score);
    // Passed obstacles are eventually pruned
    assert!(game.state().obstacles.len() <= 6);
}

// =============================================================================
// Best score persistence
// =============================================================================

#[test]
fn test_new_best_written_through_in_same_frame() {
    let mut game = new_game(store_with_best(2));
    assert_eq!(game.hud(), HudView::Idle { best: Some(2) });
    game.activate();

    let mut frame = 0;
    while game.state().score < 3 {
        let events = autopilot_frame(&mut game, frame);
        frame += 1;
        assert!(frame < 2000);
        assert_eq!(game.state().mode, GameMode::Playing);

        if events.contains(&GameEvent::NewBest { best: 3 }) {
            assert_eq!(stored_best(&game).as_deref(), Some("3"));
        } else {
            assert_eq!(stored_best(&game).as_deref(), Some("2"));
        }
    }
    assert_eq!(game.state().best_score(), 3);
}

#[test]
fn test_lower_score_keeps_stored_best() {
    let mut game = new_game(store_with_best(50));
    game.activate();
    fall_until_crash(&mut game);

    assert_eq!(game.hud(), HudView::GameOver { score: 0, best: 50 });
    assert_eq!(stored_best(&game).as_deref(), Some("50"));
}

#[test]
fn test_failed_writes_still_update_best_in_memory() {
    let mut game = new_game(ReadOnlyStore(store_with_best(1)));
    assert_eq!(game.state().best_score(), 1);
    game.activate();

    let mut frame = 0;
    while game.state().score < 2 {
        autopilot_frame(&mut game, frame);
        frame += 1;
        assert!(frame < 2000);
    }
    assert_eq!(game.state().best_score(), 2);
    assert_eq!(game.hud(), HudView::Playing { score: 2 });
}

#[test]
fn test_corrupt_stored_best_reads_as_zero() {
    let mut store = MemoryStore::new();
    store
        .write(BEST_SCORE_KEY, "not a number")
        .expect("memory store write");
    let game = new_game(store);
    assert_eq!(game.state().best_score(), 0);
    assert_eq!(game.hud(), HudView::Idle { best: None });
}
