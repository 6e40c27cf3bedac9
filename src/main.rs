//! Flap Gap entry point
//!
//! On wasm the game mounts into `#canvas`. Native builds have no window; they
//! play one headless run with the autopilot and print a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    flap_gap::platform::web::mount("canvas".to_string()).await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the headless run (one minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flap_gap::persistence::MemoryStore;
    use flap_gap::sim::{GameMode, autopilot};
    use flap_gap::{FramePacing, Game, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flap Gap (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Usage: flap-gap [seed] [perframe|fixed60]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    let pacing = match args.next().map(|s| s.parse::<FramePacing>()) {
        Some(Ok(pacing)) => pacing,
        Some(Err(e)) => {
            log::warn!("{}, using per-frame pacing", e);
            FramePacing::default()
        }
        None => FramePacing::default(),
    };
    log::info!("Seed: {}, pacing: {}", seed, pacing.as_str());

    let settings = Settings {
        pacing,
        ..Settings::default()
    };
    let mut game = Game::new(seed, MemoryStore::new(), settings);
    game.activate();

    let frame_ms = 1000.0 / 60.0;
    let mut frames = 0;
    while frames < HEADLESS_FRAMES && game.state().mode == GameMode::Playing {
        if autopilot::should_flap(game.state(), game.area()) {
            game.activate();
        }
        game.frame(frames as f64 * frame_ms);
        frames += 1;
    }

    let state = game.state();
    let summary = serde_json::json!({
        "seed": seed,
        "frames": frames,
        "mode": state.mode.as_str(),
        "score": state.score,
        "best": state.best_score(),
        "avatar": state.avatar,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
