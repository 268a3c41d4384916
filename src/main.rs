//! Space Invaders - native headless driver
//!
//! Runs one autopilot session through the real phase machine at a fixed
//! 60 Hz timestep, rendering into a draw list, then reports the result.
//! No command-line arguments; set `SPACE_INVADERS_CONFIG` to a JSON file to
//! override gameplay tunables and `RUST_LOG` to control logging.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use space_invaders::audio::AudioManager;
use space_invaders::consts::SIM_DT;
use space_invaders::phase::{InputEvent, Key};
use space_invaders::render::DrawList;
use space_invaders::sim::{FrameClock, TickInput};
use space_invaders::{Error, Game, GameConfig, GamePhase, HighScores, Options, StorageError};

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "SPACE_INVADERS_CONFIG";

/// Upper bound on the demo run (five minutes of play)
const MAX_FRAMES: u64 = 60 * 60 * 5;

fn load_config() -> Result<GameConfig, Error> {
    let config = match env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            let json = fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            let config: GameConfig =
                serde_json::from_str(&json).map_err(|source| StorageError::Json {
                    path: path.clone(),
                    source,
                })?;
            log::info!("Loaded config from {}", path.display());
            config
        }
        None => GameConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_or_default<T: Default>(what: &str, result: Result<T, StorageError>) -> T {
    result.unwrap_or_else(|err| {
        log::warn!("Ignoring unreadable {what}: {err}");
        T::default()
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run() -> Result<(), Error> {
    let config = load_config()?;
    let options_path = Path::new(Options::FILE_NAME).to_path_buf();
    let scores_path = Path::new(HighScores::FILE_NAME).to_path_buf();
    let options = load_or_default("options", Options::load(&options_path));
    let high_scores = load_or_default("high scores", HighScores::load(&scores_path));

    let seed = clock_seed();
    log::info!(
        "Game initialized with seed: {seed}, movement: {}, difficulty: {}",
        config.movement.as_str(),
        options.difficulty.as_str()
    );

    let mut game = Game::new(config, options, high_scores, AudioManager::default(), seed)
        .with_storage(options_path, scores_path);
    let mut frame_list = DrawList::new();
    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    // Main menu: "Start" is preselected
    game.handle_event(InputEvent::KeyDown(Key::Confirm), 0);

    let mut frame = 0;
    while frame < MAX_FRAMES && game.phase() == GamePhase::Playing {
        let clock = FrameClock::fixed(frame, SIM_DT);
        game.update(&autopilot, clock);
        frame_list.clear_commands();
        game.draw(&mut frame_list);
        frame += 1;
    }

    let session = game.session();
    let stats = &session.stats;
    log::info!(
        "Run finished in {} ({} frames): score {}, lives {}, shots {}, enemies {}, \
         bonuses {}, hits taken {}",
        game.phase().as_str(),
        frame,
        session.score,
        session.lives(),
        stats.shots_fired,
        stats.enemies_destroyed,
        stats.bonuses_destroyed,
        stats.hits_taken
    );
    if let Some(rank) = game.context().last_rank {
        log::info!("High score rank #{rank}");
    }
    if let Some(best) = game.context().high_scores.top_score() {
        log::info!("Best score on the board: {best}");
    }

    // Leave through the menus the way a player would
    let now = FrameClock::fixed(frame, SIM_DT).now_ms;
    game.handle_event(InputEvent::KeyDown(Key::Escape), now);
    if game.phase() == GamePhase::Paused {
        // Cursor starts on "Resume"; "Quit to Menu" is one step up
        game.handle_event(InputEvent::KeyDown(Key::Up), now);
        game.handle_event(InputEvent::KeyDown(Key::Confirm), now);
    }
    // "Quit" is one step up from "Start"
    game.handle_event(InputEvent::KeyDown(Key::Up), now);
    game.handle_event(InputEvent::KeyDown(Key::Confirm), now);
    debug_assert!(game.should_quit());

    game.context().persist_options();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Invaders (native) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A browser frontend drives `Game` directly
}
