//! Skyraid entry point
//!
//! Headless demo driver: runs the simulation at a fixed frame interval with a
//! simple autopilot standing in for a human, and logs the session.
//!
//! Usage: `skyraid [seed] [--tuning <path>] [--seconds <n>]`

use std::time::{SystemTime, UNIX_EPOCH};

use skyraid::consts::*;
use skyraid::input::{Action, InputState};
use skyraid::scene::{MonospaceMetrics, PresentFrame, Scene, TextMetricsCache, build_scene};
use skyraid::sim::{GameEvent, GameState, tick};
use skyraid::tuning::Tuning;

/// Frame interval handed to the sim, matching a 60 Hz display driver
const FRAME_MS: f32 = 1000.0 / 60.0;

struct Options {
    seed: u64,
    tuning_path: Option<String>,
    seconds: f32,
}

fn parse_args() -> Options {
    let mut options = Options {
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
        tuning_path: None,
        seconds: 60.0,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tuning" => options.tuning_path = args.next(),
            "--seconds" => {
                if let Some(s) = args.next().and_then(|s| s.parse().ok()) {
                    options.seconds = s;
                }
            }
            other => {
                if let Ok(seed) = other.parse() {
                    options.seed = seed;
                }
            }
        }
    }
    options
}

/// Render sink for the headless driver: counts frames and samples the scene
struct LogPresenter {
    frames: u64,
}

impl PresentFrame for LogPresenter {
    fn present(&mut self, scene: &Scene) {
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!(
                "frame {}: {} rects, {} texts",
                self.frames,
                scene.rects.len(),
                scene.texts.len()
            );
        }
    }
}

/// Stand-in pilot: hold fire, dodge the nearest incoming bullet, otherwise
/// line up under the nearest enemy.
fn autopilot(state: &GameState, input: &mut InputState) {
    input.press(Action::Fire);
    input.release(Action::Left);
    input.release(Action::Right);

    let player_x = state.player.pos.x;

    // Nearest enemy bullet that is above us and falling into our column
    let threat = state
        .enemy_bullets
        .iter_active()
        .filter(|b| b.pos.y < state.player.pos.y && (b.pos.x - player_x).abs() < 40.0)
        .min_by(|a, b| {
            let da = (state.player.pos - a.pos).length_squared();
            let db = (state.player.pos - b.pos).length_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.pos);

    if let Some(threat) = threat {
        // Sidestep away from the bullet, toward the roomier side
        if threat.x > player_x || player_x > WORLD_WIDTH - 60.0 {
            input.press(Action::Left);
        } else {
            input.press(Action::Right);
        }
        return;
    }

    // No threat: drift under the nearest enemy to land shots
    let target = state
        .enemies
        .iter()
        .filter(|e| e.active)
        .min_by(|a, b| {
            let da = (a.pos.x - player_x).abs();
            let db = (b.pos.x - player_x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos);

    if let Some(target) = target {
        if target.x < player_x - 10.0 {
            input.press(Action::Left);
        } else if target.x > player_x + 10.0 {
            input.press(Action::Right);
        }
    }
}

fn main() {
    env_logger::init();
    let options = parse_args();

    let tuning = match &options.tuning_path {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Skyraid starting with seed {}", options.seed);
    let mut state = GameState::new(options.seed, tuning);
    let mut input = InputState::new();
    let mut presenter = LogPresenter { frames: 0 };
    let mut metrics = TextMetricsCache::new(MonospaceMetrics);

    let mut sessions = 1u32;
    let mut best_score = 0u32;
    let total_frames = (options.seconds * 1000.0 / FRAME_MS) as u64;

    for _ in 0..total_frames {
        autopilot(&state, &mut input);
        tick(&mut state, &input, FRAME_MS);

        for event in &state.events {
            match event {
                GameEvent::EnemyKilled { pos } => {
                    log::debug!("enemy down at ({:.0}, {:.0}), score {}", pos.x, pos.y, state.score)
                }
                GameEvent::EnemyLeaked => log::debug!("enemy slipped past, lives {}", state.lives),
                GameEvent::PlayerHit => log::debug!("player hit, lives {}", state.lives),
                GameEvent::EnemyRammed => log::debug!("rammed an enemy, lives {}", state.lives),
                GameEvent::GameOver => {
                    best_score = best_score.max(state.score);
                    log::info!("session {sessions} over, score {}", state.score);
                }
                GameEvent::Restarted => {
                    sessions += 1;
                    log::info!("session {sessions} started");
                }
            }
        }

        input.advance();

        // Keystrokes land between frames, after the edge decay
        if state.game_over() {
            input.release(Action::Confirm);
            input.press(Action::Confirm);
        }

        let scene = build_scene(&state, &mut metrics);
        presenter.present(&scene);
    }

    best_score = best_score.max(state.score);
    log::info!(
        "done: {} frames, {} session(s), best score {}",
        presenter.frames,
        sessions,
        best_score
    );
    println!("best score: {best_score}");
}
