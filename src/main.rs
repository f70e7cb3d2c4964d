//! Tank War - headless native driver
//!
//! Runs one match with an autopilot at the keyboard and reports the result.
//! `RUST_LOG` controls how much of the match is logged.

// Allow print in the CLI binary
#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tank_war::MatchConfig;
use tank_war::audio::{AudioManager, LogAudio};
use tank_war::consts::SIM_DT;
use tank_war::platform::{FixedStep, InputTracker, Key};
use tank_war::sim::{GamePhase, GameState, tick};

/// Tank War - defend the headquarters against waves of enemy tanks
#[derive(Parser, Debug)]
#[command(name = "tank-war")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum simulation ticks before giving up
    #[arg(short, long, default_value = "36000")]
    ticks: u64,

    /// JSON match configuration; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Presses keys the way a restless player would
struct Autopilot {
    rng: Pcg32,
    held: Option<Key>,
    fire_down: bool,
}

impl Autopilot {
    const DIRECTIONS: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: None,
            fire_down: false,
        }
    }

    /// Feed one frame's worth of key events
    fn press(&mut self, input: &mut InputTracker, phase: GamePhase) {
        if phase == GamePhase::Start {
            input.key_down(Key::Start);
            return;
        }

        if self.fire_down {
            input.key_up(Key::Fire);
            self.fire_down = false;
        } else if self.rng.random_bool(0.2) {
            input.key_down(Key::Fire);
            self.fire_down = true;
        }

        if self.held.is_none() || self.rng.random_bool(1.0 / 30.0) {
            if let Some(key) = self.held.take() {
                input.key_up(key);
            }
            if self.rng.random_bool(0.85) {
                let key = Self::DIRECTIONS[self.rng.random_range(0..Self::DIRECTIONS.len())];
                input.key_down(key);
                self.held = Some(key);
            }
        }
    }

    /// Irregular frame times, as a real host would report them
    fn frame_dt(&mut self) -> f32 {
        self.rng.random_range(SIM_DT * 0.5..SIM_DT * 2.0)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MatchConfig::load(path),
        None => Ok(MatchConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to build match: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Tank War (headless) starting with seed {} on level {} ({}x{})",
        seed,
        state.map().level,
        state.map().cols(),
        state.map().rows()
    );

    let mut audio = AudioManager::new(Some(Box::new(LogAudio)));
    let mut input = InputTracker::new();
    let mut clock = FixedStep::new();
    let mut autopilot = Autopilot::new(seed ^ 0x5eed);
    let mut ticks = 0;

    'frames: while ticks < args.ticks {
        autopilot.press(&mut input, state.phase);
        for _ in 0..clock.advance(autopilot.frame_dt()) {
            let tick_input = input.take_input();
            tick(&mut state, &tick_input);
            audio.play_events(&state.events);
            ticks += 1;
            if state.outcome().is_some() || ticks >= args.ticks {
                break 'frames;
            }
        }
    }

    let result = match state.outcome() {
        Some(outcome) => format!("{:?}", outcome),
        None => "Unfinished".to_string(),
    };
    log::info!("Match ended after {} ticks: {}", state.time_ticks, result);
    println!(
        "seed={} result={} ticks={} enemies_destroyed={} lives={} level={} live_enemies={} projectiles={}",
        seed,
        result,
        state.time_ticks,
        state.enemies_destroyed,
        state.player.lives,
        state.player.tank.level,
        state.enemies.len(),
        state.projectile_count()
    );
    ExitCode::SUCCESS
}
