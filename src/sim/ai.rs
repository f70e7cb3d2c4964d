//! Enemy AI: randomized wandering and opportunistic fire
//!
//! No pathfinding. Each enemy counts ticks up to a randomly drawn interval,
//! then picks a fresh random heading. Firing is an independent per-tick roll.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Direction;
use crate::settings::MatchConfig;

/// What an enemy wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiDecision {
    /// New heading, if the move timer elapsed this tick
    pub turn: Option<Direction>,
    pub fire: bool,
}

/// Per-enemy move timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyAi {
    pub move_timer: u32,
    pub move_interval: u32,
}

impl EnemyAi {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, config: &MatchConfig) -> Self {
        Self {
            move_timer: 0,
            move_interval: draw_interval(rng, config),
        }
    }

    /// Advance the timer one tick and roll for a turn and a shot
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &MatchConfig) -> AiDecision {
        let mut decision = AiDecision::default();

        self.move_timer += 1;
        if self.move_timer >= self.move_interval {
            decision.turn = Some(Direction::ALL[rng.random_range(0..Direction::ALL.len())]);
            self.move_timer = 0;
            self.move_interval = draw_interval(rng, config);
        }

        decision.fire = rng.random_bool(config.ai_fire_chance);
        decision
    }
}

fn draw_interval<R: Rng + ?Sized>(rng: &mut R, config: &MatchConfig) -> u32 {
    rng.random_range(config.ai_interval_min_ticks..=config.ai_interval_max_ticks)
}
