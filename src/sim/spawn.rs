//! Enemy spawn policy
//!
//! Gates spawning on quota, live-enemy cap and cooldown, and chooses the
//! class with a streak rule: after `target_streak_limit` consecutive
//! non-Target spawns the next one is always a Target.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tank::EnemyClass;
use crate::settings::MatchConfig;

/// Spawn bookkeeping for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDirector {
    pub ticks_since_spawn: u32,
    /// Consecutive non-Target spawns
    pub non_target_streak: u32,
    pub spawned_total: u32,
}

impl SpawnDirector {
    /// Ready to spawn on the first tick of a match
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            ticks_since_spawn: config.spawn_interval_ticks,
            non_target_streak: 0,
            spawned_total: 0,
        }
    }

    pub fn tick(&mut self) {
        self.ticks_since_spawn = self.ticks_since_spawn.saturating_add(1);
    }

    /// Quota, concurrency and cooldown all allow another enemy
    pub fn can_spawn(&self, destroyed: u32, live: usize, config: &MatchConfig) -> bool {
        destroyed < config.enemy_quota
            && live < config.max_live_enemies
            && self.ticks_since_spawn >= config.spawn_interval_ticks
    }

    /// Choose the next class and update the streak
    pub fn pick_class<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &MatchConfig) -> EnemyClass {
        let class = if self.non_target_streak >= config.target_streak_limit
            || rng.random_bool(config.target_spawn_chance)
        {
            EnemyClass::Target
        } else {
            EnemyClass::NON_TARGET[rng.random_range(0..EnemyClass::NON_TARGET.len())]
        };

        if class == EnemyClass::Target {
            self.non_target_streak = 0;
        } else {
            self.non_target_streak += 1;
        }
        class
    }

    /// Record a completed spawn and restart the cooldown
    pub fn record_spawn(&mut self) {
        self.ticks_since_spawn = 0;
        self.spawned_total += 1;
    }
}
