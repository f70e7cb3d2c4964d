//! Match configuration
//!
//! Built once at startup (defaults, optionally overridden from a JSON file),
//! validated, then handed to the match state. Nothing in the simulation reads
//! global tuning directly.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rect;

/// Error type for configuration loading and validation.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io(std::io::Error),
    /// Config text is not valid JSON for `MatchConfig`.
    Parse(serde_json::Error),
    /// Config parsed but holds unusable values.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read config: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config: {e}"),
            Self::Invalid(msg) => write!(f, "Invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Immutable match tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Level identifier passed to the tile map loader
    pub level: u32,

    // === Geometry ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub tile_size: f32,
    pub tank_size: f32,
    pub bullet_size: f32,
    pub item_size: f32,
    pub headquarters_size: f32,

    // === Tanks ===
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub player_lives: u32,
    pub player_spawn: Vec2,
    pub shoot_cooldown_ticks: u32,
    pub invincible_ticks: u32,

    // === Projectiles ===
    /// Speed per tank level
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub gun_speed_bonus: f32,
    /// Upper bound the Shell item can raise a tank's projectile cap to
    pub max_projectile_cap: usize,

    // === Enemies ===
    pub enemy_quota: u32,
    pub max_live_enemies: usize,
    pub spawn_interval_ticks: u32,
    pub enemy_spawn_points: Vec<Vec2>,
    /// Consecutive non-Target spawns that force a Target spawn
    pub target_streak_limit: u32,
    pub target_spawn_chance: f64,
    pub ai_interval_min_ticks: u32,
    pub ai_interval_max_ticks: u32,
    pub ai_fire_chance: f64,

    // === Items ===
    pub item_lifetime_ticks: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            level: 1,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tile_size: TILE_SIZE,
            tank_size: TANK_SIZE,
            bullet_size: BULLET_SIZE,
            item_size: ITEM_SIZE,
            headquarters_size: HEADQUARTERS_SIZE,

            player_speed: PLAYER_SPEED,
            enemy_speed: ENEMY_SPEED,
            player_lives: PLAYER_LIVES,
            // Open pocket in the forest maze, south of the map centre
            player_spawn: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 200.0),
            shoot_cooldown_ticks: SHOOT_COOLDOWN_TICKS,
            invincible_ticks: INVINCIBLE_TICKS,

            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,
            gun_speed_bonus: GUN_SPEED_BONUS,
            max_projectile_cap: MAX_PROJECTILE_CAP,

            enemy_quota: ENEMY_QUOTA,
            max_live_enemies: MAX_LIVE_ENEMIES,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            enemy_spawn_points: vec![
                Vec2::new(50.0, 50.0),
                Vec2::new(SCREEN_WIDTH / 2.0 - 20.0, 50.0),
                Vec2::new(SCREEN_WIDTH - 100.0, 50.0),
            ],
            target_streak_limit: TARGET_STREAK_LIMIT,
            target_spawn_chance: TARGET_SPAWN_CHANCE,
            ai_interval_min_ticks: AI_INTERVAL_MIN_TICKS,
            ai_interval_max_ticks: AI_INTERVAL_MAX_TICKS,
            ai_fire_chance: AI_FIRE_CHANCE,

            item_lifetime_ticks: ITEM_LIFETIME_TICKS,
        }
    }
}

impl MatchConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("tile_size", self.tile_size),
            ("tank_size", self.tank_size),
            ("bullet_size", self.bullet_size),
            ("item_size", self.item_size),
            ("headquarters_size", self.headquarters_size),
        ];
        for (name, value) in sizes {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.enemy_spawn_points.is_empty() {
            return Err(ConfigError::Invalid("no enemy spawn points".into()));
        }
        if self.ai_interval_min_ticks == 0
            || self.ai_interval_min_ticks > self.ai_interval_max_ticks
        {
            return Err(ConfigError::Invalid(format!(
                "AI interval {}..={} is empty",
                self.ai_interval_min_ticks, self.ai_interval_max_ticks
            )));
        }
        for (name, p) in [
            ("target_spawn_chance", self.target_spawn_chance),
            ("ai_fire_chance", self.ai_fire_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("{name} must be within [0, 1]")));
            }
        }
        if self.enemy_quota == 0 || self.max_live_enemies == 0 {
            return Err(ConfigError::Invalid("enemy quota and live cap must be non-zero".into()));
        }
        if self.max_projectile_cap == 0 {
            return Err(ConfigError::Invalid("max_projectile_cap must be non-zero".into()));
        }
        Ok(())
    }

    /// The playable area; projectiles expire once they leave it
    pub fn screen_rect(&self) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(self.screen_width, self.screen_height))
    }

    /// Grid columns that fit on screen
    pub fn max_cols(&self) -> usize {
        (self.screen_width / self.tile_size).floor() as usize
    }

    /// Grid rows that fit on screen
    pub fn max_rows(&self) -> usize {
        (self.screen_height / self.tile_size).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_cols(), 26);
        assert_eq!(config.max_rows(), 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MatchConfig::from_json_str(r#"{ "enemy_quota": 5, "player_lives": 1 }"#)
            .expect("partial config should parse");
        assert_eq!(config.enemy_quota, 5);
        assert_eq!(config.player_lives, 1);
        assert_eq!(config.tank_size, TANK_SIZE);
        assert_eq!(config.enemy_spawn_points.len(), 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = MatchConfig::from_json_str(r#"{ "enemy_spawn_points": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = MatchConfig::from_json_str(
            r#"{ "ai_interval_min_ticks": 50, "ai_interval_max_ticks": 10 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = MatchConfig::from_json_str(r#"{ "ai_fire_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = MatchConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MatchConfig::load("/nonexistent/tank-war/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
