//! Tank War - A top-down headquarters-defence tank game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tanks, projectiles, terrain, match flow)
//! - `settings`: Match configuration, loaded once and injected everywhere
//! - `platform`: Input and clock collaborators feeding the simulation
//! - `audio`: Fire-and-forget sound effects driven by simulation events

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, MatchConfig};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playable area (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const TILE_SIZE: f32 = 30.0;

    /// Entity sizes (all square)
    pub const TANK_SIZE: f32 = 40.0;
    pub const BULLET_SIZE: f32 = 10.0;
    pub const ITEM_SIZE: f32 = 20.0;
    pub const HEADQUARTERS_SIZE: f32 = 40.0;

    /// Movement (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Bullet speed per tank level (pixels per tick)
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_DAMAGE: i32 = 1;
    /// Added to live player bullets by the Gun item
    pub const GUN_SPEED_BONUS: f32 = 2.0;

    /// Hit points
    pub const BRICK_HP: i32 = 1;
    pub const IRON_HP: i32 = 999;
    pub const HEADQUARTERS_HP: i32 = 1;

    /// Tank levels
    pub const MIN_TANK_LEVEL: u8 = 1;
    pub const MAX_TANK_LEVEL: u8 = 3;
    pub const PLAYER_BASE_HEALTH: i32 = 1;
    pub const PLAYER_LIVES: u32 = 3;
    pub const MAX_PROJECTILE_CAP: usize = 2;

    /// Timers (ticks)
    pub const SHOOT_COOLDOWN_TICKS: u32 = 30;
    pub const INVINCIBLE_TICKS: u32 = 3 * TICKS_PER_SECOND; // ~3 seconds
    pub const ITEM_LIFETIME_TICKS: u32 = 300;
    pub const SPAWN_INTERVAL_TICKS: u32 = 90; // 1.5 seconds
    pub const AI_INTERVAL_MIN_TICKS: u32 = 60;
    pub const AI_INTERVAL_MAX_TICKS: u32 = 120;

    /// Enemy waves
    pub const ENEMY_QUOTA: u32 = 20;
    pub const MAX_LIVE_ENEMIES: usize = 5;
    pub const TARGET_STREAK_LIMIT: u32 = 3;
    pub const TARGET_SPAWN_CHANCE: f64 = 0.25;
    pub const AI_FIRE_CHANCE: f64 = 0.01;
}
