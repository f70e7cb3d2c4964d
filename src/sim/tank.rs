//! Tanks: shared movement/firing state plus player and enemy roles
//!
//! Movement is two-phase: a tank records an intended displacement, the
//! match tick collision-checks it, then either applies or discards it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ai::EnemyAi;
use super::geom::{Direction, Rect};
use super::projectile::{Owner, Projectile};
use crate::consts::{MAX_TANK_LEVEL, MIN_TANK_LEVEL, PLAYER_BASE_HEALTH};
use crate::settings::MatchConfig;

/// State shared by every tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: u32,
    pub rect: Rect,
    pub facing: Direction,
    pub health: i32,
    pub max_health: i32,
    /// 1..=3, scales bullet speed
    pub level: u8,
    /// Pixels per tick
    pub speed: f32,
    /// Displacement recorded for this tick, not yet applied
    pub pending: Vec2,
    /// Live bullets fired by this tank
    pub projectiles: Vec<Projectile>,
    pub max_projectiles: usize,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub owner: Owner,
}

impl Tank {
    pub fn new(id: u32, pos: Vec2, size: f32, health: i32, speed: f32, owner: Owner) -> Self {
        Self {
            id,
            rect: Rect::square(pos, size),
            facing: Direction::Up,
            health,
            max_health: health,
            level: MIN_TANK_LEVEL,
            speed,
            pending: Vec2::ZERO,
            projectiles: Vec::new(),
            max_projectiles: 1,
            shoot_cooldown: 0,
            owner,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }

    /// Record this tick's displacement and face `direction`
    pub fn set_intended_movement(&mut self, direction: Direction) {
        self.facing = direction;
        self.pending = direction.unit() * self.speed;
    }

    /// Where the tank would end up if the pending move were applied
    pub fn projected_rect(&self, bounds: &Rect) -> Rect {
        self.rect.translated(self.pending).clamped_within(bounds)
    }

    /// Commit the pending displacement. Only call after collision checking.
    pub fn apply_movement(&mut self, bounds: &Rect) {
        self.rect = self.projected_rect(bounds);
    }

    pub fn reset_movement(&mut self) {
        self.pending = Vec2::ZERO;
    }

    pub fn tick_cooldown(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Fire from the muzzle if a slot is free and the cooldown has elapsed.
    /// Fails silently otherwise.
    pub fn shoot(&mut self, config: &MatchConfig) -> Option<&Projectile> {
        if self.shoot_cooldown > 0 || self.projectiles.len() >= self.max_projectiles {
            return None;
        }

        let half_tank = self.rect.size * 0.5;
        let muzzle = self.rect.center() + self.facing.unit() * half_tank;
        let pos = muzzle - Vec2::splat(config.bullet_size / 2.0);

        self.projectiles.push(Projectile {
            rect: Rect::square(pos, config.bullet_size),
            direction: self.facing,
            speed: config.bullet_speed * f32::from(self.level),
            damage: config.bullet_damage,
            owner: self.owner,
        });
        self.shoot_cooldown = config.shoot_cooldown_ticks;
        self.projectiles.last()
    }

    /// Subtract damage; returns true iff health is now at or below zero.
    /// Removal and respawn are the caller's job.
    pub fn receive_hit(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.is_destroyed()
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Raise level by one (capped), with one extra point of max and current health
    pub fn upgrade(&mut self) {
        if self.level < MAX_TANK_LEVEL {
            self.level += 1;
            self.max_health += 1;
            self.health = (self.health + 1).min(self.max_health);
        }
    }
}

/// Enemy tank variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyClass {
    Normal,
    Fast,
    Armor,
    /// Drops an item when destroyed
    Target,
}

/// Per-class tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    /// Relative to the base enemy speed
    pub speed_multiplier: f32,
    pub health: i32,
    pub drops_item: bool,
}

impl EnemyClass {
    pub const NON_TARGET: [EnemyClass; 3] = [EnemyClass::Normal, EnemyClass::Fast, EnemyClass::Armor];

    /// Capability table
    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyClass::Normal => EnemyStats {
                speed_multiplier: 1.0,
                health: 1,
                drops_item: false,
            },
            EnemyClass::Fast => EnemyStats {
                speed_multiplier: 1.5,
                health: 2,
                drops_item: false,
            },
            EnemyClass::Armor => EnemyStats {
                speed_multiplier: 0.8,
                health: 3,
                drops_item: false,
            },
            EnemyClass::Target => EnemyStats {
                speed_multiplier: 1.0,
                health: 4,
                drops_item: true,
            },
        }
    }
}

/// The player-controlled tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTank {
    pub tank: Tank,
    /// Spare lives; losing the last tank at zero ends the match
    pub lives: u32,
    pub spawn_point: Vec2,
    /// Ticks of remaining damage immunity
    pub invincible_ticks: u32,
    invincible_duration: u32,
    /// Took lethal damage with no lives left
    pub defeated: bool,
}

impl PlayerTank {
    pub fn new(id: u32, config: &MatchConfig) -> Self {
        Self {
            tank: Tank::new(
                id,
                config.player_spawn,
                config.tank_size,
                PLAYER_BASE_HEALTH,
                config.player_speed,
                Owner::Player,
            ),
            lives: config.player_lives,
            spawn_point: config.player_spawn,
            invincible_ticks: 0,
            invincible_duration: config.invincible_ticks,
            defeated: false,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Count down cooldown and invincibility
    pub fn tick_timers(&mut self) {
        self.tank.tick_cooldown();
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
    }

    /// Damage is ignored during the invincibility window. A hit that lands
    /// opens a new window. Returns true iff the hit was lethal.
    pub fn receive_hit(&mut self, damage: i32) -> bool {
        if self.is_invincible() || self.defeated {
            return false;
        }
        let destroyed = self.tank.receive_hit(damage);
        self.invincible_ticks = self.invincible_duration;
        destroyed
    }

    /// Move back to the spawn point facing up. Health is untouched.
    pub fn respawn_at_spawn_point(&mut self) {
        self.tank.rect.pos = self.spawn_point;
        self.tank.facing = Direction::Up;
        self.tank.reset_movement();
    }

    /// Back to a fresh level-1 tank (health = base max health).
    /// Bullets in flight beyond the restored cap are dropped, newest first.
    pub fn reset(&mut self) {
        self.tank.level = MIN_TANK_LEVEL;
        self.tank.max_health = PLAYER_BASE_HEALTH;
        self.tank.health = self.tank.max_health;
        self.tank.max_projectiles = 1;
        self.tank.projectiles.truncate(self.tank.max_projectiles);
    }

    /// Handle lethal damage: spend a life and respawn, or mark defeat.
    /// Returns true if the player is back in play.
    pub fn lose_life(&mut self) -> bool {
        if self.lives == 0 {
            self.defeated = true;
            return false;
        }
        self.lives -= 1;
        self.reset();
        self.respawn_at_spawn_point();
        true
    }
}

/// An AI-controlled tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTank {
    pub tank: Tank,
    pub class: EnemyClass,
    pub ai: EnemyAi,
}

impl EnemyTank {
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        class: EnemyClass,
        pos: Vec2,
        rng: &mut R,
        config: &MatchConfig,
    ) -> Self {
        let stats = class.stats();
        Self {
            tank: Tank::new(
                id,
                pos,
                config.tank_size,
                stats.health,
                config.enemy_speed * stats.speed_multiplier,
                Owner::Enemy(id),
            ),
            class,
            ai: EnemyAi::new(rng, config),
        }
    }

    pub fn drops_item(&self) -> bool {
        self.class.stats().drops_item
    }
}
