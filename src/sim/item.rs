//! Pickups dropped by Target-class enemies

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::tank::PlayerTank;
use crate::settings::MatchConfig;

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Upgrade the player tank one level
    Star,
    /// One extra life
    ExtraTank,
    /// Speed up the player's bullets already in flight
    Gun,
    /// One more simultaneous bullet (capped)
    Shell,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Star,
        ItemKind::ExtraTank,
        ItemKind::Gun,
        ItemKind::Shell,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A pickup lying on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub rect: Rect,
    pub ttl_ticks: u32,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2, config: &MatchConfig) -> Self {
        Self {
            id,
            kind,
            rect: Rect::square(pos, config.item_size),
            ttl_ticks: config.item_lifetime_ticks,
        }
    }

    /// Count down the lifetime; returns false once it has run out
    pub fn tick(&mut self) -> bool {
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
        self.ttl_ticks > 0
    }

    /// Apply this item's effect. The caller removes the item in the same step.
    pub fn apply_effect(&self, player: &mut PlayerTank, config: &MatchConfig) {
        match self.kind {
            ItemKind::Star => player.tank.upgrade(),
            ItemKind::ExtraTank => player.lives += 1,
            ItemKind::Gun => {
                for bullet in &mut player.tank.projectiles {
                    bullet.speed += config.gun_speed_bonus;
                }
            }
            ItemKind::Shell => {
                player.tank.max_projectiles =
                    (player.tank.max_projectiles + 1).min(config.max_projectile_cap);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(kind: ItemKind) -> (Item, PlayerTank, MatchConfig) {
        let config = MatchConfig::default();
        let item = Item::new(5, kind, Vec2::new(10.0, 10.0), &config);
        let player = PlayerTank::new(1, &config);
        (item, player, config)
    }

    #[test]
    fn test_lifetime_expires() {
        let (mut item, _, config) = setup(ItemKind::Star);
        for _ in 1..config.item_lifetime_ticks {
            assert!(item.tick());
        }
        assert!(!item.tick());
    }

    #[test]
    fn test_star_and_extra_tank() {
        let (star, mut player, config) = setup(ItemKind::Star);
        star.apply_effect(&mut player, &config);
        assert_eq!(player.tank.level, 2);

        let (extra, _, _) = setup(ItemKind::ExtraTank);
        let lives = player.lives;
        extra.apply_effect(&mut player, &config);
        assert_eq!(player.lives, lives + 1);
    }

    #[test]
    fn test_gun_speeds_live_bullets() {
        let (gun, mut player, config) = setup(ItemKind::Gun);
        player.tank.shoot(&config);
        let before = player.tank.projectiles[0].speed;
        gun.apply_effect(&mut player, &config);
        assert_eq!(player.tank.projectiles[0].speed, before + config.gun_speed_bonus);
    }

    #[test]
    fn test_shell_capped() {
        let (shell, mut player, config) = setup(ItemKind::Shell);
        for _ in 0..4 {
            shell.apply_effect(&mut player, &config);
        }
        assert_eq!(player.tank.max_projectiles, config.max_projectile_cap);
    }
}
