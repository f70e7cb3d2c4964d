//! Projectiles
//!
//! A projectile only knows how to move and when it has left the screen.
//! Hits against terrain and tanks are resolved by the match tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Direction, Rect};

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    /// Enemy tank id
    Enemy(u32),
}

/// A bullet in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub direction: Direction,
    /// Pixels per tick
    pub speed: f32,
    pub damage: i32,
    pub owner: Owner,
}

impl Projectile {
    /// Move one tick; returns false once the projectile no longer touches `bounds`
    pub fn advance(&mut self, bounds: &Rect) -> bool {
        self.rect.pos += self.direction.unit() * self.speed;
        self.rect.overlaps(bounds)
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet(pos: Vec2, direction: Direction, speed: f32) -> Projectile {
        Projectile {
            rect: Rect::square(pos, 10.0),
            direction,
            speed,
            damage: 1,
            owner: Owner::Player,
        }
    }

    #[test]
    fn test_advance_moves_along_direction() {
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
        let mut p = bullet(Vec2::new(100.0, 100.0), Direction::Left, 8.0);
        assert!(p.advance(&bounds));
        assert_eq!(p.pos(), Vec2::new(92.0, 100.0));
    }

    #[test]
    fn test_expires_after_leaving_bounds() {
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
        let mut p = bullet(Vec2::new(100.0, 4.0), Direction::Up, 8.0);
        // Still partially on screen
        assert!(p.advance(&bounds));
        assert_eq!(p.pos().y, -4.0);
        assert!(!p.advance(&bounds));
    }
}
