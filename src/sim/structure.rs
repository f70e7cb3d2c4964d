//! Terrain structures
//!
//! One struct for every terrain piece; the per-kind behaviour comes from a
//! small capability table instead of a type hierarchy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::{BRICK_HP, HEADQUARTERS_HP, IRON_HP};

/// Structure types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureKind {
    Brick,
    Iron,
    River,
    Forest,
    Headquarters,
}

/// Collision and damage rules for a structure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureTraits {
    pub can_pass_tank: bool,
    pub can_pass_bullet: bool,
    /// Hit points are never reduced
    pub indestructible: bool,
    pub hit_points: i32,
}

impl StructureKind {
    /// Capability table
    pub const fn traits(self) -> StructureTraits {
        match self {
            StructureKind::Brick => StructureTraits {
                can_pass_tank: false,
                can_pass_bullet: false,
                indestructible: false,
                hit_points: BRICK_HP,
            },
            StructureKind::Iron => StructureTraits {
                can_pass_tank: false,
                can_pass_bullet: false,
                indestructible: true,
                hit_points: IRON_HP,
            },
            StructureKind::River => StructureTraits {
                can_pass_tank: false,
                can_pass_bullet: true,
                indestructible: true,
                hit_points: 1,
            },
            StructureKind::Forest => StructureTraits {
                can_pass_tank: true,
                can_pass_bullet: true,
                indestructible: true,
                hit_points: 1,
            },
            StructureKind::Headquarters => StructureTraits {
                can_pass_tank: false,
                can_pass_bullet: false,
                indestructible: false,
                hit_points: HEADQUARTERS_HP,
            },
        }
    }
}

/// A terrain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub id: u32,
    pub kind: StructureKind,
    pub rect: Rect,
    pub hit_points: i32,
    /// Set once hit points reach zero. Bricks are then removed from the
    /// world; the headquarters stays in place and renders as wrecked.
    pub destroyed: bool,
}

impl Structure {
    pub fn new(id: u32, kind: StructureKind, pos: Vec2, side: f32) -> Self {
        Self {
            id,
            kind,
            rect: Rect::square(pos, side),
            hit_points: kind.traits().hit_points,
            destroyed: false,
        }
    }

    pub fn can_pass_tank(&self) -> bool {
        self.kind.traits().can_pass_tank
    }

    pub fn can_pass_bullet(&self) -> bool {
        self.kind.traits().can_pass_bullet
    }

    /// Apply damage; returns true iff the structure is now destroyed
    pub fn receive_hit(&mut self, damage: i32) -> bool {
        if self.kind.traits().indestructible {
            return false;
        }
        self.hit_points -= damage;
        if self.hit_points <= 0 {
            self.destroyed = true;
        }
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(kind: StructureKind) -> Structure {
        Structure::new(1, kind, Vec2::ZERO, 30.0)
    }

    #[test]
    fn test_pass_rules() {
        let rules: Vec<_> = [
            StructureKind::Brick,
            StructureKind::Iron,
            StructureKind::River,
            StructureKind::Forest,
            StructureKind::Headquarters,
        ]
        .into_iter()
        .map(|k| (make(k).can_pass_tank(), make(k).can_pass_bullet()))
        .collect();
        assert_eq!(
            rules,
            vec![
                (false, false),
                (false, false),
                (false, true),
                (true, true),
                (false, false)
            ]
        );
    }

    #[test]
    fn test_brick_destroyed_by_single_hit() {
        let mut brick = make(StructureKind::Brick);
        assert!(brick.receive_hit(1));
        assert!(brick.destroyed);
    }

    #[test]
    fn test_iron_never_destroyed() {
        let mut iron = make(StructureKind::Iron);
        for _ in 0..1000 {
            assert!(!iron.receive_hit(1));
        }
        assert_eq!(iron.hit_points, IRON_HP);
        assert!(!iron.destroyed);
    }

    #[test]
    fn test_headquarters_flags_destroyed() {
        let mut hq = make(StructureKind::Headquarters);
        assert!(hq.receive_hit(1));
        assert!(hq.destroyed);
    }
}
