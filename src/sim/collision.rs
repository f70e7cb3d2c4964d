//! Collision queries over axis-aligned rectangles
//!
//! Purely discrete: one overlap test per tick at the entity's current
//! position. A projectile faster than an obstacle is wide can pass through it.

use super::geom::Rect;
use super::structure::Structure;

/// What a projectile struck, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    /// Index into the structure list
    Structure(usize),
    Headquarters,
    /// Key supplied with the tank's rect
    Tank(usize),
}

/// Whether a tank occupying `rect` would overlap terrain it cannot drive through
pub fn tank_blocked(rect: &Rect, structures: &[Structure], headquarters: &Structure) -> bool {
    std::iter::once(headquarters)
        .chain(structures)
        .any(|s| !s.destroyed && !s.can_pass_tank() && rect.overlaps(&s.rect))
}

/// First structure that stops a bullet. Pass-through terrain is skipped so a
/// forest or river never shields whatever lies beneath it.
pub fn blocking_structure(rect: &Rect, structures: &[Structure]) -> Option<usize> {
    structures
        .iter()
        .position(|s| !s.destroyed && !s.can_pass_bullet() && rect.overlaps(&s.rect))
}

/// Resolve a projectile: structures first, then the headquarters, then tanks.
/// `tanks` yields `(key, rect)` for each live opposing tank.
pub fn projectile_hit<'a>(
    rect: &Rect,
    structures: &[Structure],
    headquarters: &Structure,
    tanks: impl IntoIterator<Item = (usize, &'a Rect)>,
) -> Option<ProjectileHit> {
    if let Some(i) = blocking_structure(rect, structures) {
        return Some(ProjectileHit::Structure(i));
    }
    if rect.overlaps(&headquarters.rect) {
        return Some(ProjectileHit::Headquarters);
    }
    tanks
        .into_iter()
        .find(|(_, t)| rect.overlaps(t))
        .map(|(key, _)| ProjectileHit::Tank(key))
}
