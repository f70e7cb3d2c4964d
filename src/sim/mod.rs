//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod geom;
pub mod item;
pub mod map;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod structure;
pub mod tank;
pub mod tick;

pub use geom::{Direction, Rect};
pub use item::{Item, ItemKind};
pub use map::{MapError, TileMap};
pub use projectile::{Owner, Projectile};
pub use state::{GameEvent, GamePhase, GameState, Outcome, SetupError};
pub use structure::{Structure, StructureKind};
pub use tank::{EnemyClass, EnemyTank, PlayerTank, Tank};
pub use tick::{TickInput, tick};
