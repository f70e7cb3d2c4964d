//! Platform abstraction layer
//!
//! Collaborators that sit between a host (window, terminal, test harness)
//! and the simulation:
//! - Input events folded into one `TickInput` per tick
//! - Wall-clock time turned into whole fixed-size ticks

pub mod clock;
pub mod input;

pub use clock::FixedStep;
pub use input::{InputTracker, Key};
