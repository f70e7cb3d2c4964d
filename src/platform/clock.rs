//! Fixed timestep accumulator

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap accepted in one go (seconds). Anything longer, such as
/// the host being suspended, is treated as this.
const MAX_FRAME_DT: f32 = 0.1;

/// Turns variable frame times into a whole number of simulation ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStep {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Add `dt` seconds of elapsed time; returns how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.max_substeps {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Drop any partial tick, e.g. after a pause or a new match
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
