//! Numerical parameters for a run
//!
//! `Parameters` holds the fixed step size, the number of steps to take and
//! how often a snapshot is written. Step 0 is always written.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub dt: f64, // time step
    pub steps: u64, // total number of steps T
    pub save_every: u64, // steps between snapshots Tsave, >= 1
}

impl Parameters {
    pub fn new(dt: f64, steps: u64, save_every: u64) -> Self {
        Self { dt, steps, save_every }
    }

    /// Whether the state after `step` steps gets written out
    pub fn is_save_step(&self, step: u64) -> bool {
        step % self.save_every == 0
    }

    /// Number of snapshot rows a full run produces, including step 0
    pub fn snapshot_count(&self) -> u64 {
        1 + self.steps / self.save_every
    }

    /// Simulation time after `step` steps, computed directly rather than accumulated
    pub fn time_at(&self, step: u64) -> f64 {
        step as f64 * self.dt
    }
}
