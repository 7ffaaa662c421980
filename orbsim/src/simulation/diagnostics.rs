//! Conserved-quantity diagnostics and snapshot records
//!
//! A [`Snapshot`] is one output row: time, total energy, magnitude of the
//! total angular momentum and every body's position and velocity.

use crate::error::SimulationError;
use crate::simulation::forces::ForceModel;
use crate::simulation::states::{NVec3, System};

/// Recompute per-body energies and angular momentum.
pub fn compute_energy_and_angular_momentum(sys: &mut System, forces: &impl ForceModel) -> Result<(), SimulationError> {
    sys.recompute_diagnostics(forces)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub energy: f64, // sum of ke + 1/2 pe
    pub angular_momentum: f64, // |sum of L|
    pub states: Vec<(NVec3, NVec3)>, // (position, velocity) per body, input order
}

impl Snapshot {
    /// Record the system as it is now.
    ///
    /// Fails if any body's diagnostics are stale, i.e. the system was stepped
    /// since the last [`System::recompute_diagnostics`].
    pub fn capture(sys: &System, time: f64) -> Result<Self, SimulationError> {
        let energy = sys.total_energy().ok_or(SimulationError::StaleDiagnostics)?;
        let angular_momentum = sys
            .total_angular_momentum()
            .ok_or(SimulationError::StaleDiagnostics)?
            .norm();

        Ok(Self {
            time,
            energy,
            angular_momentum,
            states: sys.bodies.iter().map(|b| (b.position, b.velocity)).collect(),
        })
    }

    pub fn is_finite(&self) -> bool {
        self.energy.is_finite()
            && self.angular_momentum.is_finite()
            && self.states.iter().all(|(r, v)| r.iter().chain(v.iter()).all(|c| c.is_finite()))
    }
}
