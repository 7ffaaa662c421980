//! Force models for the n-body engine
//!
//! Direct all-pairs Newtonian gravity in 3D. Each pass reads a frozen
//! slice of positions and writes into a separate output buffer, so callers
//! can evaluate forces on a candidate state without touching the bodies.

use serde::Deserialize;

use crate::error::SimulationError;
use crate::simulation::states::{Direction, NVec3};

/// What to do when two bodies sit at exactly the same position
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SingularityPolicy {
    /// Divide by zero anyway and let the non-finite values flow through the run
    #[default]
    Propagate,
    /// Stop with [`SimulationError::Singularity`]
    Error,
}

/// A conservative force law acting between the bodies of a system
///
/// Both methods overwrite `out[i]` for every body `i`. `masses`,
/// `positions` and `out` all have one entry per body, in system order.
pub trait ForceModel {
    /// Acceleration on every body
    fn accelerations(&self, masses: &[f64], positions: &[NVec3], out: &mut [NVec3]) -> Result<(), SimulationError>;

    /// Potential energy of every body due to all the others.
    ///
    /// Every pair contributes to both of its bodies, so the sum of `out`
    /// is twice the system's potential energy.
    fn potential_energies(&self, masses: &[f64], positions: &[NVec3], out: &mut [f64]) -> Result<(), SimulationError>;
}

/// 3D Newtonian gravity, direct n^2 sum, no softening
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant, 1 in problem units
    pub singularity: SingularityPolicy, // zero separation handling
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            g: 1.0,
            singularity: SingularityPolicy::Propagate,
        }
    }
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { g, ..Self::default() }
    }

    pub fn with_singularity(mut self, policy: SingularityPolicy) -> Self {
        self.singularity = policy;
        self
    }

    fn check_separation(&self, r2: f64, p: usize, j: usize) -> Result<(), SimulationError> {
        if r2 == 0.0 && self.singularity == SingularityPolicy::Error {
            return Err(SimulationError::Singularity { first: p.min(j), second: p.max(j) });
        }
        Ok(())
    }
}

impl ForceModel for NewtonianGravity {
    fn accelerations(&self, masses: &[f64], positions: &[NVec3], out: &mut [NVec3]) -> Result<(), SimulationError> {
        // Number of bodies in the system
        let n = positions.len();
        debug_assert_eq!(masses.len(), n);
        debug_assert_eq!(out.len(), n);

        // Loop over every ordered pair (p, j) with p != j
        for p in 0..n {
            let xp = positions[p]; // position of body p
            let mut acc = NVec3::zeros(); // running sum for body p

            for j in 0..n {
                if j == p {
                    continue;
                }
                let xj = positions[j]; // position of body j
                let mj = masses[j]; // mass of body j

                // Squared separation |r_j - r_p|^2
                let r2 = (xj - xp).norm_squared();

                // Coincident bodies: either stop here or carry on into inf/NaN
                self.check_separation(r2, p, j)?;

                // Unit vector from p toward j; p is pulled along it
                let e_pj = xp.direction(&xj);

                // Newton: a_p += G m_j / |r|^2 along e_pj
                acc += (self.g * mj / r2) * e_pj;
            }

            // Only body p's slot is written, positions stay untouched
            out[p] = acc;
        }
        Ok(())
    }

    fn potential_energies(&self, masses: &[f64], positions: &[NVec3], out: &mut [f64]) -> Result<(), SimulationError> {
        let n = positions.len();
        debug_assert_eq!(masses.len(), n);
        debug_assert_eq!(out.len(), n);

        for p in 0..n {
            let mp = masses[p]; // mass of body p
            let mut energy = 0.0;

            for j in 0..n {
                if j == p {
                    continue;
                }
                // Separation between j and p
                let r2 = (positions[j] - positions[p]).norm_squared();
                self.check_separation(r2, p, j)?;

                // -G m_j m_p / |r|, this pair is counted again from j's side
                energy += -(self.g * masses[j] * mp) / r2.sqrt();
            }
            out[p] = energy;
        }
        Ok(())
    }
}
