//! Fixed-step velocity Verlet integrator for the N-body system
//!
//! Two force evaluations per step. The step reads a frozen copy of the
//! current positions and builds the next positions in a second buffer;
//! nothing is written back to the bodies until both force passes are done.

use crate::error::SimulationError;
use crate::simulation::forces::ForceModel;
use crate::simulation::states::{NVec3, System};

/// Velocity Verlet stepper holding its scratch buffers between steps
#[derive(Debug, Default, Clone)]
pub struct VelocityVerlet {
    masses: Vec<f64>,
    front: Vec<NVec3>, // positions x_n
    back: Vec<NVec3>, // positions x_n+1
    a_old: Vec<NVec3>, // a_n
    a_new: Vec<NVec3>, // a_n+1
}

impl VelocityVerlet {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&mut self, sys: &System) {
        let n = sys.len(); // number of bodies

        // masses and x_n, reusing last step's allocations
        self.masses.clear();
        self.masses.extend(sys.bodies.iter().map(|b| b.mass()));
        self.front.clear();
        self.front.extend(sys.bodies.iter().map(|b| b.position));

        // Output buffers only need the right length, every slot is overwritten
        self.back.resize(n, NVec3::zeros());
        self.a_old.resize(n, NVec3::zeros());
        self.a_new.resize(n, NVec3::zeros());
    }

    /// Advance every body in `sys` by exactly one step `dt`.
    ///
    /// Uses two force evaluations per step. On error the system is left untouched.
    pub fn step<F: ForceModel>(&mut self, sys: &mut System, forces: &F, dt: f64) -> Result<(), SimulationError> {
        // Snapshot masses and positions x_n into the front buffers
        self.load(sys);

        let half_dt = 0.5 * dt; // half step dt/2

        // a_n from the frozen positions x_n
        forces.accelerations(&self.masses, &self.front, &mut self.a_old)?;

        // Full-step positions into the back buffer:
        // x_n+1 = x_n + v_n dt + 1/2 a_n dt^2
        // Reads only pre-step state, the bodies themselves are not written yet
        for ((next, b), a) in self.back.iter_mut().zip(sys.bodies.iter()).zip(self.a_old.iter()) {
            *next = b.position + b.velocity * dt + *a * (half_dt * dt);
        }

        // a_n+1 from the new positions x_n+1 (second force evaluation)
        forces.accelerations(&self.masses, &self.back, &mut self.a_new)?;

        // Commit everything at once:
        // x <- x_n+1
        // v_n+1 = v_n + 1/2 (a_n + a_n+1) dt
        // a <- a_n+1
        for (i, b) in sys.bodies.iter_mut().enumerate() {
            b.position = self.back[i];
            b.velocity += (self.a_old[i] + self.a_new[i]) * half_dt;
            b.acceleration = self.a_new[i];
        }

        // advance time: t_n+1 = t_n + dt
        sys.t += dt;

        // Cached energies / angular momentum now describe x_n, not x_n+1
        sys.invalidate_diagnostics();
        Ok(())
    }
}
