//! Simulation driver
//!
//! A [`Simulation`] owns the system, the run parameters, the force model
//! (Newtonian gravity unless told otherwise) and the integrator. Running it
//! writes the trajectory header, the step 0 snapshot, then steps `T` times
//! and records a snapshot every `Tsave` steps.
//! Diagnostics are recomputed right before every snapshot.

use std::io::Write;

use log::{debug, info, warn};

use crate::error::SimulationError;
use crate::io::output::TrajectoryWriter;
use crate::simulation::diagnostics::{compute_energy_and_angular_momentum, Snapshot};
use crate::simulation::forces::{ForceModel, NewtonianGravity};
use crate::simulation::integrator::VelocityVerlet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};

/// Conserved quantities at the start and end of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows: u64,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub initial_angular_momentum: f64,
    pub final_angular_momentum: f64,
}

impl RunSummary {
    fn new(first: &Snapshot) -> Self {
        Self {
            rows: 0,
            initial_energy: first.energy,
            final_energy: first.energy,
            initial_angular_momentum: first.angular_momentum,
            final_angular_momentum: first.angular_momentum,
        }
    }

    fn record(&mut self, snapshot: &Snapshot) {
        self.rows += 1;
        self.final_energy = snapshot.energy;
        self.final_angular_momentum = snapshot.angular_momentum;
    }

    /// |E_final - E_initial| / |E_initial|
    pub fn energy_drift(&self) -> f64 {
        relative_change(self.initial_energy, self.final_energy)
    }

    /// ||L|_final - |L|_initial| / |L|_initial
    pub fn angular_momentum_drift(&self) -> f64 {
        relative_change(self.initial_angular_momentum, self.final_angular_momentum)
    }
}

fn relative_change(initial: f64, last: f64) -> f64 {
    let delta = (last - initial).abs();
    if initial == 0.0 {
        delta
    } else {
        delta / initial.abs()
    }
}

pub struct Simulation<F: ForceModel = NewtonianGravity> {
    pub parameters: Parameters,
    pub system: System,
    pub forces: F,
    integrator: VelocityVerlet,
    warned_non_finite: bool,
}

impl<F: ForceModel> Simulation<F> {
    pub fn new(bodies: Vec<Body>, parameters: Parameters, forces: F) -> Result<Self, SimulationError> {
        if parameters.save_every == 0 {
            return Err(SimulationError::InvalidParameters("save interval must be at least 1".into()));
        }
        if !parameters.dt.is_finite() {
            return Err(SimulationError::InvalidParameters(format!("time step must be finite, got {}", parameters.dt)));
        }

        Ok(Self {
            parameters,
            system: System::new(bodies),
            forces,
            integrator: VelocityVerlet::new(),
            warned_non_finite: false,
        })
    }

    /// Advance the system by one step of `dt`
    pub fn step(&mut self) -> Result<(), SimulationError> {
        self.integrator.step(&mut self.system, &self.forces, self.parameters.dt)
    }

    /// Recompute diagnostics and record the current state at `step`
    fn snapshot(&mut self, step: u64) -> Result<Snapshot, SimulationError> {
        // exact time rather than the accumulated sum of dt
        self.system.t = self.parameters.time_at(step);
        compute_energy_and_angular_momentum(&mut self.system, &self.forces)?;
        let snapshot = Snapshot::capture(&self.system, self.system.t)?;

        if !self.warned_non_finite && !snapshot.is_finite() {
            warn!("non-finite values in the state at t = {}", snapshot.time);
            self.warned_non_finite = true;
        }
        Ok(snapshot)
    }

    /// Run all steps, handing each snapshot to `sink` in order
    pub fn run_with<S>(&mut self, mut sink: S) -> Result<RunSummary, SimulationError>
    where
        S: FnMut(&Snapshot) -> Result<(), SimulationError>,
    {
        let first = self.snapshot(0)?;
        let mut summary = RunSummary::new(&first);
        sink(&first)?;
        summary.record(&first);

        for step in 1..=self.parameters.steps {
            self.step()?;

            if self.parameters.is_save_step(step) {
                let snapshot = self.snapshot(step)?;
                debug!("time: {}", snapshot.time);
                sink(&snapshot)?;
                summary.record(&snapshot);
            }
        }
        Ok(summary)
    }

    /// Run and write the full trajectory, header included
    pub fn run<W: Write>(&mut self, writer: &mut TrajectoryWriter<W>) -> Result<RunSummary, SimulationError> {
        writer.write_header(&self.parameters, &self.system.bodies)?;
        let summary = self.run_with(|s| writer.write_snapshot(s).map_err(SimulationError::from))?;
        writer.flush()?;

        info!(
            "wrote {} snapshots, relative energy drift {:.3e}, relative angular momentum drift {:.3e}",
            summary.rows,
            summary.energy_drift(),
            summary.angular_momentum_drift()
        );
        Ok(summary)
    }

    /// Run and keep every snapshot in memory
    pub fn run_collect(&mut self) -> Result<Vec<Snapshot>, SimulationError> {
        let mut snapshots = Vec::new();
        self.run_with(|s| {
            snapshots.push(s.clone());
            Ok(())
        })?;
        Ok(snapshots)
    }
}
