//! Core state types for the N-body simulation.
//!
//! Defines the 3D vector alias, a named point mass (`Body`) with its
//! cached diagnostics, and the ordered collection of bodies (`System`).
//!
//! Diagnostics are a cache: they are `None` until
//! [`System::recompute_diagnostics`] runs and are cleared again by every
//! integration step.

use nalgebra::Vector3;

use crate::error::SimulationError;
use crate::simulation::forces::ForceModel;

pub type NVec3 = Vector3<f64>;

/// Unit direction between two points, used by the force loop
pub trait Direction {
    /// `(to - self)` scaled to unit length.
    ///
    /// Coincident points give a zero-length difference, so every component
    /// of the result is NaN. Callers that care must check the separation first.
    fn direction(&self, to: &Self) -> Self;
}

impl Direction for NVec3 {
    fn direction(&self, to: &NVec3) -> NVec3 {
        let d = to - self;
        d / d.norm()
    }
}

/// Per-body diagnostic scalars, valid only for the instant they were computed at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDiagnostics {
    pub kinetic_energy: f64, // 1/2 m |v|^2
    pub potential_energy: f64, // sum over all other bodies, pairs counted from both sides
    pub angular_momentum: NVec3, // m (r x v) about the origin
}

#[derive(Debug, Clone)]
pub struct Body {
    name: String,
    mass: f64,
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3,
    diagnostics: Option<BodyDiagnostics>,
}

impl Body {
    /// New body at rest acceleration-wise; diagnostics start stale.
    pub fn new(name: impl Into<String>, mass: f64, position: NVec3, velocity: NVec3) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
            acceleration: NVec3::zeros(),
            diagnostics: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Separation between this body and `other`.
    /// Convenience for callers holding whole bodies; the engine works on position slices.
    pub fn distance(&self, other: &Body) -> f64 {
        (other.position - self.position).norm()
    }

    /// Unit vector pointing from this body toward `other`
    pub fn direction(&self, other: &Body) -> NVec3 {
        self.position.direction(&other.position)
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// `m (r x v)` measured about `origin`
    pub fn angular_momentum(&self, origin: &NVec3) -> NVec3 {
        self.mass * (self.position - origin).cross(&self.velocity)
    }

    /// Cached diagnostics, `None` when stale
    pub fn diagnostics(&self) -> Option<&BodyDiagnostics> {
        self.diagnostics.as_ref()
    }

    pub(crate) fn set_diagnostics(&mut self, diagnostics: BodyDiagnostics) {
        self.diagnostics = Some(diagnostics);
    }

    pub(crate) fn invalidate_diagnostics(&mut self) {
        self.diagnostics = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // ordered as in the initial conditions
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn positions(&self) -> Vec<NVec3> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.mass).collect()
    }

    /// Set every body's `acceleration` from the current positions.
    ///
    /// All accelerations are evaluated into a separate buffer before any
    /// body is written, so the result does not depend on body order.
    pub fn update_accelerations(&mut self, forces: &impl ForceModel) -> Result<(), SimulationError> {
        let positions = self.positions();
        let masses = self.masses();
        let mut out = vec![NVec3::zeros(); self.len()];
        forces.accelerations(&masses, &positions, &mut out)?;

        for (b, a) in self.bodies.iter_mut().zip(out) {
            b.acceleration = a;
        }
        Ok(())
    }

    /// Recompute kinetic energy, potential energy and angular momentum for every body.
    pub fn recompute_diagnostics(&mut self, forces: &impl ForceModel) -> Result<(), SimulationError> {
        let positions = self.positions();
        let masses = self.masses();
        let mut potential = vec![0.0; self.len()];
        forces.potential_energies(&masses, &positions, &mut potential)?;

        let origin = NVec3::zeros();
        for (b, pe) in self.bodies.iter_mut().zip(potential) {
            let diagnostics = BodyDiagnostics {
                kinetic_energy: b.kinetic_energy(),
                potential_energy: pe,
                angular_momentum: b.angular_momentum(&origin),
            };
            b.set_diagnostics(diagnostics);
        }
        Ok(())
    }

    pub fn diagnostics_current(&self) -> bool {
        self.bodies.iter().all(|b| b.diagnostics.is_some())
    }

    /// Total energy, halving each body's potential energy to undo the pair double count.
    pub fn total_energy(&self) -> Option<f64> {
        self.bodies.iter().try_fold(0.0, |e, b| {
            b.diagnostics().map(|d| e + d.kinetic_energy + 0.5 * d.potential_energy)
        })
    }

    /// Vector sum of per-body angular momenta.
    pub fn total_angular_momentum(&self) -> Option<NVec3> {
        self.bodies.iter().try_fold(NVec3::zeros(), |l, b| {
            b.diagnostics().map(|d| l + d.angular_momentum)
        })
    }

    pub(crate) fn invalidate_diagnostics(&mut self) {
        for b in self.bodies.iter_mut() {
            b.invalidate_diagnostics();
        }
    }
}
