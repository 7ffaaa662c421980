//! Configuration types loaded from YAML.
//!
//! - [`RunConfig`]      – physical constants and numerical policy for a run
//! - [`BodyConfig`]     – initial state for a single body
//! - [`ScenarioConfig`] – a full set of initial conditions in YAML form
//!
//! # Run configuration
//!
//! ```yaml
//! gravitational_constant: 1.0   # G, in problem units
//! on_singularity: propagate     # or "error"
//! ```
//!
//! Both keys are optional. Command-line flags override whatever the file sets.
//!
//! # Scenario
//!
//! Initial conditions can be given in YAML instead of the line-based text
//! format when the input file ends in `.yaml` or `.yml`:
//!
//! ```yaml
//! bodies:
//!   - name: Sun
//!     mass: 1.0
//!     position: [0.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]
//!   - name: Earth
//!     mass: 3.0e-6
//!     position: [1.0, 0.0, 0.0]
//!     velocity: [0.0, 1.0, 0.0]
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::error::SimulationError;
use crate::simulation::forces::{NewtonianGravity, SingularityPolicy};
use crate::simulation::states::{Body, NVec3};

/// Global physical and numerical settings for a run
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub gravitational_constant: f64,
    pub on_singularity: SingularityPolicy, // behaviour when two bodies coincide
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            on_singularity: SingularityPolicy::Propagate,
        }
    }
}

impl RunConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    /// Apply command-line values on top of the file; `None` keeps the file's setting
    pub fn with_overrides(mut self, gravitational_constant: Option<f64>, on_singularity: Option<SingularityPolicy>) -> Self {
        if let Some(g) = gravitational_constant {
            self.gravitational_constant = g;
        }
        if let Some(policy) = on_singularity {
            self.on_singularity = policy;
        }
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.gravitational_constant.is_finite() {
            return Err(SimulationError::InvalidParameters(format!(
                "gravitational constant must be finite, got {}",
                self.gravitational_constant
            )));
        }
        Ok(())
    }

    /// Gravity model these settings describe
    pub fn gravity(&self) -> NewtonianGravity {
        NewtonianGravity::new(self.gravitational_constant).with_singularity(self.on_singularity)
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl BodyConfig {
    pub fn to_body(&self) -> Body {
        Body::new(
            self.name.clone(),
            self.mass,
            NVec3::from(self.position),
            NVec3::from(self.velocity),
        )
    }
}

/// Top-level scenario loaded from YAML
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub bodies: Vec<BodyConfig>,
}
