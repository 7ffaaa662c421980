pub mod simulation;
pub mod configuration;
pub mod io;
pub mod error;

pub use simulation::states::{Body, BodyDiagnostics, Direction, System, NVec3};
pub use simulation::params::Parameters;
pub use simulation::forces::{ForceModel, NewtonianGravity, SingularityPolicy};
pub use simulation::integrator::VelocityVerlet;
pub use simulation::diagnostics::{compute_energy_and_angular_momentum, Snapshot};
pub use simulation::scenario::{RunSummary, Simulation};

pub use configuration::config::{RunConfig, BodyConfig, ScenarioConfig};

pub use io::input::{read_bodies, parse_bodies, parse_scenario_yaml};
pub use io::output::TrajectoryWriter;

pub use error::{InputError, ParseError, ParseErrorKind, SimulationError};
