//! Error types for loading initial conditions and running a simulation

use std::fmt;
use std::io;

/// What went wrong on a given line of the initial-condition input
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The file ended part way through a body's four records
    TruncatedBody { records: usize },
    /// A field could not be read as a number
    InvalidNumber(String),
    /// A vector line did not hold exactly three components
    WrongComponentCount(usize),
    /// Mass was zero, negative or not finite
    InvalidMass(f64),
    EmptyName,
    NoBodies,
    /// YAML scenario could not be deserialized
    Yaml(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize, // 1-based, 0 when no single line is to blame
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        match &self.kind {
            ParseErrorKind::TruncatedBody { records } => {
                write!(f, "incomplete body, expected 4 records (name, mass, position, velocity) but found {records}")
            }
            ParseErrorKind::InvalidNumber(field) => write!(f, "invalid number {field:?}"),
            ParseErrorKind::WrongComponentCount(n) => write!(f, "expected 3 comma-separated components, found {n}"),
            ParseErrorKind::InvalidMass(m) => write!(f, "mass must be finite and positive, got {m}"),
            ParseErrorKind::EmptyName => write!(f, "body name is empty"),
            ParseErrorKind::NoBodies => write!(f, "no bodies in input"),
            ParseErrorKind::Yaml(msg) => write!(f, "invalid scenario: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Failure to read initial conditions
#[derive(Debug)]
pub enum InputError {
    Io(io::Error),
    Parse(ParseError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(e) => write!(f, "failed to read input: {e}"),
            InputError::Parse(e) => write!(f, "failed to parse input: {e}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(e) => Some(e),
            InputError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        InputError::Io(e)
    }
}

impl From<ParseError> for InputError {
    fn from(e: ParseError) -> Self {
        InputError::Parse(e)
    }
}

/// Failure while stepping or recording a simulation
#[derive(Debug)]
pub enum SimulationError {
    /// Two bodies occupy the same position (indices into the system, `first < second`)
    Singularity { first: usize, second: usize },
    /// A snapshot was requested while body diagnostics were out of date
    StaleDiagnostics,
    InvalidParameters(String),
    Io(io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Singularity { first, second } => {
                write!(f, "bodies {} and {} are at the same position", first + 1, second + 1)
            }
            SimulationError::StaleDiagnostics => write!(f, "diagnostics must be recomputed before taking a snapshot"),
            SimulationError::InvalidParameters(msg) => write!(f, "invalid parameters: {msg}"),
            SimulationError::Io(e) => write!(f, "failed to write trajectory: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SimulationError {
    fn from(e: io::Error) -> Self {
        SimulationError::Io(e)
    }
}
