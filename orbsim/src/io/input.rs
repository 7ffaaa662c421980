//! Initial-condition readers
//!
//! The text format is four lines per body, with no separator between bodies:
//!
//! ```text
//! Sun
//! 1.0
//! 0.0,0.0,0.0
//! 0.0,0.0,0.0
//! ```
//!
//! name, mass, position `x,y,z`, velocity `x,y,z`. Files ending in `.yaml` or
//! `.yml` are read as a [`ScenarioConfig`] instead.

use std::fs;
use std::path::Path;

use crate::configuration::config::ScenarioConfig;
use crate::error::{InputError, ParseError, ParseErrorKind};
use crate::simulation::states::{Body, NVec3};

const RECORDS_PER_BODY: usize = 4;

/// Read bodies from `path`, picking the format from the file extension
pub fn read_bodies(path: &Path) -> Result<Vec<Body>, InputError> {
    let text = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let bodies = if is_yaml {
        parse_scenario_yaml(&text)?
    } else {
        parse_bodies(&text)?
    };
    Ok(bodies)
}

/// Parse the line-based text format
pub fn parse_bodies(text: &str) -> Result<Vec<Body>, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    // trailing blank lines are not a partial body
    let used = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(0, |i| i + 1);
    let lines = &lines[..used];

    if lines.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::NoBodies));
    }

    let mut bodies = Vec::with_capacity(lines.len() / RECORDS_PER_BODY);
    for (block, records) in lines.chunks(RECORDS_PER_BODY).enumerate() {
        let first_line = block * RECORDS_PER_BODY + 1;
        if records.len() < RECORDS_PER_BODY {
            return Err(ParseError::new(
                first_line,
                ParseErrorKind::TruncatedBody { records: records.len() },
            ));
        }

        let name = records[0].trim_end();
        if name.trim().is_empty() {
            return Err(ParseError::new(first_line, ParseErrorKind::EmptyName));
        }
        let mass = parse_mass(records[1], first_line + 1)?;
        let position = parse_vector(records[2], first_line + 2)?;
        let velocity = parse_vector(records[3], first_line + 3)?;

        bodies.push(Body::new(name, mass, position, velocity));
    }
    Ok(bodies)
}

/// Parse a YAML [`ScenarioConfig`]
pub fn parse_scenario_yaml(text: &str) -> Result<Vec<Body>, ParseError> {
    let scenario: ScenarioConfig = serde_yaml::from_str(text).map_err(|e| {
        let line = e.location().map_or(0, |l| l.line());
        ParseError::new(line, ParseErrorKind::Yaml(e.to_string()))
    })?;

    if scenario.bodies.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::NoBodies));
    }
    for bc in &scenario.bodies {
        if bc.name.trim().is_empty() {
            return Err(ParseError::new(0, ParseErrorKind::EmptyName));
        }
        check_mass(bc.mass, 0)?;
        for c in bc.position.iter().chain(bc.velocity.iter()) {
            if !c.is_finite() {
                return Err(ParseError::new(0, ParseErrorKind::InvalidNumber(c.to_string())));
            }
        }
    }
    Ok(scenario.bodies.iter().map(|bc| bc.to_body()).collect())
}

fn parse_number(field: &str, line: usize) -> Result<f64, ParseError> {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::new(line, ParseErrorKind::InvalidNumber(field.to_string()))),
    }
}

fn check_mass(mass: f64, line: usize) -> Result<f64, ParseError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(ParseError::new(line, ParseErrorKind::InvalidMass(mass)))
    }
}

fn parse_mass(record: &str, line: usize) -> Result<f64, ParseError> {
    check_mass(parse_number(record, line)?, line)
}

fn parse_vector(record: &str, line: usize) -> Result<NVec3, ParseError> {
    let fields: Vec<&str> = record.split(',').collect();
    if fields.len() != 3 {
        return Err(ParseError::new(line, ParseErrorKind::WrongComponentCount(fields.len())));
    }
    Ok(NVec3::new(
        parse_number(fields[0], line)?,
        parse_number(fields[1], line)?,
        parse_number(fields[2], line)?,
    ))
}
