//! Trajectory writer
//!
//! Comma-separated text: three header lines, then one row per snapshot.
//!
//! ```text
//! dt,T,Tsave,N
//! 1 = name_1,2 = name_2,...
//! time,energy,ang_mom,r1x,r1y,r1z,v1x,v1y,v1z,...
//! t,E,|L|,rx,ry,rz,vx,vy,vz,...
//! ```
//!
//! Floats use `f64`'s `Debug` formatting: the shortest string that reads
//! back to the identical value, switching to exponent form for very large or
//! very small magnitudes. Repeated runs are byte-identical.

use std::io::{self, BufWriter, Write};

use crate::simulation::diagnostics::Snapshot;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

pub struct TrajectoryWriter<W: Write> {
    out: BufWriter<W>,
    rows: u64,
}

impl<W: Write> TrajectoryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            out: BufWriter::new(inner),
            rows: 0,
        }
    }

    /// Snapshot rows written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn write_header(&mut self, params: &Parameters, bodies: &[Body]) -> io::Result<()> {
        writeln!(self.out, "{:?},{},{},{}", params.dt, params.steps, params.save_every, bodies.len())?;

        let names: Vec<String> = bodies
            .iter()
            .enumerate()
            .map(|(i, b)| format!("{} = {}", i + 1, b.name()))
            .collect();
        writeln!(self.out, "{}", names.join(","))?;

        write!(self.out, "time,energy,ang_mom")?;
        for i in 1..=bodies.len() {
            write!(self.out, ",r{i}x,r{i}y,r{i}z,v{i}x,v{i}y,v{i}z")?;
        }
        writeln!(self.out)
    }

    pub fn write_snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        write!(self.out, "{:?},{:?},{:?}", snapshot.time, snapshot.energy, snapshot.angular_momentum)?;
        for (r, v) in &snapshot.states {
            write_vector(&mut self.out, r)?;
            write_vector(&mut self.out, v)?;
        }
        writeln!(self.out)?;
        self.rows += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

fn write_vector<W: Write>(out: &mut W, v: &NVec3) -> io::Result<()> {
    write!(out, ",{:?},{:?},{:?}", v.x, v.y, v.z)
}
