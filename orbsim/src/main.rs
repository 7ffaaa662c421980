use orbsim::{read_bodies, NewtonianGravity, Parameters, RunConfig, Simulation, SingularityPolicy, TrajectoryWriter};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::path::{Path, PathBuf};

/// Orbital motion of N point masses with a fixed-step velocity Verlet integrator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial conditions (text, or YAML when ending in .yaml/.yml)
    input: PathBuf,

    /// Trajectory output file
    output: PathBuf,

    /// Time step
    #[arg(allow_negative_numbers = true, value_parser = parse_finite)]
    dt: f64,

    /// Total number of time steps T
    steps: u64,

    /// Steps between saved snapshots Tsave
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    save_every: u64,

    /// Run configuration file (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Gravitational constant (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE", value_parser = parse_finite)]
    gravity: Option<f64>,

    /// Behaviour when two bodies share a position (overrides config file)
    #[arg(long, value_enum, value_name = "POLICY")]
    on_singularity: Option<SingularityPolicy>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{s} is not a finite number"))
    }
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<RunConfig> {
    let cfg = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("unable to open config file {}", path.display()))?;
            RunConfig::from_reader(file).with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => RunConfig::default(),
    };

    let cfg = cfg.with_overrides(args.gravity, args.on_singularity);
    cfg.validate()?;
    Ok(cfg)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let cfg = load_config(args)?;
    let gravity: NewtonianGravity = cfg.gravity();
    let params = Parameters::new(args.dt, args.steps, args.save_every);

    let bodies = read_bodies(&args.input).with_context(|| format!("unable to load {}", args.input.display()))?;

    info!("--- orbital motion simulation ---");
    info!(" number of bodies N: {}", bodies.len());
    for b in &bodies {
        info!("- {}", b.name());
    }
    info!("       time step dt: {}", params.dt);
    info!("  number of steps T: {}", params.steps);
    info!("   save steps Tsave: {}", params.save_every);
    if cfg.gravitational_constant != 1.0 {
        info!("                  G: {}", cfg.gravitational_constant);
    }

    let mut simulation = Simulation::new(bodies, params, gravity)?;

    let file = create_output(&args.output)?;
    let mut writer = TrajectoryWriter::new(file);
    simulation
        .run(&mut writer)
        .with_context(|| format!("simulation failed, partial output in {}", args.output.display()))?;

    Ok(())
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("unable to open file: {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}
