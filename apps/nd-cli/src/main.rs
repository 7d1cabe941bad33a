use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use nd_vectors::{RandomHypersphereVg, Rectifier, VectorGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;

use config::RunConfig;
use error::CliResult;

#[derive(Parser)]
#[command(name = "nd-cli")]
#[command(about = "neurodyn CLI - time-domain simulation of dynamical systems", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a system described by a YAML run file
    Run {
        /// Path to the run YAML file
        config_path: PathBuf,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample vectors from a hypersphere
    Vectors {
        /// Number of vectors
        #[arg(long)]
        count: usize,
        /// Dimension of each vector
        #[arg(long)]
        dimension: usize,
        /// Sphere radius
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        /// Sample the volume instead of the surface
        #[arg(long)]
        volume: bool,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Fold every component to one sign
        #[arg(long, value_enum)]
        rectify: Option<Sign>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Sign {
    Positive,
    Negative,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config_path,
            output,
        } => cmd_run(&config_path, output.as_deref()),
        Commands::Vectors {
            count,
            dimension,
            radius,
            volume,
            seed,
            rectify,
        } => cmd_vectors(count, dimension, radius, !volume, seed, rectify),
    }
}

fn cmd_run(config_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let config = RunConfig::load(config_path)?;
    let mut system = config.system.build()?;
    let integrator = config.integrator.build();
    info!(?integrator, samples = config.input.len(), "running simulation");

    let result = integrator.integrate(system.as_mut(), &config.input)?;
    info!(samples = result.len(), "simulation finished");

    let json = serde_json::to_string_pretty(&result)?;
    write_output(&json, output)
}

fn cmd_vectors(
    count: usize,
    dimension: usize,
    radius: f64,
    surface: bool,
    seed: Option<u64>,
    rectify: Option<Sign>,
) -> CliResult<()> {
    let sphere = match seed {
        Some(seed) => RandomHypersphereVg::with_seed(surface, radius, seed)?,
        None => RandomHypersphereVg::new(surface, radius)?,
    };
    let mut generator: Box<dyn VectorGenerator> = match rectify {
        Some(Sign::Positive) => Box::new(Rectifier::with_sign(sphere, true)),
        Some(Sign::Negative) => Box::new(Rectifier::with_sign(sphere, false)),
        None => Box::new(sphere),
    };

    let vectors = generator.gen_vectors(count, dimension)?;
    let rows: Vec<&[f64]> = vectors.iter().map(|v| v.as_slice()).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, None)
}

fn write_output(text: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}
