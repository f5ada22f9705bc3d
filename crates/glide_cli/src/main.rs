//! Glide CLI - replay carousel scenarios on a headless host
//!
//! Commands:
//! - `glide simulate <scenario.toml>` - run a scenario and print the timeline
//! - `glide init [path]` - write an example scenario

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use glide_cli::{Runner, Scenario, EXAMPLE_SCENARIO};

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Replay carousel scenarios on a headless host")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and print offset and button snapshots
    Simulate {
        /// Scenario file
        scenario: PathBuf,

        /// Also print every animation frame and timer expiry
        #[arg(long)]
        frames: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write an example scenario
    Init {
        /// Destination file
        #[arg(default_value = "scenario.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Simulate {
            scenario,
            frames,
            format,
        } => cmd_simulate(&scenario, frames, format),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn cmd_simulate(path: &Path, frames: bool, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(path)?;
    tracing::info!(
        steps = scenario.steps.len(),
        variant = ?scenario.carousel.variant,
        "simulating {}",
        path.display()
    );

    let snapshots = Runner::new(scenario).record_frames(frames).run();

    match format {
        OutputFormat::Text => {
            for snapshot in &snapshots {
                println!("{snapshot}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
        }
    }
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    fs::write(path, EXAMPLE_SCENARIO)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("wrote example scenario to {}", path.display());
    Ok(())
}
