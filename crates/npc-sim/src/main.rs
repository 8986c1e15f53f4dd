//! npc-sim - headless scripted encounters for the NPC decision core.
//!
//! - `npc-sim run` - play a scenario and print per-NPC results
//! - `npc-sim config` - print the default NPC tuning, or check a tuning file
//! - `npc-sim scenario` - print the built-in scenario as JSON

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use npc_core::{NpcConfig, StateKind};

mod scenario;
mod sensors;
mod sim;
mod world;

use scenario::Scenario;
use sim::Simulation;

#[derive(Parser)]
#[command(name = "npc-sim")]
#[command(about = "Headless NPC decision-core simulator", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario
    Run {
        /// Scenario file (JSON). Defaults to the built-in ambush.
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// NPC tuning file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fixed frame delta in seconds
        #[arg(long, default_value_t = 0.1)]
        dt: f32,

        #[arg(long, default_value_t = 7)]
        seed: u64,

        /// Print every recorded trace event as a JSON line
        #[arg(long)]
        trace: bool,
    },

    /// Print the default NPC tuning, or check a tuning file
    Config {
        #[arg(long)]
        check: Option<PathBuf>,
    },

    /// Print the built-in scenario
    Scenario,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if cli.json {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    match cli.command {
        Commands::Run {
            scenario,
            config,
            dt,
            seed,
            trace,
        } => run(scenario.as_deref(), config.as_deref(), dt, seed, trace),
        Commands::Config { check } => match check {
            Some(path) => check_config(&path),
            None => {
                println!("{}", serde_json::to_string_pretty(&NpcConfig::default())?);
                Ok(())
            }
        },
        Commands::Scenario => {
            println!("{}", serde_json::to_string_pretty(&Scenario::default())?);
            Ok(())
        }
    }
}

fn run(
    scenario: Option<&Path>,
    config: Option<&Path>,
    dt: f32,
    seed: u64,
    trace: bool,
) -> Result<()> {
    if !(dt.is_finite() && dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {dt}");
    }
    let scenario = match scenario {
        Some(path) => load_json::<Scenario>(path)?,
        None => Scenario::default(),
    };
    let config = match config {
        Some(path) => load_json::<NpcConfig>(path)?,
        None => NpcConfig::default(),
    };

    tracing::info!(
        scenario = %scenario.name,
        npcs = scenario.npc_homes.len(),
        duration = scenario.duration_secs,
        dt,
        seed,
        "Starting simulation"
    );

    let mut sim = Simulation::new(scenario, config, dt, seed);
    sim.run();

    if trace {
        for event in sim.trace_events() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    println!("Scenario: {}", sim.scenario().name);
    println!("==========");
    for (agent, stats) in sim.stats() {
        let final_state = stats.final_state.map_or("none", StateKind::as_str);
        println!();
        println!("{agent}: final state {final_state}");
        println!("  transitions: {}", stats.transitions);
        println!("  attacks:     {}", stats.attacks);
        if stats.halted {
            println!("  HALTED");
        }
        for (kind, secs) in &stats.time_in {
            println!("  {:<12} {:>6.1}s", kind.as_str(), secs);
        }
    }
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = load_json::<NpcConfig>(path)?;
    let issues = config.issues();
    if issues.is_empty() {
        println!("{}: ok", path.display());
        return Ok(());
    }
    for issue in &issues {
        println!("{}: {issue}", path.display());
    }
    bail!("{} problem(s) in {}", issues.len(), path.display())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
