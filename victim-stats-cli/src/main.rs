//! `victim-stats`: replay recorded or simulated rounds through the plugin
//! and print what every player would see.

mod scenario;
mod simulate;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use console_host::{ServerConfig, StringTable};
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "victim-stats")]
#[command(about = "Per-round damage reports for Source engine servers")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario file
    Replay {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Server config TOML (engine, game and cvars)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extra translations TOML, merged over the bundled strings
        #[arg(short, long)]
        strings: Option<PathBuf>,
    },
    /// Simulate random rounds
    Simulate {
        /// Number of rounds to play
        #[arg(short, long, default_value = "3")]
        rounds: usize,

        /// Number of players, split over two teams
        #[arg(short, long, default_value = "6")]
        players: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Server config TOML (engine, game and cvars)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the generated scenario as JSON instead of replaying it
        #[arg(long)]
        dump: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load server config {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn play(scenario: &Scenario, config: &ServerConfig, strings: Option<StringTable>) -> Result<()> {
    let mut plugin = scenario::load_plugin(scenario, config, strings)?;
    let outputs = scenario::run(&mut plugin, &scenario.steps);
    for output in &outputs {
        println!("{output}");
    }
    info!(steps = scenario.steps.len(), deliveries = outputs.len(), "Replay finished");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Replay {
            scenario,
            config,
            strings,
        } => {
            let config = load_config(config.as_deref())?;
            let strings = strings
                .map(|path| {
                    StringTable::load(&path)
                        .with_context(|| format!("failed to load strings {}", path.display()))
                })
                .transpose()?;
            let scenario = Scenario::load(&scenario)?;
            play(&scenario, &config, strings)
        }
        Command::Simulate {
            rounds,
            players,
            seed,
            config,
            dump,
        } => {
            let config = load_config(config.as_deref())?;
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, rounds, players, "Simulating");
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let scenario = simulate::generate(players, rounds, &mut rng);
            if dump {
                println!("{}", serde_json::to_string_pretty(&scenario)?);
                return Ok(());
            }
            play(&scenario, &config, None)
        }
    }
}
