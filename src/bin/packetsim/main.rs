use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use packetsim::{
    server::{DEFAULT_PORT, DEFAULT_STATIC_DIR},
    Config, NetworkConfig,
};
use tracing_subscriber::EnvFilter;

use create_config::create_config;
use run::run;
use serve::serve;

mod create_config;
mod run;
mod serve;

#[derive(Subcommand, Debug)]
enum Command {
    /// Tick the simulation in real time and serve live stats over HTTP
    Serve {
        /// Network config file (JSON). Defaults to the built-in five node network.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Seed for destination selection. Random if omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds between ticks
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
        tick_interval_ms: u64,

        /// Directory holding the companion UI
        #[arg(long, default_value = DEFAULT_STATIC_DIR)]
        static_dir: PathBuf,
    },
    /// Run a fixed number of ticks as fast as possible and report the final state
    Run {
        /// Number of ticks to run
        #[arg(short, long)]
        ticks: u64,

        /// Network config file (JSON). Defaults to the built-in five node network.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for destination selection
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// File to write the final stats to (JSON) instead of printing tables
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every queue drop, admission and hold as it happens
        #[arg(long)]
        trace: bool,
    },
    /// Write the built-in network config to a file
    GenConfig {
        /// File to write the network config to
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate capacity-bound packet routing over a small static network.", long_about = None)]
struct Args {
    #[command(subcommand)]
    pub command: Command,
}

fn load_network_config(path: Option<&Path>) -> Result<NetworkConfig> {
    path.map_or_else(|| Ok(NetworkConfig::default()), NetworkConfig::load)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Serve {
            config,
            port,
            seed,
            tick_interval_ms,
            static_dir,
        } => serve(
            config.as_deref(),
            port,
            seed,
            tick_interval_ms,
            &static_dir,
        ),
        Command::Run {
            ticks,
            config,
            seed,
            output,
            trace,
        } => run(config.as_deref(), ticks, seed, output.as_deref(), trace),
        Command::GenConfig { output } => create_config(&output),
    }
}
