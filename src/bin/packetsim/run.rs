use std::{fs::File, path::Path};

use anyhow::Result;
use packetsim::{
    util::{
        logging::{Logger, PrintLogger, TracingLogger},
        rand::Rng,
    },
    Network, NetworkConfig, NetworkStats, TickReport,
};
use tabled::{settings::Style, Table};
use tracing::info;

use crate::load_network_config;

fn simulate<L: Logger>(
    network_config: &NetworkConfig,
    ticks: u64,
    seed: u64,
    logger: L,
) -> Result<(TickReport, NetworkStats)> {
    let mut network = Network::new(network_config, Rng::from_seed(seed), logger)?;
    let report = network.run_for(ticks)?;
    Ok((report, network.stats()))
}

pub(super) fn run(
    config: Option<&Path>,
    ticks: u64,
    seed: u64,
    output: Option<&Path>,
    trace: bool,
) -> Result<()> {
    let network_config = load_network_config(config)?;
    let (report, stats) = if trace {
        simulate(&network_config, ticks, seed, PrintLogger::new("engine".to_owned()))?
    } else {
        simulate(&network_config, ticks, seed, TracingLogger)?
    };
    info!(ticks, seed, ?report, "Simulation finished");

    if let Some(output) = output {
        let file = File::create(output)?;
        serde_json::to_writer_pretty(file, &stats)?;
    } else {
        println!("{stats}");
        println!("{}", Table::new([report]).with(Style::rounded()));
    }
    Ok(())
}
