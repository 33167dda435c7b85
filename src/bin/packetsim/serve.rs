use std::{path::Path, time::Duration};

use anyhow::Result;
use packetsim::{
    server::{self, create_router},
    simulation::{shared, Scheduler},
    util::{logging::TracingLogger, rand::Rng},
    Network,
};
use tracing::{info, warn};

use crate::load_network_config;

pub(super) fn serve(
    config: Option<&Path>,
    port: u16,
    seed: Option<u64>,
    tick_interval_ms: u64,
    static_dir: &Path,
) -> Result<()> {
    let network_config = load_network_config(config)?;
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "Seeded destination selection");
    let network = shared(Network::new(
        &network_config,
        Rng::from_seed(seed),
        TracingLogger,
    )?);
    if !static_dir.is_dir() {
        warn!(dir = %static_dir.display(), "Static directory not found, only the stats API will answer");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let mut scheduler =
            Scheduler::new(network.clone(), Duration::from_millis(tick_interval_ms))?;
        scheduler.start();

        let router = create_router(network, static_dir);
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Could not listen for ctrl-c");
            }
        };
        server::serve(port, router, shutdown).await?;

        let ticks = scheduler.stop().await?;
        info!(ticks, "Simulation stopped");
        Ok::<_, anyhow::Error>(())
    })
}
