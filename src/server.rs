//! HTTP access to the live simulation.
//!
//! `GET /network-stats` returns the current [`NetworkStats`]; anything else is
//! looked up in a static directory holding the companion UI. Any origin may
//! call the API.

use std::{net::SocketAddr, path::Path};

use anyhow::Result;
use axum::{extract::State, routing::get, Json, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{simulation::SharedNetwork, stats::NetworkStats, util::logging::Logger};

pub const DEFAULT_PORT: u16 = 3500;
pub const DEFAULT_STATIC_DIR: &str = "public";

pub fn create_router<L>(network: SharedNetwork<L>, static_dir: &Path) -> Router
where
    L: Logger + Send + Sync + 'static,
{
    Router::new()
        .route("/network-stats", get(network_stats::<L>))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(network)
}

async fn network_stats<L>(State(network): State<SharedNetwork<L>>) -> Json<NetworkStats>
where
    L: Logger + Send + Sync + 'static,
{
    Json(network.read().await.stats())
}

/// Serves `router` on all interfaces until `shutdown` resolves.
pub async fn serve(
    port: u16,
    router: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running at http://localhost:{}", listener.local_addr()?.port());
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
