//! HTTP API server for the recommendation service.

pub mod routes;

use crate::engine::Recommender;
use crate::metrics::MetricsCollector;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Shared application state for the HTTP server.
///
/// The recommender is immutable after load, so it needs no lock; only the
/// metrics collector is behind one.
pub struct AppState {
    pub service: Recommender,
    pub metrics: RwLock<MetricsCollector>,
}

/// Start the HTTP server with the given recommender.
///
/// The server also comes up when the recommender is not ready: health
/// reports `model_loaded: false` and the read endpoints answer 503.
pub async fn start(addr: &str, service: Recommender) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        service,
        metrics: RwLock::new(MetricsCollector::new()),
    });

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
