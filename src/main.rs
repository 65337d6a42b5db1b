//! ==============================================================================
//! main.rs - dustbin monitor entry point
//! ==============================================================================
//!
//! purpose:
//!     the hub that one ESP32 ultrasonic sensor reports to. it keeps exactly
//!     one reading in process memory and serves a dashboard that polls it.
//!
//! responsibilities:
//!     - initialize tracing and load configuration
//!     - own the latest-reading store (store.rs)
//!     - serve the ingestion API and the dashboard page (api.rs, dashboard.rs)
//!
//! architecture:
//!
//!     ┌────────────┐  POST /api/data   ┌──────────────────────────┐
//!     │   ESP32    │ ────────────────> │   hub (this binary)      │
//!     │  (sensor)  │                   │  ┌────────────────────┐  │
//!     └────────────┘                   │  │ MemoryStore (slot) │  │
//!                                      │  └────────────────────┘  │
//!     ┌────────────┐  GET /api/data    │                          │
//!     │  browser   │ <───────────────> │   axum router            │
//!     │ (2s poll)  │  GET /            └──────────────────────────┘
//!     └────────────┘
//!
//! non-goals, deliberately:
//!     no persistence (restart loses the slot), no auth, no per-device
//!     identity, no history. last write wins.
//!
//! ==============================================================================

mod api;
mod config;
mod dashboard;
mod domain;
mod store;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // startup banner
    println!("===========================================================");
    println!("  Smart Dustbin Monitor");
    println!("  one sensor in, one dashboard out");
    println!("===========================================================");

    let config = config::MonitorConfig::load_or_default();
    let addr = config.bind_addr();

    let state = Arc::new(api::AppState {
        store: store::MemoryStore::shared(),
        config,
    });

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "dashboard live");
    axum::serve(listener, app).await?;
    Ok(())
}
