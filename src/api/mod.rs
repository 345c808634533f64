//! # Dashboard HTTP API
//!
//! JSON endpoints for cluster metrics, live router traffic, container
//! status, and remote actions.
//!
//! ## Endpoints
//!
//! - `GET /api/metrics` - Aggregated cluster snapshot (cached, 5s window)
//! - `GET /api/proxysql/backends` - Router backend server rows
//! - `GET /api/traffic/realtime` - Live router counters, bypassing the cache
//! - `GET /api/container/status` - Per-container resource stats
//! - `GET /api/actions/restart/:service` - Restart a service container
//! - `GET /api/actions/backup` - Run a dump inside the primary container
//! - `GET /api/logs/:service` - Tail a service's container logs
//! - `GET /health` - Liveness payload
//!
//! ## Error Handling
//!
//! Every error is returned as `{"error": "..."}` with 400 for a service name
//! outside the allow-list, 404 for a missing container, and 500 for
//! everything else.

mod actions;
mod containers;
mod health;
mod metrics;
mod traffic;

pub mod error;

pub use error::ApiError;

use crate::actions::ActionGateway;
use crate::config::ClusterviewConfig;
use crate::monitor::ClusterMonitor;
use crate::probe::{DatabaseSource, RouterSource};
use crate::runtime::ContainerRuntime;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub monitor: Arc<ClusterMonitor>,
    pub router_source: Arc<dyn RouterSource>,
    pub runtime: Option<Arc<dyn ContainerRuntime>>,
    pub actions: ActionGateway,
    pub config: Arc<ClusterviewConfig>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Wire the monitor, gateway, and probe sources together.
    pub fn new(
        config: Arc<ClusterviewConfig>,
        router_source: Arc<dyn RouterSource>,
        primary: Arc<dyn DatabaseSource>,
        replica: Arc<dyn DatabaseSource>,
        runtime: Option<Arc<dyn ContainerRuntime>>,
    ) -> Self {
        let monitor = Arc::new(ClusterMonitor::new(
            Arc::clone(&router_source),
            primary,
            replica,
            config.monitor.cache_ttl(),
        ));

        let actions = ActionGateway::new(
            runtime.clone(),
            config.containers.clone(),
            config.backup.clone(),
        );

        Self {
            monitor,
            router_source,
            runtime,
            actions,
            config,
            start_time: Instant::now(),
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/metrics", get(metrics::handle))
        .route("/api/proxysql/backends", get(metrics::handle_backends))
        .route("/api/traffic/realtime", get(traffic::handle))
        .route("/api/container/status", get(containers::handle))
        .route("/api/actions/restart/:service", get(actions::handle_restart))
        .route("/api/actions/backup", get(actions::handle_backup))
        .route("/api/logs/:service", get(actions::handle_logs))
        .route("/health", get(health::handle))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
