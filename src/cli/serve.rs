//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{ClusterviewConfig, LogFormat};
use crate::probe::{DatabaseProbe, DatabaseRole, RouterProbe};
use crate::runtime::{ContainerRuntime, DockerRuntime};
use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &ServeArgs) -> Result<ClusterviewConfig> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        ClusterviewConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        ClusterviewConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(config: &crate::config::LoggingConfig) -> Result<()> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Construct application state from configuration: the three probes plus
/// the container runtime client. A failed runtime connection degrades the
/// action and container endpoints instead of aborting startup.
pub fn build_state(config: ClusterviewConfig) -> Arc<AppState> {
    let config = Arc::new(config);

    let router = Arc::new(RouterProbe::new(&config.router, &config.monitor));
    let primary = Arc::new(DatabaseProbe::new(
        &config.primary,
        DatabaseRole::Primary,
        &config.monitor,
    ));
    let replica = Arc::new(DatabaseProbe::new(
        &config.replica,
        DatabaseRole::Replica,
        &config.monitor,
    ));

    let runtime: Option<Arc<dyn ContainerRuntime>> = match DockerRuntime::connect() {
        Ok(runtime) => {
            tracing::info!("Container runtime client initialized");
            Some(Arc::new(runtime))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize container runtime client");
            None
        }
    };

    Arc::new(AppState::new(config, router, primary, replica, runtime))
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting clusterview server");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config);
    let app = create_router(state);

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    tracing::info!(addr = %addr, "Dashboard API listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let shutdown = cancel_token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("clusterview server stopped");
    Ok(())
}
