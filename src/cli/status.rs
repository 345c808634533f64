//! One-shot status command.

use crate::cli::StatusArgs;
use crate::config::ClusterviewConfig;
use crate::monitor::ClusterMonitor;
use crate::probe::{DatabaseProbe, DatabaseRole, RouterProbe};
use anyhow::Result;
use std::sync::Arc;

/// Poll the cluster once and print the snapshot, as a table or as JSON.
pub async fn run_status(args: StatusArgs) -> Result<()> {
    let config = if args.config.exists() {
        ClusterviewConfig::load(Some(&args.config))?
    } else {
        ClusterviewConfig::default()
    }
    .with_env_overrides();
    config.validate()?;

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

    let monitor = ClusterMonitor::new(router, primary, replica, config.monitor.cache_ttl());
    let snapshot = monitor.snapshot().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);
    } else {
        print!("{}", super::output::render_snapshot(&snapshot));
    }

    Ok(())
}
