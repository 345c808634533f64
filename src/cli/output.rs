//! Terminal rendering for the status command.

use crate::monitor::{ClusterSnapshot, HealthLabel, ProbeStatus};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

fn status_cell(status: ProbeStatus) -> Cell {
    match status {
        ProbeStatus::Online => Cell::new("online".green().to_string()),
        ProbeStatus::Offline => Cell::new("offline".red().to_string()),
        ProbeStatus::Error => Cell::new("error".yellow().to_string()),
    }
}

fn optional(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

/// Render the snapshot as a service-per-row table with a health footer.
pub fn render_snapshot(snapshot: &ClusterSnapshot) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Service", "Status", "Uptime (s)", "Connections", "Queries", "Detail"]);

    table.add_row(vec![
        Cell::new("router"),
        status_cell(snapshot.router.status),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(format!("{} backends", snapshot.router.backends.len())),
    ]);

    for (name, backend) in [
        ("primary", &snapshot.primary),
        ("replica", &snapshot.replica),
    ] {
        let detail = match (&backend.error, &backend.replication) {
            (Some(e), _) => e.clone(),
            (None, Some(repl)) => format!(
                "io={} sql={}",
                if repl.io_running { "yes" } else { "no" },
                if repl.sql_running { "yes" } else { "no" },
            ),
            (None, None) => String::new(),
        };
        table.add_row(vec![
            Cell::new(name),
            status_cell(backend.status),
            Cell::new(optional(backend.uptime)),
            Cell::new(optional(backend.connections)),
            Cell::new(optional(backend.queries)),
            Cell::new(detail),
        ]);
    }

    let health = match snapshot.health.label {
        HealthLabel::Healthy => "healthy".green().bold(),
        HealthLabel::Warning => "warning".yellow().bold(),
        HealthLabel::Critical => "critical".red().bold(),
    };

    let lag = snapshot
        .replication_lag_seconds
        .map(|l| format!("{l}s"))
        .unwrap_or_else(|| "unknown".into());

    format!(
        "{table}\nHealth: {health} ({}/100)  Replication lag: {lag}\n",
        snapshot.health.score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{BackendStatus, HealthScore, RouterStatus};
    use chrono::Utc;

    fn snapshot() -> ClusterSnapshot {
        ClusterSnapshot {
            timestamp: Utc::now(),
            router: RouterStatus::online(),
            primary: BackendStatus::online(3600, 12, 1042, None),
            replica: BackendStatus::offline("Cannot connect to MySQL replica"),
            health: HealthScore {
                score: 70,
                label: HealthLabel::Warning,
            },
            replication_lag_seconds: None,
        }
    }

    #[test]
    fn test_render_contains_services_and_health() {
        colored::control::set_override(false);
        let rendered = render_snapshot(&snapshot());
        assert!(rendered.contains("router"));
        assert!(rendered.contains("primary"));
        assert!(rendered.contains("replica"));
        assert!(rendered.contains("70/100"));
        assert!(rendered.contains("warning"));
    }

    #[test]
    fn test_render_shows_backend_error() {
        colored::control::set_override(false);
        let rendered = render_snapshot(&snapshot());
        assert!(rendered.contains("Cannot connect to MySQL replica"));
    }
}
