//! Cluster monitor: polls the three data-plane endpoints and caches the
//! aggregated snapshot under a freshness window.
//!
//! The monitor is request-driven. There is no background polling loop: a
//! request that finds the cache fresh is served from memory without any
//! probe traffic, and a request that finds it stale pays for the probes
//! itself. Probes run concurrently since the three endpoints are
//! independent.

pub mod score;
pub mod types;

pub use types::{
    BackendStatus, ClusterSnapshot, HealthLabel, HealthScore, ProbeStatus, ReplicationInfo,
    RouterStatus, StatusRow, TrafficSnapshot,
};

use crate::probe::{DatabaseSource, RouterSource};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default freshness window for cached snapshots.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);

struct CachedSnapshot {
    fetched_at: Instant,
    snapshot: Arc<ClusterSnapshot>,
}

/// Owns the snapshot cache and the three probe sources.
pub struct ClusterMonitor {
    router: Arc<dyn RouterSource>,
    primary: Arc<dyn DatabaseSource>,
    replica: Arc<dyn DatabaseSource>,
    ttl: Duration,
    cache: RwLock<Option<CachedSnapshot>>,
}

impl ClusterMonitor {
    pub fn new(
        router: Arc<dyn RouterSource>,
        primary: Arc<dyn DatabaseSource>,
        replica: Arc<dyn DatabaseSource>,
        ttl: Duration,
    ) -> Self {
        Self {
            router,
            primary,
            replica,
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// Return the current cluster snapshot.
    ///
    /// A snapshot younger than the freshness window is returned unchanged,
    /// timestamp included; callers depend on this to keep probe traffic
    /// bounded. Otherwise the three sources are probed and a new snapshot
    /// is stored.
    pub async fn snapshot(&self) -> Arc<ClusterSnapshot> {
        if let Some(snapshot) = self.cached().await {
            return snapshot;
        }
        self.refresh().await
    }

    async fn cached(&self) -> Option<Arc<ClusterSnapshot>> {
        let guard = self.cache.read().await;
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| Arc::clone(&cached.snapshot))
    }

    async fn refresh(&self) -> Arc<ClusterSnapshot> {
        let started = Instant::now();
        let (router, primary, replica) = tokio::join!(
            self.router.probe(),
            self.primary.probe(),
            self.replica.probe(),
        );

        let health = score::score_cluster(&router, &primary, &replica);
        let replication_lag_seconds = score::replication_lag(&replica);

        let snapshot = Arc::new(ClusterSnapshot {
            timestamp: Utc::now(),
            router,
            primary,
            replica,
            health,
            replication_lag_seconds,
        });

        tracing::debug!(
            score = snapshot.health.score,
            label = ?snapshot.health.label,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Cluster snapshot refreshed"
        );

        // Concurrent stale pollers may each reach this point and probe
        // redundantly; snapshots are interchangeable, so the last writer
        // wins and nobody observes a torn state.
        let mut guard = self.cache.write().await;
        *guard = Some(CachedSnapshot {
            fetched_at: Instant::now(),
            snapshot: Arc::clone(&snapshot),
        });

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{DatabaseSource, ProbeError, RouterSource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubRouter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RouterSource for StubRouter {
        async fn probe(&self) -> RouterStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            RouterStatus::online()
        }

        async fn realtime_traffic(&self) -> Result<TrafficSnapshot, ProbeError> {
            Ok(TrafficSnapshot {
                timestamp: Utc::now(),
                global_stats: Vec::new(),
                connection_pool: Vec::new(),
                query_rules: Vec::new(),
            })
        }
    }

    struct StubDatabase {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DatabaseSource for StubDatabase {
        async fn probe(&self) -> BackendStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            BackendStatus::online(3600, 2, 100, None)
        }
    }

    fn monitor_with_ttl(ttl: Duration) -> (ClusterMonitor, Arc<StubRouter>, Arc<StubDatabase>) {
        let router = Arc::new(StubRouter {
            calls: AtomicUsize::new(0),
        });
        let primary = Arc::new(StubDatabase {
            calls: AtomicUsize::new(0),
        });
        let replica = Arc::new(StubDatabase {
            calls: AtomicUsize::new(0),
        });
        let monitor = ClusterMonitor::new(
            Arc::clone(&router) as Arc<dyn RouterSource>,
            Arc::clone(&primary) as Arc<dyn DatabaseSource>,
            replica,
            ttl,
        );
        (monitor, router, primary)
    }

    #[tokio::test]
    async fn test_fresh_cache_returns_identical_snapshot() {
        let (monitor, router, primary) = monitor_with_ttl(Duration::from_secs(60));

        let first = monitor.snapshot().await;
        let second = monitor.snapshot().await;

        assert_eq!(first.timestamp, second.timestamp);
        assert!(Arc::ptr_eq(&first, &second));
        // No probe traffic for the second poll
        assert_eq!(router.calls.load(Ordering::SeqCst), 1);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_cache_triggers_new_probe_cycle() {
        let (monitor, router, _) = monitor_with_ttl(Duration::from_millis(20));

        let first = monitor.snapshot().await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        let second = monitor.snapshot().await;

        assert!(second.timestamp > first.timestamp);
        assert_eq!(router.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_snapshot_folds_score_and_lag() {
        let (monitor, _, _) = monitor_with_ttl(DEFAULT_CACHE_TTL);

        let snapshot = monitor.snapshot().await;

        // Router + primary + replica online, no replication info: 90
        assert_eq!(snapshot.health.score, 90);
        assert_eq!(snapshot.health.label, HealthLabel::Healthy);
        assert_eq!(snapshot.replication_lag_seconds, None);
    }
}
