//! Clusterview - operational dashboard for a ProxySQL-fronted MySQL cluster.
//!
//! Polls the query router's admin interface, the primary, and the replica,
//! aggregates their state into a scored health snapshot cached under a
//! short freshness window, and exposes a JSON API plus remote actions
//! (restart, backup, log retrieval) against the cluster's containers.

pub mod actions;
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod monitor;
pub mod probe;
pub mod runtime;
