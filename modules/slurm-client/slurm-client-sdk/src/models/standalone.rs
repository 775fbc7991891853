//! Cluster-wide reports that belong to no entity: licenses, fairshare,
//! scheduler and database diagnostics, the accounting configuration and the
//! TRES catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

slurm_enum! {
    /// What a fairshare row describes.
    ShareKind {
        User => "USER",
        Association => "ASSOCIATION",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub total: u32,
    pub used: u32,
    pub free: u32,
    pub reserved: u32,
    /// Served by slurmdbd rather than configured locally.
    pub remote: bool,
}

/// One row of the fairshare tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub id: u32,
    pub cluster: String,
    /// Account or user name.
    pub name: String,
    pub parent: String,
    pub partition: String,
    pub kind: Vec<ShareKind>,
    pub shares: u32,
    pub shares_normalized: f64,
    pub usage: i64,
    pub usage_normalized: f64,
    pub effective_usage: f64,
    pub fairshare_factor: f64,
    pub fairshare_level: f64,
}

/// Fairshare filters, sent to the server as comma-joined lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesOptions {
    pub users: Vec<String>,
    pub accounts: Vec<String>,
}

/// Names of the records slurmdbd holds, plus its TRES catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingConfig {
    pub clusters: Vec<String>,
    pub accounts: Vec<String>,
    pub users: Vec<String>,
    pub qos: Vec<String>,
    pub wckeys: Vec<String>,
    pub tres: Vec<TrackedResource>,
}

/// `sdiag`: controller thread, scheduler and backfill counters.
///
/// Cycle durations are microseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub collected_at: Option<DateTime<Utc>>,
    /// Start of the counting window; counters reset at midnight.
    pub window_start: Option<DateTime<Utc>>,
    pub server_thread_count: u32,
    pub agent_queue_size: u32,
    pub agent_count: u32,
    pub agent_thread_count: u32,
    pub dbd_agent_queue_size: u32,
    pub jobs_submitted: u32,
    pub jobs_started: u32,
    pub jobs_completed: u32,
    pub jobs_canceled: u32,
    pub jobs_failed: u32,
    pub jobs_pending: u32,
    pub jobs_running: u32,
    pub schedule_cycle_last: u64,
    pub schedule_cycle_max: u64,
    pub schedule_cycle_mean: u64,
    pub schedule_cycle_total: u32,
    pub schedule_queue_length: u32,
    pub bf_active: bool,
    pub bf_backfilled_jobs: u32,
    pub bf_cycle_counter: u32,
    pub bf_cycle_mean: u64,
    pub bf_cycle_max: u64,
    pub bf_queue_len: u32,
    pub bf_last_cycle_at: Option<DateTime<Utc>>,
}

/// Per-RPC or per-user request counters of slurmdbd.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStat {
    /// RPC type or user name.
    pub name: String,
    pub count: u32,
    pub average_us: i64,
    pub total_us: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDiagnostics {
    pub window_start: Option<DateTime<Utc>>,
    pub rpcs: Vec<RpcStat>,
    pub users: Vec<RpcStat>,
}

/// A catalogue entry of the accounting database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedResource {
    pub id: u32,
    pub kind: String,
    pub name: String,
    pub count: i64,
}

impl TrackedResource {
    /// `type` or `type/name`, the spelling TRES maps use.
    #[must_use]
    pub fn key(&self) -> String {
        if self.name.is_empty() {
            self.kind.clone()
        } else {
            format!("{}/{}", self.kind, self.name)
        }
    }
}

/// A TRES to register with slurmdbd, e.g. `gres`/`gpu` or `license`/`matlab`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TresCreate {
    pub kind: String,
    pub name: String,
}
