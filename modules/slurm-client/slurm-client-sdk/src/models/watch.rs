//! Change events produced by polling watchers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::job::{Job, JobState};
use super::node::{Node, NodeState};
use super::partition::{Partition, PartitionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEventKind {
    /// First seen after the initial snapshot.
    New,
    StateChanged,
    /// Dropped out of the job list.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEvent {
    pub kind: JobEventKind,
    pub job_id: u32,
    pub previous_state: Vec<JobState>,
    pub new_state: Vec<JobState>,
    pub at: DateTime<Utc>,
    /// Latest snapshot; `None` for `Completed`.
    pub job: Option<Job>,
}

/// Job watch filters. An empty filter accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWatchOptions {
    pub job_ids: Vec<u32>,
    pub states: Vec<JobState>,
    pub exclude_new: bool,
    pub exclude_completed: bool,
    /// Overrides the client's configured poll interval.
    pub poll_interval: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeEventKind {
    New,
    StateChanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEvent {
    pub kind: NodeEventKind,
    pub node_name: String,
    pub previous_state: Vec<NodeState>,
    pub new_state: Vec<NodeState>,
    pub at: DateTime<Utc>,
    pub node: Node,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeWatchOptions {
    pub node_names: Vec<String>,
    pub states: Vec<NodeState>,
    pub exclude_new: bool,
    pub poll_interval: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionEventKind {
    New,
    StateChanged,
    /// Dropped out of the partition list.
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionEvent {
    pub kind: PartitionEventKind,
    pub partition_name: String,
    pub previous_state: Vec<PartitionState>,
    pub new_state: Vec<PartitionState>,
    pub at: DateTime<Utc>,
    /// Latest snapshot; `None` for `Removed`.
    pub partition: Option<Partition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionWatchOptions {
    pub partition_names: Vec<String>,
    pub states: Vec<PartitionState>,
    pub exclude_new: bool,
    pub exclude_removed: bool,
    pub poll_interval: Option<Duration>,
}
