use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts, accepts_any};

slurm_enum! {
    PartitionState {
        Up => "UP",
        Down => "DOWN",
        Drain => "DRAIN",
        Inactive => "INACTIVE",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub name: String,
    pub state: Vec<PartitionState>,
    pub nodes: String,
    pub total_nodes: u32,
    pub total_cpus: u32,
    /// Minutes
    pub default_time: u32,
    /// Minutes
    pub max_time: u32,
    pub max_nodes: u32,
    pub priority_tier: u32,
    pub qos: String,
    pub allowed_accounts: Vec<String>,
}

/// Partitions are defined in `slurm.conf`; no REST revision accepts this yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionCreate {
    pub name: String,
    pub nodes: String,
    pub max_time: Option<u32>,
    pub state: Vec<PartitionState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionUpdate {
    pub nodes: Option<String>,
    pub max_time: Option<u32>,
    pub state: Option<Vec<PartitionState>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionListOptions {
    pub names: Vec<String>,
    pub states: Vec<PartitionState>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Partition> for PartitionListOptions {
    fn matches(&self, p: &Partition) -> bool {
        accepts(&self.names, &p.name) && accepts_any(&self.states, &p.state)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
