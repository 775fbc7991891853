use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts, accepts_any};
use super::tres::TresMap;

slurm_enum! {
    /// Base and flag states a node can report or be set to.
    NodeState {
        Idle => "IDLE",
        Allocated => "ALLOCATED",
        Mixed => "MIXED",
        Down => "DOWN",
        Error => "ERROR",
        Future => "FUTURE",
        Drain => "DRAIN",
        Draining => "DRAINING",
        Drained => "DRAINED",
        Resume => "RESUME",
        Reserved => "RESERVED",
        Completing => "COMPLETING",
        NotResponding => "NOT_RESPONDING",
        PoweredDown => "POWERED_DOWN",
        PoweringUp => "POWERING_UP",
        Maintenance => "MAINTENANCE",
        Fail => "FAIL",
        Planned => "PLANNED",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub hostname: String,
    pub address: String,
    pub state: Vec<NodeState>,
    pub reason: String,
    pub cpus: u32,
    pub alloc_cpus: u32,
    /// MiB
    pub real_memory: u64,
    /// MiB
    pub free_memory: u64,
    pub partitions: Vec<String>,
    pub features: Vec<String>,
    pub gres: String,
    pub architecture: String,
    pub os: String,
    pub boot_time: Option<DateTime<Utc>>,
    pub last_busy: Option<DateTime<Utc>>,
    pub weight: u32,
    pub tres: TresMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpdate {
    pub state: Option<Vec<NodeState>>,
    pub reason: Option<String>,
    pub features: Option<Vec<String>>,
    pub weight: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeListOptions {
    pub names: Vec<String>,
    pub states: Vec<NodeState>,
    pub partitions: Vec<String>,
    pub features: Vec<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Node> for NodeListOptions {
    fn matches(&self, node: &Node) -> bool {
        accepts(&self.names, &node.name)
            && accepts_any(&self.states, &node.state)
            && accepts_any(&self.partitions, &node.partitions)
            && self.features.iter().all(|f| node.features.contains(f))
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
