use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts};
use super::tres::TresMap;

slurm_enum! {
    PreemptMode {
        Off => "OFF",
        Cancel => "CANCEL",
        Checkpoint => "CHECKPOINT",
        Gang => "GANG",
        Requeue => "REQUEUE",
        Suspend => "SUSPEND",
        Within => "WITHIN",
    }
}

slurm_enum! {
    QosFlag {
        PartitionMinimumNode => "PARTITION_MINIMUM_NODE",
        PartitionMaximumNode => "PARTITION_MAXIMUM_NODE",
        PartitionTimeLimit => "PARTITION_TIME_LIMIT",
        EnforceUsageThreshold => "ENFORCE_USAGE_THRESHOLD",
        NoReserve => "NO_RESERVE",
        RequiredReservation => "REQUIRED_RESERVATION",
        DenyLimit => "DENY_LIMIT",
        OverridePartitionQos => "OVERRIDE_PARTITION_QOS",
        NoDecay => "NO_DECAY",
        UsageFactorSafe => "USAGE_FACTOR_SAFE",
        Relative => "RELATIVE",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Qos {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub priority: u32,
    pub preempt_mode: Vec<PreemptMode>,
    /// Names of QoS this one may preempt.
    pub preempt_list: Vec<String>,
    /// Seconds
    pub grace_time: u32,
    pub max_jobs_per_user: u32,
    pub max_jobs_per_account: u32,
    pub max_submit_jobs_per_user: u32,
    /// Minutes
    pub max_wall_time_per_job: u32,
    pub max_tres_per_user: TresMap,
    pub max_tres_per_job: TresMap,
    pub usage_factor: f64,
    pub usage_threshold: f64,
    pub flags: Vec<QosFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QosCreate {
    pub name: String,
    pub description: String,
    pub priority: Option<u32>,
    pub preempt_mode: Vec<PreemptMode>,
    pub preempt_list: Vec<String>,
    pub grace_time: Option<u32>,
    pub max_jobs_per_user: Option<u32>,
    pub max_jobs_per_account: Option<u32>,
    pub max_submit_jobs_per_user: Option<u32>,
    pub max_wall_time_per_job: Option<u32>,
    pub max_tres_per_user: TresMap,
    pub max_tres_per_job: TresMap,
    pub usage_factor: Option<f64>,
    pub usage_threshold: Option<f64>,
    pub flags: Vec<QosFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QosUpdate {
    pub description: Option<String>,
    pub priority: Option<u32>,
    pub preempt_mode: Option<Vec<PreemptMode>>,
    pub preempt_list: Option<Vec<String>>,
    pub grace_time: Option<u32>,
    pub max_jobs_per_user: Option<u32>,
    pub max_jobs_per_account: Option<u32>,
    pub max_submit_jobs_per_user: Option<u32>,
    pub max_wall_time_per_job: Option<u32>,
    pub max_tres_per_user: Option<TresMap>,
    pub max_tres_per_job: Option<TresMap>,
    pub usage_factor: Option<f64>,
    pub usage_threshold: Option<f64>,
    pub flags: Option<Vec<QosFlag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosListOptions {
    pub names: Vec<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Qos> for QosListOptions {
    fn matches(&self, q: &Qos) -> bool {
        accepts(&self.names, &q.name)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
