//! `v0.0.41` schemas (Slurm 24.05).
//!
//! Job states become a list, exit codes carry the verbose status record, node
//! timestamps switch to the no-value wrapper, and QoS appears. Cluster and
//! WCKey schemas are not published by this revision.

use crate::noval::NoVal;

pub use super::common::{Coord, ProcessExitCode, Tres};
pub use super::v0_0_40::{
    Account, AssocDefault, Association, JobDescMsg, JobSubmitReq, PartitionAccounts,
    PartitionCpus, PartitionDefaults, PartitionInfo, PartitionMaximums, PartitionNodes,
    PartitionPriority, PartitionQos, PartitionStatus, ReservationInfo, UpdateNodeMsg, User,
    UserDefault,
};

wire_model! {
    pub struct JobInfo {
        pub account: Option<String>,
        pub array_job_id: Option<NoVal<u32>>,
        pub array_task_id: Option<NoVal<u32>>,
        pub batch_host: Option<String>,
        pub command: Option<String>,
        pub comment: Option<String>,
        pub cpus: Option<NoVal<u32>>,
        pub current_working_directory: Option<String>,
        pub end_time: Option<NoVal<i64>>,
        pub exit_code: Option<ProcessExitCode>,
        pub job_id: Option<u32>,
        pub job_state: Option<Vec<String>>,
        pub name: Option<String>,
        pub nice: Option<i32>,
        pub node_count: Option<NoVal<u32>>,
        pub nodes: Option<String>,
        pub partition: Option<String>,
        pub priority: Option<NoVal<u32>>,
        pub qos: Option<String>,
        pub standard_error: Option<String>,
        pub standard_output: Option<String>,
        pub start_time: Option<NoVal<i64>>,
        pub state_reason: Option<String>,
        pub submit_time: Option<NoVal<i64>>,
        pub time_limit: Option<NoVal<u32>>,
        pub tres_req_str: Option<String>,
        pub user_name: Option<String>,
    }

    pub struct Node {
        pub address: Option<String>,
        pub alloc_cpus: Option<u32>,
        pub architecture: Option<String>,
        pub boot_time: Option<NoVal<i64>>,
        pub cpus: Option<u32>,
        pub features: Option<Vec<String>>,
        pub free_mem: Option<NoVal<u64>>,
        pub gres: Option<String>,
        pub hostname: Option<String>,
        pub last_busy: Option<NoVal<i64>>,
        pub name: Option<String>,
        pub operating_system: Option<String>,
        pub partitions: Option<Vec<String>>,
        pub real_memory: Option<u64>,
        pub reason: Option<String>,
        pub state: Option<Vec<String>>,
        pub tres: Option<String>,
        pub weight: Option<u32>,
    }

    pub struct QosPer {
        pub account: Option<NoVal<u32>>,
        pub user: Option<NoVal<u32>>,
    }

    /// Running-job limits; the sibling `per` record holds submit limits.
    pub struct QosActiveJobs {
        pub per: Option<QosPer>,
    }

    pub struct QosMaxJobs {
        pub active_jobs: Option<QosActiveJobs>,
        pub count: Option<NoVal<u32>>,
        pub per: Option<QosPer>,
    }

    pub struct QosTresPer {
        pub account: Option<Vec<Tres>>,
        pub job: Option<Vec<Tres>>,
        pub node: Option<Vec<Tres>>,
        pub user: Option<Vec<Tres>>,
    }

    pub struct QosMaxTres {
        pub per: Option<QosTresPer>,
        pub total: Option<Vec<Tres>>,
    }

    pub struct QosWallClockPer {
        pub job: Option<NoVal<u32>>,
        pub qos: Option<NoVal<u32>>,
    }

    pub struct QosWallClock {
        pub per: Option<QosWallClockPer>,
    }

    pub struct QosMax {
        pub jobs: Option<QosMaxJobs>,
        pub tres: Option<QosMaxTres>,
        pub wall_clock: Option<QosWallClock>,
    }

    pub struct QosLimits {
        pub factor: Option<NoVal<f64>>,
        pub grace_time: Option<u32>,
        pub max: Option<QosMax>,
    }

    pub struct QosPreempt {
        pub exempt_time: Option<NoVal<u32>>,
        pub list: Option<Vec<String>>,
        pub mode: Option<Vec<String>>,
    }

    pub struct Qos {
        pub description: Option<String>,
        pub flags: Option<Vec<String>>,
        pub id: Option<u32>,
        pub limits: Option<QosLimits>,
        pub name: Option<String>,
        pub preempt: Option<QosPreempt>,
        pub priority: Option<NoVal<u32>>,
        pub usage_factor: Option<NoVal<f64>>,
        pub usage_threshold: Option<NoVal<f64>>,
    }
}
