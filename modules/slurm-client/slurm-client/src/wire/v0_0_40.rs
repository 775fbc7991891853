//! `v0.0.40` schemas (Slurm 23.11).

use crate::noval::NoVal;

pub use super::common::{Coord, Tres};

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
        pub exit_code: Option<NoVal<i32>>,
        pub job_id: Option<u32>,
        /// Comma-separated base and flag states.
        pub job_state: Option<String>,
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

    pub struct JobDescMsg {
        pub account: Option<String>,
        pub array: Option<String>,
        pub comment: Option<String>,
        pub cpus_per_task: Option<u32>,
        pub current_working_directory: Option<String>,
        pub dependency: Option<String>,
        pub environment: Option<Vec<String>>,
        pub hold: Option<bool>,
        pub mail_type: Option<Vec<String>>,
        pub mail_user: Option<String>,
        pub maximum_nodes: Option<u32>,
        pub memory_per_node: Option<NoVal<u64>>,
        pub minimum_nodes: Option<u32>,
        pub name: Option<String>,
        pub nice: Option<i32>,
        pub partition: Option<String>,
        pub priority: Option<NoVal<u32>>,
        pub qos: Option<String>,
        pub standard_error: Option<String>,
        pub standard_output: Option<String>,
        pub tasks: Option<u32>,
        pub time_limit: Option<NoVal<u32>>,
    }

    /// The script travels beside the descriptor in this revision.
    pub struct JobSubmitReq {
        pub script: Option<String>,
        pub job: Option<JobDescMsg>,
    }

    pub struct Node {
        pub address: Option<String>,
        pub alloc_cpus: Option<u32>,
        pub architecture: Option<String>,
        pub boot_time: Option<i64>,
        pub cpus: Option<u32>,
        pub features: Option<Vec<String>>,
        pub free_mem: Option<NoVal<u64>>,
        pub gres: Option<String>,
        pub hostname: Option<String>,
        pub last_busy: Option<i64>,
        pub name: Option<String>,
        pub operating_system: Option<String>,
        pub partitions: Option<Vec<String>>,
        pub real_memory: Option<u64>,
        pub reason: Option<String>,
        pub state: Option<Vec<String>>,
        pub tres: Option<String>,
        pub weight: Option<u32>,
    }

    pub struct UpdateNodeMsg {
        pub features: Option<Vec<String>>,
        pub reason: Option<String>,
        pub state: Option<Vec<String>>,
        pub weight: Option<NoVal<u32>>,
    }

    pub struct PartitionNodes {
        pub configured: Option<String>,
        pub total: Option<u32>,
    }

    pub struct PartitionCpus {
        pub total: Option<u32>,
    }

    pub struct PartitionStatus {
        pub state: Option<Vec<String>>,
    }

    pub struct PartitionDefaults {
        pub time: Option<NoVal<u32>>,
    }

    pub struct PartitionMaximums {
        pub nodes: Option<NoVal<u32>>,
        pub time: Option<NoVal<u32>>,
    }

    pub struct PartitionPriority {
        pub tier: Option<u32>,
    }

    pub struct PartitionQos {
        pub assigned: Option<String>,
    }

    pub struct PartitionAccounts {
        pub allowed: Option<String>,
    }

    pub struct PartitionInfo {
        pub accounts: Option<PartitionAccounts>,
        pub cpus: Option<PartitionCpus>,
        pub defaults: Option<PartitionDefaults>,
        pub maximums: Option<PartitionMaximums>,
        pub name: Option<String>,
        pub nodes: Option<PartitionNodes>,
        pub partition: Option<PartitionStatus>,
        pub priority: Option<PartitionPriority>,
        pub qos: Option<PartitionQos>,
    }

    pub struct Account {
        pub coordinators: Option<Vec<Coord>>,
        pub description: Option<String>,
        pub flags: Option<Vec<String>>,
        pub name: Option<String>,
        pub organization: Option<String>,
    }

    pub struct UserDefault {
        pub account: Option<String>,
        pub wckey: Option<String>,
    }

    pub struct User {
        pub administrator_level: Option<Vec<String>>,
        pub coordinators: Option<Vec<Coord>>,
        pub default: Option<UserDefault>,
        pub name: Option<String>,
    }

    pub struct AssocDefault {
        pub qos: Option<String>,
    }

    /// `max.jobs.per`: group job count and the per-job wall clock.
    pub struct AssocJobsPer {
        pub accruing: Option<NoVal<u32>>,
        pub count: Option<NoVal<u32>>,
        pub submitted: Option<NoVal<u32>>,
        pub wall_clock: Option<NoVal<u32>>,
    }

    pub struct AssocMaxJobs {
        pub accruing: Option<NoVal<u32>>,
        pub active: Option<NoVal<u32>>,
        pub per: Option<AssocJobsPer>,
        pub total: Option<NoVal<u32>>,
    }

    pub struct AssocTresPer {
        pub job: Option<Vec<Tres>>,
        pub node: Option<Vec<Tres>>,
    }

    pub struct AssocMaxTres {
        pub per: Option<AssocTresPer>,
        pub total: Option<Vec<Tres>>,
    }

    pub struct AssocMax {
        pub jobs: Option<AssocMaxJobs>,
        pub tres: Option<AssocMaxTres>,
    }

    pub struct Association {
        pub account: Option<String>,
        pub cluster: Option<String>,
        pub default: Option<AssocDefault>,
        pub id: Option<u32>,
        pub is_default: Option<bool>,
        pub max: Option<AssocMax>,
        pub parent_account: Option<String>,
        pub partition: Option<String>,
        pub priority: Option<NoVal<u32>>,
        pub qos: Option<Vec<String>>,
        pub shares_raw: Option<u32>,
        pub user: Option<String>,
    }

    pub struct ReservationInfo {
        /// Comma-separated.
        pub accounts: Option<String>,
        pub core_count: Option<u32>,
        pub duration: Option<NoVal<u32>>,
        pub end_time: Option<NoVal<i64>>,
        pub features: Option<String>,
        pub flags: Option<Vec<String>>,
        pub name: Option<String>,
        pub node_count: Option<u32>,
        pub node_list: Option<String>,
        pub partition: Option<String>,
        pub start_time: Option<NoVal<i64>>,
        pub tres: Option<String>,
        /// Comma-separated.
        pub users: Option<String>,
    }

    pub struct ClusterController {
        pub host: Option<String>,
        pub port: Option<u16>,
    }

    pub struct ClusterRec {
        pub controller: Option<ClusterController>,
        pub flags: Option<Vec<String>>,
        pub name: Option<String>,
        pub nodes: Option<String>,
        pub rpc_version: Option<u32>,
        pub select_plugin: Option<String>,
        pub tres: Option<Vec<Tres>>,
    }

    pub struct Wckey {
        pub cluster: Option<String>,
        pub flags: Option<Vec<String>>,
        pub id: Option<u32>,
        pub name: Option<String>,
        pub user: Option<String>,
    }
}
