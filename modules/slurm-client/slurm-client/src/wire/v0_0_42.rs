//! `v0.0.42` schemas (Slurm 24.11).
//!
//! The batch script moves into the job descriptor, interactive allocation and
//! account association requests appear, and Cluster/WCKey return.

use crate::noval::NoVal;

pub use super::common::{Coord, ProcessExitCode, Tres};
pub use super::v0_0_40::{
    ClusterController, ClusterRec, PartitionAccounts, PartitionCpus, PartitionDefaults,
    PartitionInfo, PartitionMaximums, PartitionNodes, PartitionPriority, PartitionQos,
    PartitionStatus, Wckey,
};
pub use super::v0_0_41::{
    Account, AssocDefault, Association, Node, Qos, ReservationInfo, UpdateNodeMsg, User,
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
        pub submit_line: Option<String>,
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
        pub script: Option<String>,
        pub standard_error: Option<String>,
        pub standard_output: Option<String>,
        pub tasks: Option<u32>,
        pub time_limit: Option<NoVal<u32>>,
    }

    pub struct JobSubmitReq {
        pub job: Option<JobDescMsg>,
    }

    pub struct JobAllocReq {
        pub job: Option<JobDescMsg>,
    }

    /// Association attributes applied to every account or user being added.
    pub struct AssocRecSet {
        pub defaultqos: Option<String>,
        pub fairshare: Option<u32>,
        pub grpjobs: Option<NoVal<u32>>,
        pub grptres: Option<Vec<Tres>>,
        pub maxjobs: Option<NoVal<u32>>,
        pub maxsubmitjobs: Option<NoVal<u32>>,
        pub maxtresperjob: Option<Vec<Tres>>,
        pub maxwalldurationperjob: Option<NoVal<u32>>,
        pub parent: Option<String>,
        pub priority: Option<NoVal<u32>>,
        pub qoslevel: Option<Vec<String>>,
    }

    pub struct AccountsAddCond {
        pub accounts: Option<Vec<String>>,
        pub association: Option<AssocRecSet>,
        pub clusters: Option<Vec<String>>,
    }

    pub struct AccountShort {
        pub description: Option<String>,
        pub organization: Option<String>,
    }

    pub struct AccountsAssociationReq {
        pub account: Option<AccountShort>,
        pub association_condition: Option<AccountsAddCond>,
    }
}
