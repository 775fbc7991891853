//! `v0.0.44` schemas (Slurm 25.11).
//!
//! Nodes report their topology and jobs their expanded output path.

use crate::noval::NoVal;

pub use super::common::{Coord, ProcessExitCode, Tres};
pub use super::v0_0_40::{
    ClusterController, ClusterRec, PartitionAccounts, PartitionCpus, PartitionDefaults,
    PartitionInfo, PartitionMaximums, PartitionNodes, PartitionPriority, PartitionQos,
    PartitionStatus, Wckey,
};
pub use super::v0_0_41::{
    Account, AssocDefault, Association, Qos, ReservationInfo, UpdateNodeMsg, User, UserDefault,
};
pub use super::v0_0_42::{
    AccountShort, AccountsAddCond, AccountsAssociationReq, AssocRecSet, JobAllocReq, JobDescMsg,
    JobSubmitReq,
};
pub use super::v0_0_43::{ReservationDescMsg, UserShort, UsersAddCond, UsersAssociationReq};

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
        pub stdout_expanded: Option<String>,
        pub submit_line: Option<String>,
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
        pub topology: Option<String>,
        pub tres: Option<String>,
        pub weight: Option<u32>,
    }
}
