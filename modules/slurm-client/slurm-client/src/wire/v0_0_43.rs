//! `v0.0.43` schemas (Slurm 25.05).
//!
//! Reservations become writable and users can be associated in bulk.

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
pub use super::v0_0_42::{
    AccountShort, AccountsAddCond, AccountsAssociationReq, AssocRecSet, JobAllocReq, JobDescMsg,
    JobInfo, JobSubmitReq,
};

wire_model! {
    pub struct ReservationDescMsg {
        pub accounts: Option<Vec<String>>,
        pub duration: Option<NoVal<u32>>,
        pub end_time: Option<NoVal<i64>>,
        pub features: Option<String>,
        pub flags: Option<Vec<String>>,
        pub groups: Option<Vec<String>>,
        pub name: Option<String>,
        pub node_count: Option<NoVal<u32>>,
        pub node_list: Option<String>,
        pub partition: Option<String>,
        pub start_time: Option<NoVal<i64>>,
        pub users: Option<Vec<String>>,
    }

    pub struct UserShort {
        pub adminlevel: Option<Vec<String>>,
        pub defaultaccount: Option<String>,
        pub defaultwckey: Option<String>,
    }

    pub struct UsersAddCond {
        pub accounts: Option<Vec<String>>,
        pub association: Option<AssocRecSet>,
        pub clusters: Option<Vec<String>>,
        pub partitions: Option<Vec<String>>,
        pub users: Option<Vec<String>>,
    }

    pub struct UsersAssociationReq {
        pub association_condition: Option<UsersAddCond>,
        pub user: Option<UserShort>,
    }
}
