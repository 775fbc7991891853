//! Version-agnostic Slurm data model.
//!
//! Entities are plain values with one canonical zero per field. Update inputs
//! use `Option<T>` throughout: `None` leaves a field untouched, `Some(zero)`
//! explicitly clears it.

/// Declares a Slurm keyword enum that round-trips through its upper-case
/// wire spelling and degrades unknown keywords to `Unknown`.
macro_rules! slurm_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
            #[serde(other, rename = "UNKNOWN")]
            Unknown,
        }

        impl $name {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Unknown => "UNKNOWN",
                }
            }

            /// Case-insensitive keyword lookup.
            #[must_use]
            pub fn parse(s: &str) -> Self {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Self::$variant;
                    }
                )+
                Self::Unknown
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::parse(s)
            }
        }
    };
}

pub mod account;
pub mod association;
pub mod cluster;
pub mod info;
pub mod job;
pub mod list;
pub mod node;
pub mod partition;
pub mod qos;
pub mod reservation;
pub mod standalone;
pub mod tres;
pub mod user;
pub mod watch;
pub mod wckey;

pub use account::{
    Account, AccountAssociationRequest, AccountCreate, AccountFlag, AccountListOptions,
    AccountUpdate,
};
pub use association::{Association, AssociationCreate, AssociationListOptions, AssociationUpdate};
pub use cluster::{Cluster, ClusterCreate, ClusterFlag, ClusterListOptions, ClusterUpdate};
pub use info::{ApiVersionInfo, ClusterInfo, ClusterStats, PingResult};
pub use job::{
    Job, JobAllocateRequest, JobAllocation, JobCreate, JobListOptions, JobState, JobSubmitResponse,
    JobUpdate, MailType,
};
pub use list::{AssociationsCreated, Created, ListQuery, ListResult, Page, paginate};
pub use node::{Node, NodeListOptions, NodeState, NodeUpdate};
pub use partition::{
    Partition, PartitionCreate, PartitionListOptions, PartitionState, PartitionUpdate,
};
pub use qos::{PreemptMode, Qos, QosCreate, QosFlag, QosListOptions, QosUpdate};
pub use reservation::{
    Reservation, ReservationCreate, ReservationFlag, ReservationListOptions, ReservationUpdate,
};
pub use standalone::{
    AccountingConfig, DatabaseDiagnostics, Diagnostics, License, RpcStat, Share, ShareKind,
    SharesOptions, TrackedResource, TresCreate,
};
pub use tres::{
    Tres, TresError, TresMap, format_tres, map_to_tres, merge_tres, parse_tres, tres_to_map,
    validate_tres,
};
pub use user::{AdminLevel, User, UserAssociationRequest, UserCreate, UserListOptions, UserUpdate};
pub use watch::{
    JobEvent, JobEventKind, JobWatchOptions, NodeEvent, NodeEventKind, NodeWatchOptions,
    PartitionEvent, PartitionEventKind, PartitionWatchOptions,
};
pub use wckey::{Wckey, WckeyCreate, WckeyFlag, WckeyListOptions, WckeyUpdate};
