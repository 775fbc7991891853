//! Slurm Client SDK
//!
//! Version-independent surface of the Slurm REST client:
//!
//! - [`api`] - manager traits, one per resource family
//! - [`models`] - common entity, create, update and list types
//! - [`SlurmError`] - error taxonomy with stable codes and retryability
//! - [`RequestContext`] - cancellation and deadline for every call
//! - [`ApiVersion`] - supported REST revisions and selection
//!
//! ## Usage
//!
//! ```ignore
//! use slurm_client_sdk::{JobListOptions, JobState, RequestContext};
//!
//! let ctx = RequestContext::new().with_timeout(Duration::from_secs(30));
//! let running = client
//!     .jobs()
//!     .expect("jobs are available in every version")
//!     .list(&ctx, &JobListOptions { states: vec![JobState::Running], ..Default::default() })
//!     .await?;
//! ```

pub mod api;
pub mod context;
pub mod error;
pub mod models;
pub mod version;

pub use api::{
    AccountManager, AssociationManager, ClusterManager, InfoManager, JobManager, NodeManager,
    PartitionManager, QosManager, ReservationManager, StandaloneManager, UserManager,
    WckeyManager,
};
pub use context::{ContextState, RequestContext};
pub use error::{
    ApiErrorDetail, ApiFailure, ErrorCategory, ErrorCode, Origin, SlurmError, TransportError,
    TransportErrorKind,
};
pub use models::{
    Account, AccountAssociationRequest, AccountCreate, AccountFlag, AccountListOptions,
    AccountUpdate, AccountingConfig, AdminLevel, ApiVersionInfo, Association, AssociationCreate,
    AssociationListOptions, AssociationUpdate, AssociationsCreated, Cluster, ClusterCreate,
    ClusterFlag, ClusterInfo, ClusterListOptions, ClusterStats, ClusterUpdate, Created,
    DatabaseDiagnostics, Diagnostics, Job, JobAllocateRequest, JobAllocation, JobCreate, JobEvent,
    JobEventKind, JobListOptions, JobState, JobSubmitResponse, JobUpdate, JobWatchOptions, License,
    ListQuery, ListResult, MailType, Node, NodeEvent, NodeEventKind, NodeListOptions, NodeState,
    NodeUpdate, NodeWatchOptions, Page, Partition, PartitionCreate, PartitionEvent,
    PartitionEventKind, PartitionListOptions, PartitionState, PartitionUpdate,
    PartitionWatchOptions, PingResult, PreemptMode, Qos, QosCreate, QosFlag, QosListOptions,
    QosUpdate, Reservation, ReservationCreate, ReservationFlag, ReservationListOptions,
    ReservationUpdate, RpcStat, Share, ShareKind, SharesOptions, TrackedResource, Tres,
    TresCreate, TresError, TresMap, User, UserAssociationRequest, UserCreate, UserListOptions,
    UserUpdate, Wckey, WckeyCreate, WckeyFlag, WckeyListOptions, WckeyUpdate, format_tres,
    map_to_tres, merge_tres, paginate, parse_tres, tres_to_map, validate_tres,
};
pub use version::{ApiVersion, EntityKind, Operation, Verb, VersionParseError};
