//! Manager traits: the version-independent operation contract.
//!
//! Each trait is implemented once per API version by the client crate.
//! Operations a version cannot express return [`SlurmError::Unsupported`]
//! without contacting `slurmrestd`.
//!
//! ```ignore
//! let jobs = client.jobs().ok_or(MyError::NoJobs)?;
//! let submitted = jobs.submit(&ctx, &JobCreate { script, ..Default::default() }).await?;
//! let job = jobs.get(&ctx, submitted.job_id).await?;
//! ```

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::context::RequestContext;
use crate::error::SlurmError;
use crate::models::{
    Account, AccountAssociationRequest, AccountCreate, AccountListOptions, AccountUpdate,
    AccountingConfig, ApiVersionInfo, Association, AssociationCreate, AssociationListOptions,
    AssociationUpdate, AssociationsCreated, Cluster, ClusterCreate, ClusterInfo,
    ClusterListOptions, ClusterStats, ClusterUpdate, Created, DatabaseDiagnostics, Diagnostics,
    Job, JobAllocateRequest, JobAllocation, JobCreate, JobEvent, JobListOptions,
    JobSubmitResponse, JobUpdate, JobWatchOptions, License, ListResult, Node, NodeEvent,
    NodeListOptions, NodeUpdate, NodeWatchOptions, Partition, PartitionCreate, PartitionEvent,
    PartitionListOptions, PartitionUpdate, PartitionWatchOptions, PingResult, Qos, QosCreate,
    QosListOptions, QosUpdate, Reservation, ReservationCreate, ReservationListOptions,
    ReservationUpdate, Share, SharesOptions, TrackedResource, TresCreate, User,
    UserAssociationRequest, UserCreate, UserListOptions, UserUpdate, Wckey, WckeyCreate,
    WckeyListOptions, WckeyUpdate,
};
use crate::version::ApiVersion;

/// Jobs: query, submit, and control.
#[async_trait]
pub trait JobManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    /// Fetch all jobs once, then filter and paginate client-side.
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &JobListOptions,
    ) -> Result<ListResult<Job>, SlurmError>;

    /// # Errors
    ///
    /// - `NotFound` if the job is unknown to the controller
    async fn get(&self, ctx: &RequestContext, id: u32) -> Result<Job, SlurmError>;

    /// Submit a batch job.
    ///
    /// # Errors
    ///
    /// - `Validation` when the script is missing or limits are inconsistent;
    ///   no request is sent in that case
    async fn submit(
        &self,
        ctx: &RequestContext,
        job: &JobCreate,
    ) -> Result<JobSubmitResponse, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        id: u32,
        update: &JobUpdate,
    ) -> Result<(), SlurmError>;

    async fn cancel(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError>;

    async fn hold(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError>;

    async fn release(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError>;

    /// Send a signal by name (`SIGTERM`) or number (`15`).
    async fn signal(&self, ctx: &RequestContext, id: u32, signal: &str)
    -> Result<(), SlurmError>;

    /// Attach a message to the job, shown to the owner.
    async fn notify(&self, ctx: &RequestContext, id: u32, message: &str)
    -> Result<(), SlurmError>;

    async fn requeue(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError>;

    async fn allocate(
        &self,
        ctx: &RequestContext,
        request: &JobAllocateRequest,
    ) -> Result<JobAllocation, SlurmError>;

    /// Poll the job list and stream changes until `ctx` is cancelled or the
    /// receiver is dropped. `None` options watch every job.
    async fn watch(
        &self,
        ctx: &RequestContext,
        opts: Option<&JobWatchOptions>,
    ) -> Result<mpsc::Receiver<JobEvent>, SlurmError>;
}

#[async_trait]
pub trait NodeManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &NodeListOptions,
    ) -> Result<ListResult<Node>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Node, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &NodeUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;

    /// Drain a node. `reason` must not be empty.
    async fn drain(&self, ctx: &RequestContext, name: &str, reason: &str)
    -> Result<(), SlurmError>;

    async fn resume(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;

    async fn watch(
        &self,
        ctx: &RequestContext,
        opts: Option<&NodeWatchOptions>,
    ) -> Result<mpsc::Receiver<NodeEvent>, SlurmError>;
}

#[async_trait]
pub trait PartitionManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &PartitionListOptions,
    ) -> Result<ListResult<Partition>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Partition, SlurmError>;

    async fn create(
        &self,
        ctx: &RequestContext,
        partition: &PartitionCreate,
    ) -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &PartitionUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;

    /// Poll the partition list and stream state changes.
    async fn watch(
        &self,
        ctx: &RequestContext,
        opts: Option<&PartitionWatchOptions>,
    ) -> Result<mpsc::Receiver<PartitionEvent>, SlurmError>;
}

#[async_trait]
pub trait AccountManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &AccountListOptions,
    ) -> Result<ListResult<Account>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Account, SlurmError>;

    async fn create(
        &self,
        ctx: &RequestContext,
        account: &AccountCreate,
    ) -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &AccountUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;

    async fn create_association(
        &self,
        ctx: &RequestContext,
        request: &AccountAssociationRequest,
    ) -> Result<AssociationsCreated, SlurmError>;
}

#[async_trait]
pub trait UserManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &UserListOptions,
    ) -> Result<ListResult<User>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<User, SlurmError>;

    async fn create(&self, ctx: &RequestContext, user: &UserCreate)
    -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &UserUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;

    async fn create_association(
        &self,
        ctx: &RequestContext,
        request: &UserAssociationRequest,
    ) -> Result<AssociationsCreated, SlurmError>;
}

#[async_trait]
pub trait AssociationManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &AssociationListOptions,
    ) -> Result<ListResult<Association>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, id: u32) -> Result<Association, SlurmError>;

    async fn create(
        &self,
        ctx: &RequestContext,
        association: &AssociationCreate,
    ) -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        id: u32,
        update: &AssociationUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError>;
}

#[async_trait]
pub trait QosManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &QosListOptions,
    ) -> Result<ListResult<Qos>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Qos, SlurmError>;

    async fn create(&self, ctx: &RequestContext, qos: &QosCreate) -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &QosUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;
}

#[async_trait]
pub trait ReservationManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &ReservationListOptions,
    ) -> Result<ListResult<Reservation>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Reservation, SlurmError>;

    async fn create(
        &self,
        ctx: &RequestContext,
        reservation: &ReservationCreate,
    ) -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &ReservationUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;
}

#[async_trait]
pub trait ClusterManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &ClusterListOptions,
    ) -> Result<ListResult<Cluster>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Cluster, SlurmError>;

    async fn create(
        &self,
        ctx: &RequestContext,
        cluster: &ClusterCreate,
    ) -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &ClusterUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError>;
}

#[async_trait]
pub trait WckeyManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &WckeyListOptions,
    ) -> Result<ListResult<Wckey>, SlurmError>;

    async fn get(&self, ctx: &RequestContext, id: u32) -> Result<Wckey, SlurmError>;

    async fn create(
        &self,
        ctx: &RequestContext,
        wckey: &WckeyCreate,
    ) -> Result<Created, SlurmError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        id: u32,
        update: &WckeyUpdate,
    ) -> Result<(), SlurmError>;

    async fn delete(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError>;
}

/// Controller health and identity.
#[async_trait]
pub trait InfoManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn ping(&self, ctx: &RequestContext) -> Result<Vec<PingResult>, SlurmError>;

    /// Cluster name and Slurm release, as reported by the controller.
    async fn get(&self, ctx: &RequestContext) -> Result<ClusterInfo, SlurmError>;

    /// Check that slurmdbd answers.
    async fn ping_database(&self, ctx: &RequestContext) -> Result<(), SlurmError>;

    /// Node, CPU and job totals. Costs two requests.
    async fn stats(&self, ctx: &RequestContext) -> Result<ClusterStats, SlurmError>;

    /// The REST revision in use and the Slurm release serving it.
    async fn api_version(&self, ctx: &RequestContext) -> Result<ApiVersionInfo, SlurmError>;
}

/// Cluster-wide reports and actions outside any entity.
///
/// Coverage differs between revisions; missing routes return
/// [`SlurmError::Unsupported`].
#[async_trait]
pub trait StandaloneManager: Send + Sync {
    fn version(&self) -> ApiVersion;

    async fn licenses(&self, ctx: &RequestContext) -> Result<Vec<License>, SlurmError>;

    async fn shares(
        &self,
        ctx: &RequestContext,
        opts: &SharesOptions,
    ) -> Result<Vec<Share>, SlurmError>;

    async fn config(&self, ctx: &RequestContext) -> Result<AccountingConfig, SlurmError>;

    async fn diagnostics(&self, ctx: &RequestContext) -> Result<Diagnostics, SlurmError>;

    async fn db_diagnostics(
        &self,
        ctx: &RequestContext,
    ) -> Result<DatabaseDiagnostics, SlurmError>;

    async fn tres(&self, ctx: &RequestContext) -> Result<Vec<TrackedResource>, SlurmError>;

    /// # Errors
    ///
    /// - `Validation` when `kind` is empty
    async fn create_tres(
        &self,
        ctx: &RequestContext,
        tres: &TresCreate,
    ) -> Result<Created, SlurmError>;

    /// Ask slurmctld to reread its configuration. Returns the warnings it
    /// reported.
    async fn reconfigure(&self, ctx: &RequestContext) -> Result<Vec<String>, SlurmError>;
}
