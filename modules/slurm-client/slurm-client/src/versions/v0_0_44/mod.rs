// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.
//! `v0.0.44` bindings.

use std::sync::Arc;

use serde_json::Value;
use slurm_client_sdk::{
    Account, AccountAssociationRequest, AccountCreate, AccountListOptions, AccountUpdate,
    ApiVersion, Association, AssociationCreate, AssociationListOptions, AssociationUpdate, Cluster,
    ClusterCreate, ClusterListOptions, ClusterUpdate, EntityKind, Job, JobAllocateRequest,
    JobCreate, JobListOptions, JobUpdate, Node, NodeListOptions, NodeUpdate, Operation, Partition,
    PartitionCreate, PartitionListOptions, PartitionUpdate, Qos, QosCreate, QosListOptions,
    QosUpdate, Reservation, ReservationCreate, ReservationListOptions, ReservationUpdate, User,
    UserAssociationRequest, UserCreate, UserListOptions, UserUpdate, Verb, Wckey, WckeyCreate,
    WckeyListOptions, WckeyUpdate,
};

use super::{
    AccountAssociations, Binding, Capabilities, Endpoint, JobVerbs, Managers, UserAssociations,
    collection,
};
use crate::adapter::{EntityAdapter, InfoAdapter, StandaloneAdapter};
use crate::transport::WireClient;
use crate::watch::WatchConfig;
use crate::wire::common::take_collection;
use crate::wire::v0_0_44::{
    Account as WireAccount, Association as WireAssociation, ClusterRec, JobInfo, JobSubmitReq,
    Node as WireNode, PartitionInfo, Qos as WireQos, ReservationInfo, User as WireUser,
    Wckey as WireWckey,
};

pub mod account;
pub mod association;
pub mod cluster;
pub mod job;
pub mod node;
pub mod partition;
pub mod qos;
pub mod reservation;
pub mod user;
pub mod wckey;

pub(crate) mod account_extra;
pub(crate) mod association_extra;
pub(crate) mod cluster_extra;
pub(crate) mod job_extra;
pub(crate) mod partition_extra;
pub(crate) mod qos_extra;
pub(crate) mod user_extra;

pub static CAPABILITIES: Capabilities = Capabilities {
    version: ApiVersion::V0_0_44,
    entities: &[
        EntityKind::Job,
        EntityKind::Node,
        EntityKind::Partition,
        EntityKind::Account,
        EntityKind::User,
        EntityKind::Association,
        EntityKind::Qos,
        EntityKind::Reservation,
        EntityKind::Cluster,
        EntityKind::Wckey,
    ],
    endpoints: &[
        (Operation::new(EntityKind::Job, Verb::List), Endpoint::get("/slurm/v0.0.44/jobs/")),
        (Operation::new(EntityKind::Job, Verb::Watch), Endpoint::get("/slurm/v0.0.44/jobs/")),
        (Operation::new(EntityKind::Job, Verb::Get), Endpoint::get("/slurm/v0.0.44/job/{id}")),
        (
            Operation::new(EntityKind::Job, Verb::Submit),
            Endpoint::post("/slurm/v0.0.44/job/submit"),
        ),
        (Operation::new(EntityKind::Job, Verb::Update), Endpoint::post("/slurm/v0.0.44/job/{id}")),
        (Operation::new(EntityKind::Job, Verb::Hold), Endpoint::post("/slurm/v0.0.44/job/{id}")),
        (Operation::new(EntityKind::Job, Verb::Release), Endpoint::post("/slurm/v0.0.44/job/{id}")),
        (
            Operation::new(EntityKind::Job, Verb::Cancel),
            Endpoint::delete("/slurm/v0.0.44/job/{id}"),
        ),
        (Operation::new(EntityKind::Job, Verb::Notify), Endpoint::post("/slurm/v0.0.44/job/{id}")),
        (
            Operation::new(EntityKind::Job, Verb::Requeue),
            Endpoint::delete("/slurm/v0.0.44/job/{id}")
                .with_query(&[("flags", "FEDERATION_REQUEUE")]),
        ),
        (
            Operation::new(EntityKind::Job, Verb::Allocate),
            Endpoint::post("/slurm/v0.0.44/job/allocate"),
        ),
        (Operation::new(EntityKind::Node, Verb::List), Endpoint::get("/slurm/v0.0.44/nodes/")),
        (Operation::new(EntityKind::Node, Verb::Watch), Endpoint::get("/slurm/v0.0.44/nodes/")),
        (Operation::new(EntityKind::Node, Verb::Get), Endpoint::get("/slurm/v0.0.44/node/{id}")),
        (
            Operation::new(EntityKind::Node, Verb::Update),
            Endpoint::post("/slurm/v0.0.44/node/{id}"),
        ),
        (Operation::new(EntityKind::Node, Verb::Drain), Endpoint::post("/slurm/v0.0.44/node/{id}")),
        (
            Operation::new(EntityKind::Node, Verb::Resume),
            Endpoint::post("/slurm/v0.0.44/node/{id}"),
        ),
        (
            Operation::new(EntityKind::Node, Verb::Delete),
            Endpoint::delete("/slurm/v0.0.44/node/{id}"),
        ),
        (
            Operation::new(EntityKind::Partition, Verb::List),
            Endpoint::get("/slurm/v0.0.44/partitions/"),
        ),
        (
            Operation::new(EntityKind::Partition, Verb::Watch),
            Endpoint::get("/slurm/v0.0.44/partitions/"),
        ),
        (
            Operation::new(EntityKind::Partition, Verb::Get),
            Endpoint::get("/slurm/v0.0.44/partition/{id}"),
        ),
        (
            Operation::new(EntityKind::Account, Verb::List),
            Endpoint::get("/slurmdb/v0.0.44/accounts/"),
        ),
        (
            Operation::new(EntityKind::Account, Verb::Get),
            Endpoint::get("/slurmdb/v0.0.44/account/{id}"),
        ),
        (
            Operation::new(EntityKind::Account, Verb::Create),
            Endpoint::post("/slurmdb/v0.0.44/accounts_association/"),
        ),
        (
            Operation::new(EntityKind::Account, Verb::Update),
            Endpoint::post("/slurmdb/v0.0.44/accounts/"),
        ),
        (
            Operation::new(EntityKind::Account, Verb::Delete),
            Endpoint::delete("/slurmdb/v0.0.44/account/{id}"),
        ),
        (
            Operation::new(EntityKind::Account, Verb::CreateAssociation),
            Endpoint::post("/slurmdb/v0.0.44/accounts_association/"),
        ),
        (Operation::new(EntityKind::User, Verb::List), Endpoint::get("/slurmdb/v0.0.44/users/")),
        (Operation::new(EntityKind::User, Verb::Get), Endpoint::get("/slurmdb/v0.0.44/user/{id}")),
        (Operation::new(EntityKind::User, Verb::Create), Endpoint::post("/slurmdb/v0.0.44/users/")),
        (Operation::new(EntityKind::User, Verb::Update), Endpoint::post("/slurmdb/v0.0.44/users/")),
        (
            Operation::new(EntityKind::User, Verb::Delete),
            Endpoint::delete("/slurmdb/v0.0.44/user/{id}"),
        ),
        (
            Operation::new(EntityKind::User, Verb::CreateAssociation),
            Endpoint::post("/slurmdb/v0.0.44/users_association/"),
        ),
        (
            Operation::new(EntityKind::Association, Verb::List),
            Endpoint::get("/slurmdb/v0.0.44/associations/"),
        ),
        (
            Operation::new(EntityKind::Association, Verb::Get),
            Endpoint::get("/slurmdb/v0.0.44/associations/").with_query(&[("id", "{id}")]),
        ),
        (
            Operation::new(EntityKind::Association, Verb::Create),
            Endpoint::post("/slurmdb/v0.0.44/associations/"),
        ),
        (
            Operation::new(EntityKind::Association, Verb::Update),
            Endpoint::post("/slurmdb/v0.0.44/associations/"),
        ),
        (
            Operation::new(EntityKind::Association, Verb::Delete),
            Endpoint::delete("/slurmdb/v0.0.44/association/").with_query(&[("id", "{id}")]),
        ),
        (Operation::new(EntityKind::Qos, Verb::List), Endpoint::get("/slurmdb/v0.0.44/qos/")),
        (Operation::new(EntityKind::Qos, Verb::Get), Endpoint::get("/slurmdb/v0.0.44/qos/{id}")),
        (Operation::new(EntityKind::Qos, Verb::Create), Endpoint::post("/slurmdb/v0.0.44/qos/")),
        (Operation::new(EntityKind::Qos, Verb::Update), Endpoint::post("/slurmdb/v0.0.44/qos/")),
        (
            Operation::new(EntityKind::Qos, Verb::Delete),
            Endpoint::delete("/slurmdb/v0.0.44/qos/{id}"),
        ),
        (
            Operation::new(EntityKind::Reservation, Verb::List),
            Endpoint::get("/slurm/v0.0.44/reservations/"),
        ),
        (
            Operation::new(EntityKind::Reservation, Verb::Get),
            Endpoint::get("/slurm/v0.0.44/reservation/{id}"),
        ),
        (
            Operation::new(EntityKind::Reservation, Verb::Create),
            Endpoint::post("/slurm/v0.0.44/reservations/"),
        ),
        (
            Operation::new(EntityKind::Reservation, Verb::Update),
            Endpoint::post("/slurm/v0.0.44/reservations/"),
        ),
        (
            Operation::new(EntityKind::Reservation, Verb::Delete),
            Endpoint::delete("/slurm/v0.0.44/reservation/{id}"),
        ),
        (
            Operation::new(EntityKind::Cluster, Verb::List),
            Endpoint::get("/slurmdb/v0.0.44/clusters/"),
        ),
        (
            Operation::new(EntityKind::Cluster, Verb::Get),
            Endpoint::get("/slurmdb/v0.0.44/cluster/{id}"),
        ),
        (
            Operation::new(EntityKind::Cluster, Verb::Create),
            Endpoint::post("/slurmdb/v0.0.44/clusters/"),
        ),
        (
            Operation::new(EntityKind::Cluster, Verb::Delete),
            Endpoint::delete("/slurmdb/v0.0.44/cluster/{id}"),
        ),
        (Operation::new(EntityKind::Wckey, Verb::List), Endpoint::get("/slurmdb/v0.0.44/wckeys/")),
        (
            Operation::new(EntityKind::Wckey, Verb::Get),
            Endpoint::get("/slurmdb/v0.0.44/wckey/{id}"),
        ),
        (
            Operation::new(EntityKind::Wckey, Verb::Create),
            Endpoint::post("/slurmdb/v0.0.44/wckeys/"),
        ),
        (
            Operation::new(EntityKind::Wckey, Verb::Delete),
            Endpoint::delete("/slurmdb/v0.0.44/wckey/{id}"),
        ),
        (Operation::new(EntityKind::Info, Verb::Ping), Endpoint::get("/slurm/v0.0.44/ping/")),
        (Operation::new(EntityKind::Info, Verb::Get), Endpoint::get("/slurm/v0.0.44/ping/")),
        (Operation::new(EntityKind::Info, Verb::Version), Endpoint::get("/slurm/v0.0.44/ping/")),
        (Operation::new(EntityKind::Info, Verb::Stats), Endpoint::get("/slurm/v0.0.44/diag/")),
        (
            Operation::new(EntityKind::Info, Verb::PingDatabase),
            Endpoint::get("/slurmdb/v0.0.44/config"),
        ),
        (
            Operation::new(EntityKind::Standalone, Verb::Licenses),
            Endpoint::get("/slurm/v0.0.44/licenses/"),
        ),
        (
            Operation::new(EntityKind::Standalone, Verb::Config),
            Endpoint::get("/slurmdb/v0.0.44/config"),
        ),
        (
            Operation::new(EntityKind::Standalone, Verb::Diagnostics),
            Endpoint::get("/slurm/v0.0.44/diag/"),
        ),
    ],
};

pub struct JobBinding;

impl Binding for JobBinding {
    const ENTITY: EntityKind = EntityKind::Job;

    type Key = u32;
    type Entity = Job;
    type Create = JobCreate;
    type Update = JobUpdate;
    type Query = JobListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Job) -> u32 {
        entity.id
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Job>, serde_json::Error> {
        let records = take_collection::<JobInfo>(body, "jobs")?;
        Ok(records.iter().map(job::read).collect())
    }

    fn update_body(_key: &u32, update: &JobUpdate) -> Result<Value, serde_json::Error> {
        serde_json::to_value(job::write_update(update))
    }
}

impl JobVerbs for JobBinding {
    fn submit_body(create: &JobCreate) -> Result<Value, serde_json::Error> {
        serde_json::to_value(JobSubmitReq {
            job: Some(job::write_create(create)),
        })
    }

    fn allocate_body(request: &JobAllocateRequest) -> Result<Value, serde_json::Error> {
        serde_json::to_value(job_extra::allocate_request(request))
    }
}

pub struct NodeBinding;

impl Binding for NodeBinding {
    const ENTITY: EntityKind = EntityKind::Node;

    type Key = String;
    type Entity = Node;
    type Create = ();
    type Update = NodeUpdate;
    type Query = NodeListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Node) -> String {
        entity.name.clone()
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Node>, serde_json::Error> {
        let records = take_collection::<WireNode>(body, "nodes")?;
        Ok(records.iter().map(node::read).collect())
    }

    fn update_body(_key: &String, update: &NodeUpdate) -> Result<Value, serde_json::Error> {
        serde_json::to_value(node::write_update(update))
    }
}

pub struct PartitionBinding;

impl Binding for PartitionBinding {
    const ENTITY: EntityKind = EntityKind::Partition;

    type Key = String;
    type Entity = Partition;
    type Create = PartitionCreate;
    type Update = PartitionUpdate;
    type Query = PartitionListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Partition) -> String {
        entity.name.clone()
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Partition>, serde_json::Error> {
        let records = take_collection::<PartitionInfo>(body, "partitions")?;
        Ok(records.iter().map(partition::read).collect())
    }
}

pub struct AccountBinding;

impl Binding for AccountBinding {
    const ENTITY: EntityKind = EntityKind::Account;

    type Key = String;
    type Entity = Account;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Query = AccountListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Account) -> String {
        entity.name.clone()
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Account>, serde_json::Error> {
        let records = take_collection::<WireAccount>(body, "accounts")?;
        Ok(records.iter().map(account::read).collect())
    }

    fn create_body(create: &AccountCreate) -> Result<Value, serde_json::Error> {
        serde_json::to_value(account_extra::create_request(create))
    }

    fn update_body(key: &String, update: &AccountUpdate) -> Result<Value, serde_json::Error> {
        let mut record = account::write_update(update);
        record.name = Some(key.clone());
        collection("accounts", &record)
    }

    fn create_key(create: &AccountCreate) -> Option<String> {
        Some(create.name.clone())
    }
}

impl AccountAssociations for AccountBinding {
    fn association_body(request: &AccountAssociationRequest) -> Result<Value, serde_json::Error> {
        serde_json::to_value(account_extra::association_request(request))
    }
}

pub struct UserBinding;

impl Binding for UserBinding {
    const ENTITY: EntityKind = EntityKind::User;

    type Key = String;
    type Entity = User;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Query = UserListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &User) -> String {
        entity.name.clone()
    }

    fn decode_list(body: &[u8]) -> Result<Vec<User>, serde_json::Error> {
        let records = take_collection::<WireUser>(body, "users")?;
        Ok(records.iter().map(user::read).collect())
    }

    fn create_body(create: &UserCreate) -> Result<Value, serde_json::Error> {
        collection("users", &user::write_create(create))
    }

    fn update_body(key: &String, update: &UserUpdate) -> Result<Value, serde_json::Error> {
        let mut record = user::write_update(update);
        record.name = Some(key.clone());
        collection("users", &record)
    }

    fn create_key(create: &UserCreate) -> Option<String> {
        Some(create.name.clone())
    }
}

impl UserAssociations for UserBinding {
    fn association_body(request: &UserAssociationRequest) -> Result<Value, serde_json::Error> {
        serde_json::to_value(user_extra::association_request(request))
    }
}

pub struct AssociationBinding;

impl Binding for AssociationBinding {
    const ENTITY: EntityKind = EntityKind::Association;

    type Key = u32;
    type Entity = Association;
    type Create = AssociationCreate;
    type Update = AssociationUpdate;
    type Query = AssociationListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Association) -> u32 {
        entity.id
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Association>, serde_json::Error> {
        let records = take_collection::<WireAssociation>(body, "associations")?;
        Ok(records.iter().map(association::read).collect())
    }

    fn create_body(create: &AssociationCreate) -> Result<Value, serde_json::Error> {
        collection("associations", &association::write_create(create))
    }

    fn update_body(key: &u32, update: &AssociationUpdate) -> Result<Value, serde_json::Error> {
        let mut record = association::write_update(update);
        record.id = Some(*key);
        collection("associations", &record)
    }
}

pub struct QosBinding;

impl Binding for QosBinding {
    const ENTITY: EntityKind = EntityKind::Qos;

    type Key = String;
    type Entity = Qos;
    type Create = QosCreate;
    type Update = QosUpdate;
    type Query = QosListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Qos) -> String {
        entity.name.clone()
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Qos>, serde_json::Error> {
        let records = take_collection::<WireQos>(body, "qos")?;
        Ok(records.iter().map(qos::read).collect())
    }

    fn create_body(create: &QosCreate) -> Result<Value, serde_json::Error> {
        collection("qos", &qos::write_create(create))
    }

    fn update_body(key: &String, update: &QosUpdate) -> Result<Value, serde_json::Error> {
        let mut record = qos::write_update(update);
        record.name = Some(key.clone());
        collection("qos", &record)
    }

    fn create_key(create: &QosCreate) -> Option<String> {
        Some(create.name.clone())
    }
}

pub struct ReservationBinding;

impl Binding for ReservationBinding {
    const ENTITY: EntityKind = EntityKind::Reservation;

    type Key = String;
    type Entity = Reservation;
    type Create = ReservationCreate;
    type Update = ReservationUpdate;
    type Query = ReservationListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Reservation) -> String {
        entity.name.clone()
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Reservation>, serde_json::Error> {
        let records = take_collection::<ReservationInfo>(body, "reservations")?;
        Ok(records.iter().map(reservation::read).collect())
    }

    fn create_body(create: &ReservationCreate) -> Result<Value, serde_json::Error> {
        serde_json::to_value(reservation::write_create(create))
    }

    fn update_body(key: &String, update: &ReservationUpdate) -> Result<Value, serde_json::Error> {
        let mut record = reservation::write_update(update);
        record.name = Some(key.clone());
        serde_json::to_value(record)
    }

    fn create_key(create: &ReservationCreate) -> Option<String> {
        Some(create.name.clone())
    }
}

pub struct ClusterBinding;

impl Binding for ClusterBinding {
    const ENTITY: EntityKind = EntityKind::Cluster;

    type Key = String;
    type Entity = Cluster;
    type Create = ClusterCreate;
    type Update = ClusterUpdate;
    type Query = ClusterListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Cluster) -> String {
        entity.name.clone()
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Cluster>, serde_json::Error> {
        let records = take_collection::<ClusterRec>(body, "clusters")?;
        Ok(records.iter().map(cluster::read).collect())
    }

    fn create_body(create: &ClusterCreate) -> Result<Value, serde_json::Error> {
        collection("clusters", &cluster::write_create(create))
    }

    fn create_key(create: &ClusterCreate) -> Option<String> {
        Some(create.name.clone())
    }
}

pub struct WckeyBinding;

impl Binding for WckeyBinding {
    const ENTITY: EntityKind = EntityKind::Wckey;

    type Key = u32;
    type Entity = Wckey;
    type Create = WckeyCreate;
    type Update = WckeyUpdate;
    type Query = WckeyListOptions;

    fn capabilities() -> &'static Capabilities {
        &CAPABILITIES
    }

    fn key(entity: &Wckey) -> u32 {
        entity.id
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Wckey>, serde_json::Error> {
        let records = take_collection::<WireWckey>(body, "wckeys")?;
        Ok(records.iter().map(wckey::read).collect())
    }

    fn create_body(create: &WckeyCreate) -> Result<Value, serde_json::Error> {
        collection("wckeys", &wckey::write_create(create))
    }
}

#[must_use]
pub fn managers(client: Option<Arc<dyn WireClient>>, watch: &WatchConfig) -> Managers {
    Managers {
        jobs: Some(Arc::new(EntityAdapter::<JobBinding>::new(client.clone(), watch))),
        nodes: Some(Arc::new(EntityAdapter::<NodeBinding>::new(client.clone(), watch))),
        partitions: Some(Arc::new(EntityAdapter::<PartitionBinding>::new(client.clone(), watch))),
        accounts: Some(Arc::new(EntityAdapter::<AccountBinding>::new(client.clone(), watch))),
        users: Some(Arc::new(EntityAdapter::<UserBinding>::new(client.clone(), watch))),
        associations: Some(Arc::new(EntityAdapter::<AssociationBinding>::new(
            client.clone(),
            watch,
        ))),
        qos: Some(Arc::new(EntityAdapter::<QosBinding>::new(client.clone(), watch))),
        reservations: Some(Arc::new(EntityAdapter::<ReservationBinding>::new(
            client.clone(),
            watch,
        ))),
        clusters: Some(Arc::new(EntityAdapter::<ClusterBinding>::new(client.clone(), watch))),
        wckeys: Some(Arc::new(EntityAdapter::<WckeyBinding>::new(client.clone(), watch))),
        info: Arc::new(InfoAdapter::<NodeBinding>::new(client.clone(), watch)),
        standalone: Arc::new(StandaloneAdapter::new(client, &CAPABILITIES)),
    }
}
