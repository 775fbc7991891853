//! Per-version bindings: wire conversions, request bodies, and the endpoint
//! table of every supported REST revision.
//!
//! The `v0_0_4x` modules and their converter files are produced by
//! `slurm-adapter-gen`; the `*_extra.rs` files beside them are hand-written.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use slurm_client_sdk::{
    AccountAssociationRequest, AccountManager, ApiVersion, AssociationManager, ClusterManager,
    EntityKind, InfoManager, JobAllocateRequest, JobCreate, JobManager, ListQuery, NodeManager,
    Operation, PartitionManager, QosManager, ReservationManager, StandaloneManager,
    UserAssociationRequest, UserManager, Verb, WckeyManager,
};

use crate::transport::WireClient;
use crate::watch::WatchConfig;

pub mod v0_0_40;
pub mod v0_0_41;
pub mod v0_0_42;
pub mod v0_0_43;
pub mod v0_0_44;

#[cfg(test)]
pub mod samples;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A REST route. `{id}` in the path or a query value is replaced by the
/// URL-encoded entity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
    pub query: &'static [(&'static str, &'static str)],
}

impl Endpoint {
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            query: &[],
        }
    }

    #[must_use]
    pub const fn post(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            query: &[],
        }
    }

    #[must_use]
    pub const fn delete(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Delete,
            path,
            query: &[],
        }
    }

    #[must_use]
    pub const fn with_query(self, query: &'static [(&'static str, &'static str)]) -> Self {
        Self { query, ..self }
    }

    /// Concrete path and query for `key`.
    #[must_use]
    pub fn resolve(&self, key: Option<&str>) -> (String, Vec<(String, String)>) {
        let encoded = key.map(|k| urlencoding::encode(k).into_owned());
        let fill = |template: &str| match &encoded {
            Some(k) => template.replace("{id}", k),
            None => template.to_owned(),
        };
        let query = self
            .query
            .iter()
            .map(|(name, value)| ((*name).to_owned(), fill(value)))
            .collect();
        (fill(self.path), query)
    }
}

/// Entities and operations one REST revision supports.
#[derive(Debug)]
pub struct Capabilities {
    pub version: ApiVersion,
    pub entities: &'static [EntityKind],
    pub endpoints: &'static [(Operation, Endpoint)],
}

impl Capabilities {
    #[must_use]
    pub fn endpoint(&self, operation: Operation) -> Option<Endpoint> {
        self.endpoints
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, endpoint)| *endpoint)
    }

    #[must_use]
    pub fn supports(&self, operation: Operation) -> bool {
        self.endpoint(operation).is_some()
    }

    #[must_use]
    pub fn has_entity(&self, entity: EntityKind) -> bool {
        self.entities.contains(&entity)
    }

    /// Verbs configured for `entity`, in table order.
    pub fn verbs(&self, entity: EntityKind) -> impl Iterator<Item = Verb> + '_ {
        self.endpoints
            .iter()
            .filter(move |(op, _)| op.entity == entity)
            .map(|(op, _)| op.verb)
    }
}

/// Ties one entity of one version to its wire conversions.
pub trait Binding: Send + Sync + 'static {
    const ENTITY: EntityKind;

    type Key: Clone + PartialEq + fmt::Display + Send + Sync;
    type Entity: Clone + Send + Sync + 'static;
    type Create: Send + Sync;
    type Update: Send + Sync;
    type Query: ListQuery<Self::Entity> + Send + Sync;

    fn capabilities() -> &'static Capabilities;

    fn key(entity: &Self::Entity) -> Self::Key;

    /// Decode the entity collection of a list or get response.
    ///
    /// # Errors
    /// Returns a JSON error when the body does not match the wire schema.
    fn decode_list(body: &[u8]) -> Result<Vec<Self::Entity>, serde_json::Error>;

    /// # Errors
    /// Returns a JSON error when the payload cannot be serialized.
    fn create_body(_create: &Self::Create) -> Result<Value, serde_json::Error> {
        Ok(Value::Null)
    }

    /// # Errors
    /// Returns a JSON error when the payload cannot be serialized.
    fn update_body(_key: &Self::Key, _update: &Self::Update) -> Result<Value, serde_json::Error> {
        Ok(Value::Null)
    }

    /// Key the created entity will be known by, when the caller chose it.
    fn create_key(_create: &Self::Create) -> Option<String> {
        None
    }
}

/// Job verbs whose payload shape differs between versions.
pub trait JobVerbs: Binding {
    /// # Errors
    /// Returns a JSON error when the payload cannot be serialized.
    fn submit_body(job: &JobCreate) -> Result<Value, serde_json::Error>;

    /// # Errors
    /// Returns a JSON error when the payload cannot be serialized.
    fn allocate_body(_request: &JobAllocateRequest) -> Result<Value, serde_json::Error> {
        Ok(Value::Null)
    }
}

pub trait AccountAssociations: Binding {
    /// # Errors
    /// Returns a JSON error when the payload cannot be serialized.
    fn association_body(_request: &AccountAssociationRequest) -> Result<Value, serde_json::Error> {
        Ok(Value::Null)
    }
}

pub trait UserAssociations: Binding {
    /// # Errors
    /// Returns a JSON error when the payload cannot be serialized.
    fn association_body(_request: &UserAssociationRequest) -> Result<Value, serde_json::Error> {
        Ok(Value::Null)
    }
}

/// Wrap one record in the `{"<field>": [record]}` document slurmdbd expects.
///
/// # Errors
/// Returns a JSON error when the record cannot be serialized.
pub fn collection<W: Serialize>(field: &str, record: &W) -> Result<Value, serde_json::Error> {
    let mut doc = serde_json::Map::new();
    doc.insert(field.to_owned(), Value::Array(vec![serde_json::to_value(record)?]));
    Ok(Value::Object(doc))
}

/// Managers of one version; `None` where the version lacks the entity.
#[derive(Clone)]
pub struct Managers {
    pub jobs: Option<Arc<dyn JobManager>>,
    pub nodes: Option<Arc<dyn NodeManager>>,
    pub partitions: Option<Arc<dyn PartitionManager>>,
    pub accounts: Option<Arc<dyn AccountManager>>,
    pub users: Option<Arc<dyn UserManager>>,
    pub associations: Option<Arc<dyn AssociationManager>>,
    pub qos: Option<Arc<dyn QosManager>>,
    pub reservations: Option<Arc<dyn ReservationManager>>,
    pub clusters: Option<Arc<dyn ClusterManager>>,
    pub wckeys: Option<Arc<dyn WckeyManager>>,
    pub info: Arc<dyn InfoManager>,
    pub standalone: Arc<dyn StandaloneManager>,
}

#[must_use]
pub fn capabilities(version: ApiVersion) -> &'static Capabilities {
    match version {
        ApiVersion::V0_0_40 => &v0_0_40::CAPABILITIES,
        ApiVersion::V0_0_41 => &v0_0_41::CAPABILITIES,
        ApiVersion::V0_0_42 => &v0_0_42::CAPABILITIES,
        ApiVersion::V0_0_43 => &v0_0_43::CAPABILITIES,
        ApiVersion::V0_0_44 => &v0_0_44::CAPABILITIES,
    }
}

#[must_use]
pub fn managers(
    version: ApiVersion,
    client: Option<Arc<dyn WireClient>>,
    watch: &WatchConfig,
) -> Managers {
    match version {
        ApiVersion::V0_0_40 => v0_0_40::managers(client, watch),
        ApiVersion::V0_0_41 => v0_0_41::managers(client, watch),
        ApiVersion::V0_0_42 => v0_0_42::managers(client, watch),
        ApiVersion::V0_0_43 => v0_0_43::managers(client, watch),
        ApiVersion::V0_0_44 => v0_0_44::managers(client, watch),
    }
}
