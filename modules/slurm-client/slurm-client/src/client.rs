//! Entry point: a [`SlurmClient`] bound to one REST revision.

use std::fmt;
use std::sync::Arc;

use slurm_client_sdk::{
    AccountManager, ApiVersion, AssociationManager, ClusterManager, InfoManager, JobManager,
    NodeManager, PartitionManager, QosManager, ReservationManager, StandaloneManager, UserManager,
    WckeyManager,
};
use slurm_retry::RetryPolicy;
use tracing::info;

use crate::config::{ConfigError, SlurmClientConfig};
use crate::transport::{HttpWireClient, WireClient};
use crate::versions::{self, Capabilities, Managers};
use crate::watch::WatchConfig;

/// Version-agnostic access to one `slurmrestd`.
///
/// Accessors return `None` for entities the selected revision lacks. All
/// managers share the wire client; the client is cheap to clone.
#[derive(Clone)]
pub struct SlurmClient {
    version: ApiVersion,
    managers: Managers,
    retry: RetryPolicy,
}

impl fmt::Debug for SlurmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlurmClient")
            .field("version", &self.version)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl SlurmClient {
    #[must_use]
    pub fn new(version: ApiVersion, client: Arc<dyn WireClient>) -> Self {
        Self::assemble(
            version,
            Some(client),
            &WatchConfig::default(),
            RetryPolicy::default(),
        )
    }

    /// Like [`SlurmClient::new`] with explicit watch and retry settings.
    #[must_use]
    pub fn with_settings(
        version: ApiVersion,
        client: Arc<dyn WireClient>,
        watch: &WatchConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self::assemble(version, Some(client), watch, retry)
    }

    /// Build the HTTP transport and client described by `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for an unknown version selector or an invalid
    /// base URL, user agent or TLS setup.
    pub fn from_config(config: &SlurmClientConfig) -> Result<Self, ConfigError> {
        let version = config.api_version()?;
        let wire = HttpWireClient::new(
            &config.base_url,
            config.auth.clone(),
            config.timeout,
            &config.user_agent,
        )?;
        info!(base_url = %wire.base_url(), "using slurmrestd over HTTP");
        Ok(Self::assemble(
            version,
            Some(Arc::new(wire)),
            &config.watch,
            config.retry.clone(),
        ))
    }

    /// A client without a transport: every operation that reaches the wire
    /// fails with `CLIENT_NOT_INITIALIZED`.
    #[must_use]
    pub fn detached(version: ApiVersion) -> Self {
        Self::assemble(version, None, &WatchConfig::default(), RetryPolicy::default())
    }

    fn assemble(
        version: ApiVersion,
        client: Option<Arc<dyn WireClient>>,
        watch: &WatchConfig,
        retry: RetryPolicy,
    ) -> Self {
        info!(
            version = %version,
            connected = client.is_some(),
            "slurm client ready"
        );
        Self {
            version,
            managers: versions::managers(version, client, watch),
            retry,
        }
    }

    #[must_use]
    pub const fn version(&self) -> ApiVersion {
        self.version
    }

    /// Operations and entities the selected revision supports.
    #[must_use]
    pub fn capabilities(&self) -> &'static Capabilities {
        versions::capabilities(self.version)
    }

    /// Policy configured for callers that wrap operations in
    /// [`RetryPolicy::run`].
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    #[must_use]
    pub fn jobs(&self) -> Option<&dyn JobManager> {
        self.managers.jobs.as_deref()
    }

    #[must_use]
    pub fn nodes(&self) -> Option<&dyn NodeManager> {
        self.managers.nodes.as_deref()
    }

    #[must_use]
    pub fn partitions(&self) -> Option<&dyn PartitionManager> {
        self.managers.partitions.as_deref()
    }

    #[must_use]
    pub fn accounts(&self) -> Option<&dyn AccountManager> {
        self.managers.accounts.as_deref()
    }

    #[must_use]
    pub fn users(&self) -> Option<&dyn UserManager> {
        self.managers.users.as_deref()
    }

    #[must_use]
    pub fn associations(&self) -> Option<&dyn AssociationManager> {
        self.managers.associations.as_deref()
    }

    #[must_use]
    pub fn qos(&self) -> Option<&dyn QosManager> {
        self.managers.qos.as_deref()
    }

    #[must_use]
    pub fn reservations(&self) -> Option<&dyn ReservationManager> {
        self.managers.reservations.as_deref()
    }

    #[must_use]
    pub fn clusters(&self) -> Option<&dyn ClusterManager> {
        self.managers.clusters.as_deref()
    }

    #[must_use]
    pub fn wckeys(&self) -> Option<&dyn WckeyManager> {
        self.managers.wckeys.as_deref()
    }

    #[must_use]
    pub fn info(&self) -> &dyn InfoManager {
        self.managers.info.as_ref()
    }

    /// Licenses, fairshare, diagnostics and the TRES catalogue.
    #[must_use]
    pub fn standalone(&self) -> &dyn StandaloneManager {
        self.managers.standalone.as_ref()
    }
}
