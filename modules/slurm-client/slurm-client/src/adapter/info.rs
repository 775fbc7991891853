use std::sync::Arc;

use async_trait::async_trait;
use slurm_client_sdk::{
    ApiVersion, ApiVersionInfo, ClusterInfo, ClusterStats, EntityKind, InfoManager, Node,
    NodeState, Operation, PingResult, RequestContext, SlurmError, Verb,
};

use super::{Call, EntityAdapter};
use crate::transport::WireClient;
use crate::versions::{Binding, Capabilities};
use crate::watch::WatchConfig;
use crate::wire::common::{
    DiagDocument, MetaDocument, Ping, SlurmMeta, take_collection, take_document,
};

/// Controller health and identity; identical wire shape in every revision.
///
/// `N` is the node binding of the same revision, used for cluster totals.
pub struct InfoAdapter<N> {
    client: Option<Arc<dyn WireClient>>,
    capabilities: &'static Capabilities,
    nodes: EntityAdapter<N>,
}

impl<N: Binding<Entity = Node>> InfoAdapter<N> {
    #[must_use]
    pub fn new(client: Option<Arc<dyn WireClient>>, watch: &WatchConfig) -> Self {
        Self {
            nodes: EntityAdapter::new(client.clone(), watch),
            client,
            capabilities: N::capabilities(),
        }
    }

    fn prepare(&self, ctx: &RequestContext, verb: Verb) -> Result<Call<'_>, SlurmError> {
        Call::prepare(
            ctx,
            self.capabilities,
            Operation::new(EntityKind::Info, verb),
            self.client.as_deref(),
        )
    }

    /// The `meta.slurm` block of the ping response.
    async fn slurm_meta(&self, ctx: &RequestContext, verb: Verb) -> Result<SlurmMeta, SlurmError> {
        let call = self.prepare(ctx, verb)?;
        let reply = call.send(ctx, None, None).await?;
        let doc: MetaDocument = call.decode(take_document(&reply.body))?;
        Ok(doc.meta.and_then(|m| m.slurm).unwrap_or_default())
    }
}

/// `major.minor.micro`, or empty when the server sent no version.
fn release_number(meta: &SlurmMeta) -> String {
    let Some(version) = &meta.version else {
        return String::new();
    };
    [&version.major, &version.minor, &version.micro]
        .into_iter()
        .map(|part| part.as_ref().map(ToString::to_string).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(".")
}

fn node_totals(nodes: &[Node], stats: &mut ClusterStats) {
    for node in nodes {
        stats.total_nodes += 1;
        stats.total_cpus += node.cpus;
        stats.allocated_cpus += node.alloc_cpus;
        let busy = node
            .state
            .iter()
            .any(|s| matches!(s, NodeState::Allocated | NodeState::Mixed));
        if busy {
            stats.allocated_nodes += 1;
        } else if node.state.contains(&NodeState::Idle) {
            stats.idle_nodes += 1;
        }
    }
    stats.idle_cpus = stats.total_cpus.saturating_sub(stats.allocated_cpus);
}

#[async_trait]
impl<N: Binding<Entity = Node>> InfoManager for InfoAdapter<N> {
    fn version(&self) -> ApiVersion {
        self.capabilities.version
    }

    async fn ping(&self, ctx: &RequestContext) -> Result<Vec<PingResult>, SlurmError> {
        let call = self.prepare(ctx, Verb::Ping)?;
        let reply = call.send(ctx, None, None).await?;
        let pings: Vec<Ping> = call.decode(take_collection(&reply.body, "pings"))?;
        Ok(pings
            .into_iter()
            .map(|p| PingResult {
                hostname: p.hostname.unwrap_or_default(),
                pinged: p.pinged.unwrap_or_default(),
                latency_us: p.latency.unwrap_or_default(),
                mode: p.mode.unwrap_or_default(),
            })
            .collect())
    }

    async fn get(&self, ctx: &RequestContext) -> Result<ClusterInfo, SlurmError> {
        let meta = self.slurm_meta(ctx, Verb::Get).await?;
        Ok(ClusterInfo {
            version: release_number(&meta),
            release: meta.release.unwrap_or_default(),
            cluster_name: meta.cluster.unwrap_or_default(),
            api_version: self.capabilities.version,
        })
    }

    async fn ping_database(&self, ctx: &RequestContext) -> Result<(), SlurmError> {
        let call = self.prepare(ctx, Verb::PingDatabase)?;
        call.send(ctx, None, None).await?;
        Ok(())
    }

    async fn stats(&self, ctx: &RequestContext) -> Result<ClusterStats, SlurmError> {
        let call = self.prepare(ctx, Verb::Stats)?;
        let reply = call.send(ctx, None, None).await?;
        let doc: DiagDocument = call.decode(take_document(&reply.body))?;
        let jobs = doc.statistics.unwrap_or_default();
        let mut stats = ClusterStats {
            total_jobs: jobs.jobs_submitted.unwrap_or_default(),
            running_jobs: jobs.jobs_running.unwrap_or_default(),
            pending_jobs: jobs.jobs_pending.unwrap_or_default(),
            completed_jobs: jobs.jobs_completed.unwrap_or_default(),
            ..ClusterStats::default()
        };
        let nodes = self.nodes.fetch_all(ctx, Verb::List).await?;
        node_totals(&nodes, &mut stats);
        Ok(stats)
    }

    async fn api_version(&self, ctx: &RequestContext) -> Result<ApiVersionInfo, SlurmError> {
        let meta = self.slurm_meta(ctx, Verb::Version).await?;
        let version = self.capabilities.version;
        let release = meta.release.clone().unwrap_or_else(|| release_number(&meta));
        Ok(ApiVersionInfo {
            version,
            description: format!("Slurm REST API {version}"),
            deprecated: version.is_deprecated(),
            release,
        })
    }
}
