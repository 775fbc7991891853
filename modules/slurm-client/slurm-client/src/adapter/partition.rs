use async_trait::async_trait;
use slurm_client_sdk::{
    ApiVersion, Created, ListResult, Partition, PartitionCreate, PartitionEvent,
    PartitionListOptions, PartitionManager, PartitionUpdate, PartitionWatchOptions,
    RequestContext, SlurmError, Verb,
};
use tokio::sync::mpsc;

use super::EntityAdapter;
use crate::versions::Binding;
use crate::watch::{PartitionTracker, spawn_poller};

#[async_trait]
impl<B> PartitionManager for EntityAdapter<B>
where
    B: Binding<
            Key = String,
            Entity = Partition,
            Create = PartitionCreate,
            Update = PartitionUpdate,
            Query = PartitionListOptions,
        >,
{
    fn version(&self) -> ApiVersion {
        B::capabilities().version
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &PartitionListOptions,
    ) -> Result<ListResult<Partition>, SlurmError> {
        self.list_entities(ctx, opts).await
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Partition, SlurmError> {
        self.get_entity(ctx, name).await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        partition: &PartitionCreate,
    ) -> Result<Created, SlurmError> {
        self.create_entity(ctx, partition).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &PartitionUpdate,
    ) -> Result<(), SlurmError> {
        self.update_entity(ctx, name, update).await
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError> {
        self.delete_entity(ctx, name).await
    }

    async fn watch(
        &self,
        ctx: &RequestContext,
        opts: Option<&PartitionWatchOptions>,
    ) -> Result<mpsc::Receiver<PartitionEvent>, SlurmError> {
        self.prepare(ctx, Verb::Watch)?;
        let opts = opts.cloned().unwrap_or_default();
        let config = self.watch_config().with_interval(opts.poll_interval);
        let adapter = self.clone();
        let fetch = move |ctx: RequestContext| {
            let adapter = adapter.clone();
            async move { adapter.fetch_all(&ctx, Verb::Watch).await }
        };
        Ok(spawn_poller(ctx.clone(), config, fetch, PartitionTracker::new(opts)))
    }
}
