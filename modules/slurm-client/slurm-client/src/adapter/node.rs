use async_trait::async_trait;
use slurm_client_sdk::{
    ApiVersion, ListResult, Node, NodeEvent, NodeListOptions, NodeManager, NodeState, NodeUpdate,
    NodeWatchOptions, RequestContext, SlurmError, Verb,
};
use tokio::sync::mpsc;

use super::EntityAdapter;
use crate::validation::require;
use crate::versions::Binding;
use crate::watch::{NodeTracker, spawn_poller};

#[async_trait]
impl<B> NodeManager for EntityAdapter<B>
where
    B: Binding<
            Key = String,
            Entity = Node,
            Update = NodeUpdate,
            Query = NodeListOptions,
        >,
{
    fn version(&self) -> ApiVersion {
        B::capabilities().version
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &NodeListOptions,
    ) -> Result<ListResult<Node>, SlurmError> {
        self.list_entities(ctx, opts).await
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Node, SlurmError> {
        self.get_entity(ctx, name).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &NodeUpdate,
    ) -> Result<(), SlurmError> {
        self.update_entity(ctx, name, update).await
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError> {
        self.delete_entity(ctx, name).await
    }

    async fn drain(
        &self,
        ctx: &RequestContext,
        name: &str,
        reason: &str,
    ) -> Result<(), SlurmError> {
        let call = self.prepare(ctx, Verb::Drain)?;
        call.check(require("reason", reason))?;
        let update = NodeUpdate {
            state: Some(vec![NodeState::Drain]),
            reason: Some(reason.to_owned()),
            ..NodeUpdate::default()
        };
        let key = name.to_owned();
        let body = call.body(B::update_body(&key, &update))?;
        call.send(ctx, Some(name), body).await?;
        Ok(())
    }

    async fn resume(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError> {
        let call = self.prepare(ctx, Verb::Resume)?;
        let update = NodeUpdate {
            state: Some(vec![NodeState::Resume]),
            ..NodeUpdate::default()
        };
        let key = name.to_owned();
        let body = call.body(B::update_body(&key, &update))?;
        call.send(ctx, Some(name), body).await?;
        Ok(())
    }

    async fn watch(
        &self,
        ctx: &RequestContext,
        opts: Option<&NodeWatchOptions>,
    ) -> Result<mpsc::Receiver<NodeEvent>, SlurmError> {
        self.prepare(ctx, Verb::Watch)?;
        let opts = opts.cloned().unwrap_or_default();
        let config = self.watch_config().with_interval(opts.poll_interval);
        let adapter = self.clone();
        let fetch = move |ctx: RequestContext| {
            let adapter = adapter.clone();
            async move { adapter.fetch_all(&ctx, Verb::Watch).await }
        };
        Ok(spawn_poller(ctx.clone(), config, fetch, NodeTracker::new(opts)))
    }
}
