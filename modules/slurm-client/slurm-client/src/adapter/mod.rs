//! Version adapters: one [`EntityAdapter`] per (entity, version) binding.
//!
//! Every operation follows the same sequence: context check, capability
//! check, client check, input validation, one wire call raced against
//! cancellation, response classification, then conversion to the common
//! model. Nothing here retries; callers wrap operations in a
//! [`slurm_retry::RetryPolicy`] when they want that.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use slurm_client_sdk::{
    Created, ListResult, Operation, Origin, RequestContext, SlurmError, Verb, paginate,
};
use tracing::debug;

use crate::classify::{Reply, classify};
use crate::transport::{WireClient, WireRequest};
use crate::validation::{Validate, Violation};
use crate::versions::{Binding, Capabilities, Endpoint};
use crate::watch::WatchConfig;

mod account;
mod crud;
mod info;
mod job;
mod node;
mod partition;
mod standalone;
mod user;

pub use info::InfoAdapter;
pub use standalone::StandaloneAdapter;

/// Generic adapter for the entity described by binding `B`.
pub struct EntityAdapter<B> {
    client: Option<Arc<dyn WireClient>>,
    watch: WatchConfig,
    binding: PhantomData<fn() -> B>,
}

impl<B> Clone for EntityAdapter<B> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            watch: self.watch,
            binding: PhantomData,
        }
    }
}

impl<B: Binding> EntityAdapter<B> {
    #[must_use]
    pub fn new(client: Option<Arc<dyn WireClient>>, watch: &WatchConfig) -> Self {
        Self {
            client,
            watch: *watch,
            binding: PhantomData,
        }
    }

    pub(crate) const fn watch_config(&self) -> &WatchConfig {
        &self.watch
    }

    pub(crate) fn prepare(&self, ctx: &RequestContext, verb: Verb) -> Result<Call<'_>, SlurmError> {
        Call::prepare(
            ctx,
            B::capabilities(),
            Operation::new(B::ENTITY, verb),
            self.client.as_deref(),
        )
    }

    /// Fetch and decode the full collection behind `verb` (List or Watch).
    pub(crate) async fn fetch_all(
        &self,
        ctx: &RequestContext,
        verb: Verb,
    ) -> Result<Vec<B::Entity>, SlurmError> {
        let call = self.prepare(ctx, verb)?;
        let reply = call.send(ctx, None, None).await?;
        call.decode(B::decode_list(&reply.body))
    }

    pub(crate) async fn list_entities(
        &self,
        ctx: &RequestContext,
        query: &B::Query,
    ) -> Result<ListResult<B::Entity>, SlurmError> {
        let items = self.fetch_all(ctx, Verb::List).await?;
        Ok(paginate(items, query))
    }

    pub(crate) async fn get_entity(
        &self,
        ctx: &RequestContext,
        key: impl Into<B::Key> + Send,
    ) -> Result<B::Entity, SlurmError> {
        let key = key.into();
        let call = self.prepare(ctx, Verb::Get)?;
        let reply = call.send(ctx, Some(&key.to_string()), None).await?;
        call.decode(B::decode_list(&reply.body))?
            .into_iter()
            .find(|entity| B::key(entity) == key)
            .ok_or_else(|| SlurmError::NotFound {
                origin: call.origin,
                message: format!("{} {key} not found", B::ENTITY),
            })
    }

    pub(crate) async fn create_entity(
        &self,
        ctx: &RequestContext,
        create: &B::Create,
    ) -> Result<Created, SlurmError>
    where
        B::Create: Validate,
    {
        let call = self.prepare(ctx, Verb::Create)?;
        call.validate(create)?;
        let body = call.body(B::create_body(create))?;
        let reply = call.send(ctx, None, body).await?;
        Ok(Created {
            key: B::create_key(create),
            warnings: reply.warnings,
        })
    }

    pub(crate) async fn update_entity(
        &self,
        ctx: &RequestContext,
        key: impl Into<B::Key> + Send,
        update: &B::Update,
    ) -> Result<(), SlurmError>
    where
        B::Update: Validate,
    {
        let key = key.into();
        let call = self.prepare(ctx, Verb::Update)?;
        call.validate(update)?;
        let body = call.body(B::update_body(&key, update))?;
        call.send(ctx, Some(&key.to_string()), body).await?;
        Ok(())
    }

    pub(crate) async fn delete_entity(
        &self,
        ctx: &RequestContext,
        key: impl Into<B::Key> + Send,
    ) -> Result<(), SlurmError> {
        let key = key.into().to_string();
        let call = self.prepare(ctx, Verb::Delete)?;
        call.send(ctx, Some(&key), None).await?;
        Ok(())
    }
}

/// A prepared operation: the endpoint is configured and a client is present.
pub(crate) struct Call<'a> {
    pub(crate) origin: Origin,
    endpoint: Endpoint,
    client: &'a dyn WireClient,
}

impl<'a> Call<'a> {
    /// Steps one to three of every operation: live context, configured
    /// endpoint, present client.
    pub(crate) fn prepare(
        ctx: &RequestContext,
        capabilities: &Capabilities,
        operation: Operation,
        client: Option<&'a dyn WireClient>,
    ) -> Result<Self, SlurmError> {
        let origin = Origin::new(capabilities.version, operation);
        ctx.check()
            .map_err(|state| SlurmError::from_context(origin, state))?;
        let endpoint = capabilities
            .endpoint(operation)
            .ok_or(SlurmError::Unsupported { origin })?;
        let client = client.ok_or(SlurmError::ClientNotInitialized { origin })?;
        Ok(Self {
            origin,
            endpoint,
            client,
        })
    }

    pub(crate) fn validate<V: Validate + ?Sized>(&self, input: &V) -> Result<(), SlurmError> {
        self.check(input.validate())
    }

    /// Attach this call's origin to a rule outcome.
    pub(crate) fn check(&self, outcome: Result<(), Violation>) -> Result<(), SlurmError> {
        outcome.map_err(|violation| violation.into_error(self.origin))
    }

    /// A `null` payload means the request carries no body.
    pub(crate) fn body(
        &self,
        body: Result<Value, serde_json::Error>,
    ) -> Result<Option<Value>, SlurmError> {
        match body {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(SlurmError::Decode {
                origin: self.origin,
                message: format!("cannot encode request: {e}"),
            }),
        }
    }

    pub(crate) fn decode<T>(&self, decoded: Result<T, serde_json::Error>) -> Result<T, SlurmError> {
        decoded.map_err(|e| SlurmError::Decode {
            origin: self.origin,
            message: e.to_string(),
        })
    }

    pub(crate) async fn send(
        &self,
        ctx: &RequestContext,
        key: Option<&str>,
        body: Option<Value>,
    ) -> Result<Reply, SlurmError> {
        self.send_with(ctx, key, Vec::new(), body).await
    }

    /// Issue the single wire call of this operation, with `extra` appended to
    /// the endpoint's query.
    pub(crate) async fn send_with(
        &self,
        ctx: &RequestContext,
        key: Option<&str>,
        extra: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Reply, SlurmError> {
        let (path, mut query) = self.endpoint.resolve(key);
        query.extend(extra);
        debug!(
            version = %self.origin.version,
            operation = %self.origin.operation,
            method = %self.endpoint.method,
            path = %path,
            "slurmrestd request"
        );
        let request = WireRequest {
            method: self.endpoint.method,
            path,
            query,
            body,
        };
        let response = tokio::select! {
            biased;
            state = ctx.done() => return Err(SlurmError::from_context(self.origin, state)),
            response = self.client.execute(request) => response,
        };
        let response = response.map_err(|source| SlurmError::Network {
            origin: self.origin,
            source,
        })?;
        classify(self.origin, response)
    }
}
