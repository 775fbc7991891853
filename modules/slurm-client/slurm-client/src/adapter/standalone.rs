use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slurm_client_sdk::{
    AccountingConfig, ApiVersion, Created, DatabaseDiagnostics, Diagnostics, EntityKind, License,
    Operation, RequestContext, RpcStat, Share, ShareKind, SharesOptions, SlurmError,
    StandaloneManager, TrackedResource, TresCreate, Verb,
};

use super::Call;
use crate::transport::WireClient;
use crate::versions::{Capabilities, collection};
use crate::wire::common::{
    self, AccountingDocument, DbDiagDocument, DiagDocument, Named, RpcCounter, SharesDocument,
    Statistics, Tres, number, take_collection, take_document,
};

/// Reports and actions outside any entity. The payloads are the same in every
/// revision that serves them.
#[derive(Clone)]
pub struct StandaloneAdapter {
    client: Option<Arc<dyn WireClient>>,
    capabilities: &'static Capabilities,
}

impl StandaloneAdapter {
    #[must_use]
    pub fn new(client: Option<Arc<dyn WireClient>>, capabilities: &'static Capabilities) -> Self {
        Self {
            client,
            capabilities,
        }
    }

    fn prepare(&self, ctx: &RequestContext, verb: Verb) -> Result<Call<'_>, SlurmError> {
        Call::prepare(
            ctx,
            self.capabilities,
            Operation::new(EntityKind::Standalone, verb),
            self.client.as_deref(),
        )
    }
}

fn names(records: Option<Vec<Named>>) -> Vec<String> {
    records
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| r.name)
        .collect()
}

fn tracked(t: Tres) -> TrackedResource {
    TrackedResource {
        id: t.id.and_then(|id| u32::try_from(id).ok()).unwrap_or_default(),
        kind: t.kind.unwrap_or_default(),
        name: t.name.unwrap_or_default(),
        count: t.count.unwrap_or_default(),
    }
}

fn share(s: common::Share) -> Share {
    let fairshare = s.fairshare.unwrap_or_default();
    Share {
        id: s.id.unwrap_or_default(),
        cluster: s.cluster.unwrap_or_default(),
        name: s.name.unwrap_or_default(),
        parent: s.parent.unwrap_or_default(),
        partition: s.partition.unwrap_or_default(),
        kind: s
            .kind
            .unwrap_or_default()
            .iter()
            .map(|k| ShareKind::parse(k))
            .collect(),
        shares: number(s.shares.as_ref()),
        shares_normalized: number(s.shares_normalized.as_ref()),
        usage: s.usage.unwrap_or_default(),
        usage_normalized: number(s.usage_normalized.as_ref()),
        effective_usage: number(s.effective_usage.as_ref()),
        fairshare_factor: number(fairshare.factor.as_ref()),
        fairshare_level: number(fairshare.level.as_ref()),
    }
}

/// Epoch seconds; `0` means never.
fn timestamp(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.filter(|secs| *secs != 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn diagnostics(s: Statistics) -> Diagnostics {
    Diagnostics {
        collected_at: timestamp(s.req_time.and_then(|n| n.value())),
        window_start: timestamp(s.req_time_start.and_then(|n| n.value())),
        server_thread_count: s.server_thread_count.unwrap_or_default(),
        agent_queue_size: s.agent_queue_size.unwrap_or_default(),
        agent_count: s.agent_count.unwrap_or_default(),
        agent_thread_count: s.agent_thread_count.unwrap_or_default(),
        dbd_agent_queue_size: s.dbd_agent_queue_size.unwrap_or_default(),
        jobs_submitted: s.jobs_submitted.unwrap_or_default(),
        jobs_started: s.jobs_started.unwrap_or_default(),
        jobs_completed: s.jobs_completed.unwrap_or_default(),
        jobs_canceled: s.jobs_canceled.unwrap_or_default(),
        jobs_failed: s.jobs_failed.unwrap_or_default(),
        jobs_pending: s.jobs_pending.unwrap_or_default(),
        jobs_running: s.jobs_running.unwrap_or_default(),
        schedule_cycle_last: s.schedule_cycle_last.unwrap_or_default(),
        schedule_cycle_max: s.schedule_cycle_max.unwrap_or_default(),
        schedule_cycle_mean: s.schedule_cycle_mean.unwrap_or_default(),
        schedule_cycle_total: s.schedule_cycle_total.unwrap_or_default(),
        schedule_queue_length: s.schedule_queue_length.unwrap_or_default(),
        bf_active: s.bf_active.unwrap_or_default(),
        bf_backfilled_jobs: s.bf_backfilled_jobs.unwrap_or_default(),
        bf_cycle_counter: s.bf_cycle_counter.unwrap_or_default(),
        bf_cycle_mean: s.bf_cycle_mean.unwrap_or_default(),
        bf_cycle_max: s.bf_cycle_max.unwrap_or_default(),
        bf_queue_len: s.bf_queue_len.unwrap_or_default(),
        bf_last_cycle_at: timestamp(s.bf_when_last_cycle.and_then(|n| n.value())),
    }
}

fn rpc_stat(c: RpcCounter) -> RpcStat {
    let time = c.time.unwrap_or_default();
    RpcStat {
        name: c.rpc.or(c.user).unwrap_or_default(),
        count: c.count.unwrap_or_default(),
        average_us: time.average.unwrap_or_default(),
        total_us: time.total.unwrap_or_default(),
    }
}

/// `users=a,b&accounts=x`, leaving out empty filters.
fn share_filters(opts: &SharesOptions) -> Vec<(String, String)> {
    [("users", &opts.users), ("accounts", &opts.accounts)]
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| (name.to_owned(), values.join(",")))
        .collect()
}

#[async_trait]
impl StandaloneManager for StandaloneAdapter {
    fn version(&self) -> ApiVersion {
        self.capabilities.version
    }

    async fn licenses(&self, ctx: &RequestContext) -> Result<Vec<License>, SlurmError> {
        let call = self.prepare(ctx, Verb::Licenses)?;
        let reply = call.send(ctx, None, None).await?;
        let licenses: Vec<common::License> =
            call.decode(take_collection(&reply.body, "licenses"))?;
        Ok(licenses
            .into_iter()
            .map(|l| License {
                name: l.name.unwrap_or_default(),
                total: l.total.unwrap_or_default(),
                used: l.used.unwrap_or_default(),
                free: l.free.unwrap_or_default(),
                reserved: l.reserved.unwrap_or_default(),
                remote: l.remote.unwrap_or_default(),
            })
            .collect())
    }

    async fn shares(
        &self,
        ctx: &RequestContext,
        opts: &SharesOptions,
    ) -> Result<Vec<Share>, SlurmError> {
        let call = self.prepare(ctx, Verb::Shares)?;
        let reply = call.send_with(ctx, None, share_filters(opts), None).await?;
        let doc: SharesDocument = call.decode(take_document(&reply.body))?;
        Ok(doc
            .shares
            .and_then(|report| report.shares)
            .unwrap_or_default()
            .into_iter()
            .map(share)
            .collect())
    }

    async fn config(&self, ctx: &RequestContext) -> Result<AccountingConfig, SlurmError> {
        let call = self.prepare(ctx, Verb::Config)?;
        let reply = call.send(ctx, None, None).await?;
        let doc: AccountingDocument = call.decode(take_document(&reply.body))?;
        Ok(AccountingConfig {
            clusters: names(doc.clusters),
            accounts: names(doc.accounts),
            users: names(doc.users),
            qos: names(doc.qos),
            wckeys: names(doc.wckeys),
            tres: doc.tres.unwrap_or_default().into_iter().map(tracked).collect(),
        })
    }

    async fn diagnostics(&self, ctx: &RequestContext) -> Result<Diagnostics, SlurmError> {
        let call = self.prepare(ctx, Verb::Diagnostics)?;
        let reply = call.send(ctx, None, None).await?;
        let doc: DiagDocument = call.decode(take_document(&reply.body))?;
        Ok(diagnostics(doc.statistics.unwrap_or_default()))
    }

    async fn db_diagnostics(
        &self,
        ctx: &RequestContext,
    ) -> Result<DatabaseDiagnostics, SlurmError> {
        let call = self.prepare(ctx, Verb::DbDiagnostics)?;
        let reply = call.send(ctx, None, None).await?;
        let doc: DbDiagDocument = call.decode(take_document(&reply.body))?;
        let stats = doc.statistics.unwrap_or_default();
        Ok(DatabaseDiagnostics {
            window_start: timestamp(stats.time_start),
            rpcs: stats.rpcs.unwrap_or_default().into_iter().map(rpc_stat).collect(),
            users: stats.users.unwrap_or_default().into_iter().map(rpc_stat).collect(),
        })
    }

    async fn tres(&self, ctx: &RequestContext) -> Result<Vec<TrackedResource>, SlurmError> {
        let call = self.prepare(ctx, Verb::Tres)?;
        let reply = call.send(ctx, None, None).await?;
        let records: Vec<Tres> = call.decode(take_collection(&reply.body, "TRES"))?;
        Ok(records.into_iter().map(tracked).collect())
    }

    async fn create_tres(
        &self,
        ctx: &RequestContext,
        tres: &TresCreate,
    ) -> Result<Created, SlurmError> {
        let call = self.prepare(ctx, Verb::CreateTres)?;
        call.validate(tres)?;
        let record = Tres {
            kind: Some(tres.kind.clone()),
            name: (!tres.name.is_empty()).then(|| tres.name.clone()),
            ..Tres::default()
        };
        let body = call.body(collection("TRES", &record))?;
        let reply = call.send(ctx, None, body).await?;
        let key = TrackedResource {
            kind: tres.kind.clone(),
            name: tres.name.clone(),
            ..TrackedResource::default()
        }
        .key();
        Ok(Created {
            key: Some(key),
            warnings: reply.warnings,
        })
    }

    async fn reconfigure(&self, ctx: &RequestContext) -> Result<Vec<String>, SlurmError> {
        let call = self.prepare(ctx, Verb::Reconfigure)?;
        let reply = call.send(ctx, None, None).await?;
        Ok(reply.warnings)
    }
}
