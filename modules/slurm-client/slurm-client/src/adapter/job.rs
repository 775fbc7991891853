use async_trait::async_trait;
use slurm_client_sdk::{
    ApiVersion, Job, JobAllocateRequest, JobAllocation, JobCreate, JobEvent, JobListOptions,
    JobManager, JobSubmitResponse, JobUpdate, JobWatchOptions, ListResult, RequestContext,
    SlurmError, Verb,
};
use tokio::sync::mpsc;
use tracing::info;

use super::EntityAdapter;
use crate::validation::require;
use crate::versions::JobVerbs;
use crate::watch::{JobTracker, spawn_poller};
use crate::wire::common::{AllocateResponse, SubmitResponse, take_document};

impl<B> EntityAdapter<B>
where
    B: JobVerbs<Key = u32, Update = JobUpdate>,
{
    /// Hold, release and notify are job updates under their own operation.
    async fn update_as(
        &self,
        ctx: &RequestContext,
        verb: Verb,
        id: u32,
        update: &JobUpdate,
    ) -> Result<(), SlurmError> {
        let call = self.prepare(ctx, verb)?;
        if verb == Verb::Notify {
            call.check(require("message", &update.comment))?;
        }
        let body = call.body(B::update_body(&id, update))?;
        call.send(ctx, Some(&id.to_string()), body).await?;
        Ok(())
    }
}

#[async_trait]
impl<B> JobManager for EntityAdapter<B>
where
    B: JobVerbs<
            Key = u32,
            Entity = Job,
            Create = JobCreate,
            Update = JobUpdate,
            Query = JobListOptions,
        >,
{
    fn version(&self) -> ApiVersion {
        B::capabilities().version
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &JobListOptions,
    ) -> Result<ListResult<Job>, SlurmError> {
        self.list_entities(ctx, opts).await
    }

    async fn get(&self, ctx: &RequestContext, id: u32) -> Result<Job, SlurmError> {
        self.get_entity(ctx, id).await
    }

    async fn submit(
        &self,
        ctx: &RequestContext,
        job: &JobCreate,
    ) -> Result<JobSubmitResponse, SlurmError> {
        let call = self.prepare(ctx, Verb::Submit)?;
        call.validate(job)?;
        let body = call.body(B::submit_body(job))?;
        let reply = call.send(ctx, None, body).await?;
        let submitted: SubmitResponse = call.decode(take_document(&reply.body))?;
        let job_id = submitted.job_id.unwrap_or_default();
        info!(version = %call.origin.version, job_id, "job submitted");
        Ok(JobSubmitResponse {
            job_id,
            step_id: submitted.step_id.unwrap_or_default(),
            message: submitted.job_submit_user_msg.unwrap_or_default(),
            warnings: reply.warnings,
        })
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: u32,
        update: &JobUpdate,
    ) -> Result<(), SlurmError> {
        self.update_entity(ctx, id, update).await
    }

    async fn cancel(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError> {
        let call = self.prepare(ctx, Verb::Cancel)?;
        call.send(ctx, Some(&id.to_string()), None).await?;
        Ok(())
    }

    async fn hold(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError> {
        let update = JobUpdate {
            hold: Some(true),
            ..JobUpdate::default()
        };
        self.update_as(ctx, Verb::Hold, id, &update).await
    }

    async fn release(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError> {
        let update = JobUpdate {
            hold: Some(false),
            ..JobUpdate::default()
        };
        self.update_as(ctx, Verb::Release, id, &update).await
    }

    async fn signal(
        &self,
        ctx: &RequestContext,
        id: u32,
        signal: &str,
    ) -> Result<(), SlurmError> {
        let call = self.prepare(ctx, Verb::Signal)?;
        call.check(require("signal", signal))?;
        let query = vec![("signal".to_owned(), signal.trim().to_owned())];
        call.send_with(ctx, Some(&id.to_string()), query, None)
            .await?;
        Ok(())
    }

    async fn notify(
        &self,
        ctx: &RequestContext,
        id: u32,
        message: &str,
    ) -> Result<(), SlurmError> {
        let update = JobUpdate {
            comment: Some(message.to_owned()),
            ..JobUpdate::default()
        };
        self.update_as(ctx, Verb::Notify, id, &update).await
    }

    async fn requeue(&self, ctx: &RequestContext, id: u32) -> Result<(), SlurmError> {
        let call = self.prepare(ctx, Verb::Requeue)?;
        call.send(ctx, Some(&id.to_string()), None).await?;
        Ok(())
    }

    async fn allocate(
        &self,
        ctx: &RequestContext,
        request: &JobAllocateRequest,
    ) -> Result<JobAllocation, SlurmError> {
        let call = self.prepare(ctx, Verb::Allocate)?;
        call.validate(request)?;
        let body = call.body(B::allocate_body(request))?;
        let reply = call.send(ctx, None, body).await?;
        let allocated: AllocateResponse = call.decode(take_document(&reply.body))?;
        Ok(JobAllocation {
            job_id: allocated.job_id.unwrap_or_default(),
            message: allocated.job_submit_user_msg.unwrap_or_default(),
            warnings: reply.warnings,
        })
    }

    async fn watch(
        &self,
        ctx: &RequestContext,
        opts: Option<&JobWatchOptions>,
    ) -> Result<mpsc::Receiver<JobEvent>, SlurmError> {
        self.prepare(ctx, Verb::Watch)?;
        let opts = opts.cloned().unwrap_or_default();
        let config = self.watch_config().with_interval(opts.poll_interval);
        let adapter = self.clone();
        let fetch = move |ctx: RequestContext| {
            let adapter = adapter.clone();
            async move { adapter.fetch_all(&ctx, Verb::Watch).await }
        };
        Ok(spawn_poller(ctx.clone(), config, fetch, JobTracker::new(opts)))
    }
}
