#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Polling watchers and caller-side retries through the public client

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{MockWire, errors};
use serde_json::json;
use slurm_client::sdk::{
    ApiVersion, ErrorCode, JobEventKind, JobState, JobWatchOptions, NodeEventKind,
    NodeWatchOptions, RequestContext, SlurmError,
};
use slurm_client::{SlurmClient, WatchConfig};
use slurm_retry::RetryPolicy;

fn watching_client(version: ApiVersion) -> (SlurmClient, Arc<MockWire>) {
    let wire = MockWire::new();
    let watch = WatchConfig {
        poll_interval: Duration::from_secs(1),
        buffer: 8,
    };
    let client = SlurmClient::with_settings(version, wire.clone(), &watch, RetryPolicy::fast());
    (client, wire)
}

#[tokio::test(start_paused = true)]
async fn job_watch_reports_transitions() {
    let (client, wire) = watching_client(ApiVersion::V0_0_42);
    wire.reply(
        200,
        json!({"jobs": [
            {"job_id": 1, "job_state": ["PENDING"]},
            {"job_id": 2, "job_state": ["RUNNING"]},
        ]}),
    )
    .reply(
        200,
        json!({"jobs": [
            {"job_id": 1, "job_state": ["RUNNING"]},
            {"job_id": 2, "job_state": ["RUNNING"]},
        ]}),
    )
    .reply(
        200,
        json!({"jobs": [{"job_id": 1, "job_state": ["RUNNING"]}]}),
    );

    let ctx = RequestContext::new();
    let mut events = client.jobs().unwrap().watch(&ctx, None).await.unwrap();

    let started = events.recv().await.unwrap();
    assert_eq!(started.kind, JobEventKind::StateChanged);
    assert_eq!(started.job_id, 1);
    assert_eq!(started.previous_state, vec![JobState::Pending]);
    assert_eq!(started.new_state, vec![JobState::Running]);

    let finished = events.recv().await.unwrap();
    assert_eq!(finished.kind, JobEventKind::Completed);
    assert_eq!(finished.job_id, 2);
    assert!(finished.job.is_none());

    ctx.cancel();
    while events.recv().await.is_some() {}
    assert!(wire.requests().iter().all(|r| r.path == "/slurm/v0.0.42/jobs/"));
}

#[tokio::test(start_paused = true)]
async fn node_watch_filters_by_name() {
    let (client, wire) = watching_client(ApiVersion::V0_0_44);
    wire.reply(
        200,
        json!({"nodes": [
            {"name": "c1", "state": ["IDLE"]},
            {"name": "c2", "state": ["IDLE"]},
        ]}),
    )
    .reply(
        200,
        json!({"nodes": [
            {"name": "c1", "state": ["ALLOCATED"]},
            {"name": "c2", "state": ["DOWN"]},
        ]}),
    );

    let ctx = RequestContext::new();
    let opts = NodeWatchOptions {
        node_names: vec!["c2".to_owned()],
        ..NodeWatchOptions::default()
    };
    let mut events = client
        .nodes()
        .unwrap()
        .watch(&ctx, Some(&opts))
        .await
        .unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, NodeEventKind::StateChanged);
    assert_eq!(event.node_name, "c2");
    ctx.cancel();
}

#[tokio::test]
async fn watch_on_cancelled_context_fails_fast() {
    let (client, wire) = watching_client(ApiVersion::V0_0_41);
    let ctx = RequestContext::new();
    ctx.cancel();

    let err = client
        .jobs()
        .unwrap()
        .watch(&ctx, Some(&JobWatchOptions::default()))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ContextCanceled);
    assert!(wire.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn retry_policy_recovers_from_daemon_outage() {
    let (client, wire) = watching_client(ApiVersion::V0_0_43);
    wire.reply(503, errors("", "slurmctld not responding"))
        .reply(200, json!({"pings": [{"hostname": "ctl", "pinged": "UP"}]}));

    let ctx = RequestContext::new();
    let info = client.info();
    let retried = client
        .retry_policy()
        .run(ctx.cancellation(), |_attempt| info.ping(&ctx))
        .await
        .unwrap();

    assert_eq!(retried.retries, 1);
    assert!(retried.value[0].is_up());
    assert_eq!(wire.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn validation_errors_are_not_retried() {
    let (client, wire) = watching_client(ApiVersion::V0_0_43);
    let ctx = RequestContext::new();
    let nodes = client.nodes().unwrap();

    let err = client
        .retry_policy()
        .run(ctx.cancellation(), |_attempt| nodes.drain(&ctx, "c1", ""))
        .await
        .unwrap_err();

    assert_eq!(err.retries, 0);
    assert!(matches!(err.into_inner(), SlurmError::Validation { .. }));
    assert!(wire.requests().is_empty());
}
