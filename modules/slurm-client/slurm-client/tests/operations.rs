#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Manager operations end to end over an in-memory wire client

mod common;

use std::time::Duration;

use common::{client, errors};
use serde_json::json;
use slurm_client::HttpMethod;
use slurm_client::SlurmClient;
use slurm_client::sdk::{
    AccountCreate, ApiVersion, AssociationUpdate, ClusterListOptions, EntityKind, ErrorCode,
    JobCreate, JobListOptions, JobState, NodeListOptions, NodeState, Operation,
    PartitionEventKind, PartitionListOptions, PartitionWatchOptions, PreemptMode, QosUpdate,
    RequestContext, ShareKind, SharesOptions, SlurmError, TransportErrorKind, TresCreate, TresMap,
    Verb,
};

fn job_script() -> JobCreate {
    JobCreate {
        script: "#!/bin/bash\nsrun hostname".to_owned(),
        name: "hostname".to_owned(),
        partition: "debug".to_owned(),
        time_limit: Some(30),
        ..JobCreate::default()
    }
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn list_jobs_decodes_state_arrays() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    wire.reply(
        200,
        json!({
            "jobs": [
                {"job_id": 1, "name": "a", "job_state": ["RUNNING"], "user_name": "alice"},
                {"job_id": 2, "name": "b", "job_state": ["PENDING"], "user_name": "bob"},
            ]
        }),
    );

    let ctx = RequestContext::new();
    let opts = JobListOptions {
        states: vec![JobState::Running],
        ..JobListOptions::default()
    };
    let result = client.jobs().unwrap().list(&ctx, &opts).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, 1);
    assert_eq!(result.items[0].user_name, "alice");
    let request = wire.last();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "/slurm/v0.0.42/jobs/");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn v0_0_40_job_state_is_comma_separated() {
    let (client, wire) = client(ApiVersion::V0_0_40);
    wire.reply(
        200,
        json!({"jobs": [{"job_id": 5, "job_state": "RUNNING,COMPLETING"}]}),
    );

    let ctx = RequestContext::new();
    let job = client.jobs().unwrap().get(&ctx, 5).await.unwrap();

    assert_eq!(job.state, vec![JobState::Running, JobState::Completing]);
    assert_eq!(wire.last().path, "/slurm/v0.0.40/job/5");
}

#[tokio::test]
async fn get_without_matching_record_is_not_found() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    wire.reply(200, json!({"jobs": [{"job_id": 8}]}));

    let err = client
        .jobs()
        .unwrap()
        .get(&RequestContext::new(), 9)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
    assert_eq!(err.version(), ApiVersion::V0_0_43);
}

#[tokio::test]
async fn list_nodes_pages_after_filtering() {
    let (client, wire) = client(ApiVersion::V0_0_44);
    wire.reply(
        200,
        json!({
            "nodes": [
                {"name": "c1", "state": ["IDLE"]},
                {"name": "c2", "state": ["IDLE", "DRAIN"]},
                {"name": "c3", "state": ["ALLOCATED"]},
                {"name": "c4", "state": ["IDLE"]},
            ]
        }),
    );

    let opts = NodeListOptions {
        states: vec![NodeState::Idle],
        limit: Some(2),
        offset: 1,
        ..NodeListOptions::default()
    };
    let page = client
        .nodes()
        .unwrap()
        .list(&RequestContext::new(), &opts)
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    let names: Vec<&str> = page.items.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["c2", "c4"]);
}

#[tokio::test]
async fn ping_reports_controllers() {
    let (client, wire) = client(ApiVersion::V0_0_41);
    wire.reply(
        200,
        json!({
            "pings": [
                {"hostname": "ctl1", "pinged": "UP", "latency": 120, "mode": "primary"},
                {"hostname": "ctl2", "pinged": "DOWN", "latency": 0, "mode": "backup"},
            ]
        }),
    );

    let pings = client.info().ping(&RequestContext::new()).await.unwrap();

    assert_eq!(pings.len(), 2);
    assert!(pings[0].is_up());
    assert_eq!(pings[0].latency_us, 120);
    assert!(!pings[1].is_up());
    assert_eq!(wire.last().path, "/slurm/v0.0.41/ping/");
}

#[tokio::test]
async fn qos_limits_decode_from_nested_records() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    wire.reply(
        200,
        json!({
            "qos": [{
                "name": "normal",
                "priority": {"set": true, "infinite": false, "number": 10},
                "preempt": {"list": ["low"], "mode": ["REQUEUE"]},
                "limits": {
                    "grace_time": 300,
                    "max": {"jobs": {"per": {"user": {"set": true, "number": 5}}}}
                }
            }]
        }),
    );

    let qos = client
        .qos()
        .unwrap()
        .get(&RequestContext::new(), "normal")
        .await
        .unwrap();

    assert_eq!(qos.priority, 10);
    assert_eq!(qos.preempt_list, vec!["low".to_owned()]);
    assert_eq!(qos.preempt_mode, vec![PreemptMode::Requeue]);
    assert_eq!(qos.grace_time, 300);
    assert_eq!(qos.max_submit_jobs_per_user, 5);
    assert_eq!(qos.max_jobs_per_user, 0);
    assert_eq!(wire.last().path, "/slurmdb/v0.0.43/qos/normal");
}

#[tokio::test]
async fn association_limits_decode_from_max() {
    let (client, wire) = client(ApiVersion::V0_0_40);
    wire.reply(
        200,
        json!({
            "associations": [{
                "id": 7,
                "account": "physics",
                "max": {
                    "jobs": {
                        "active": {"set": true, "number": 50},
                        "per": {"wall_clock": {"set": true, "number": 1440}}
                    },
                    "tres": {"total": [{"type": "cpu", "count": 512}]}
                }
            }]
        }),
    );

    let association = client
        .associations()
        .unwrap()
        .get(&RequestContext::new(), 7)
        .await
        .unwrap();

    assert_eq!(association.max_jobs, 50);
    assert_eq!(association.max_wall_time, 1440);
    assert_eq!(association.grp_tres.get("cpu"), Some(&512));
}

#[tokio::test]
async fn cluster_info_comes_from_ping_meta() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    let ping = json!({
        "meta": {"slurm": {
            "version": {"major": "24", "minor": "05", "micro": "3"},
            "release": "24.05.3",
            "cluster": "hpc"
        }},
        "pings": []
    });
    wire.reply(200, ping.clone()).reply(200, ping);

    let ctx = RequestContext::new();
    let info = client.info().get(&ctx).await.unwrap();
    assert_eq!(info.version, "24.05.3");
    assert_eq!(info.cluster_name, "hpc");
    assert_eq!(info.api_version, ApiVersion::V0_0_42);
    assert_eq!(wire.last().path, "/slurm/v0.0.42/ping/");

    let version = client.info().api_version(&ctx).await.unwrap();
    assert_eq!(version.release, "24.05.3");
    assert!(!version.deprecated);
    assert!(!version.is_prerelease());
}

#[tokio::test]
async fn oldest_revision_reports_deprecation() {
    let (client, _wire) = client(ApiVersion::V0_0_40);
    let version = client.info().api_version(&RequestContext::new()).await.unwrap();
    assert!(version.deprecated);
    assert_eq!(version.release, "");
}

#[tokio::test]
async fn stats_combine_diagnostics_and_nodes() {
    let (client, wire) = client(ApiVersion::V0_0_44);
    wire.reply(
        200,
        json!({"statistics": {
            "jobs_submitted": 40, "jobs_running": 3, "jobs_pending": 5, "jobs_completed": 30
        }}),
    )
    .reply(
        200,
        json!({"nodes": [
            {"name": "c1", "state": ["IDLE"], "cpus": 16, "alloc_cpus": 0},
            {"name": "c2", "state": ["MIXED"], "cpus": 16, "alloc_cpus": 4},
        ]}),
    );

    let stats = client.info().stats(&RequestContext::new()).await.unwrap();

    assert_eq!(stats.total_jobs, 40);
    assert_eq!(stats.pending_jobs, 5);
    assert_eq!(stats.total_nodes, 2);
    assert_eq!(stats.idle_nodes, 1);
    assert_eq!(stats.allocated_nodes, 1);
    assert_eq!(stats.idle_cpus, 28);
    let paths: Vec<String> = wire.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/slurm/v0.0.44/diag/", "/slurm/v0.0.44/nodes/"]);
}

#[tokio::test]
async fn database_ping_route_differs_by_revision() {
    let ctx = RequestContext::new();
    let (client, wire) = client(ApiVersion::V0_0_43);
    client.info().ping_database(&ctx).await.unwrap();
    assert_eq!(wire.last().path, "/slurmdb/v0.0.43/ping/");

    let (client, wire) = common::client(ApiVersion::V0_0_41);
    client.info().ping_database(&ctx).await.unwrap();
    assert_eq!(wire.last().path, "/slurmdb/v0.0.41/config");

    let (client, wire) = common::client(ApiVersion::V0_0_44);
    wire.reply(500, errors("SLURM_DAEMON_DOWN", "slurmdbd unreachable"));
    let err = client.info().ping_database(&ctx).await.unwrap_err();
    assert_eq!(err.operation(), Operation::new(EntityKind::Info, Verb::PingDatabase));
}

#[tokio::test]
async fn licenses_decode_capitalized_fields() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    wire.reply(
        200,
        json!({"licenses": [
            {"LicenseName": "matlab", "Total": 10, "Used": 4, "Free": 6, "Remote": true}
        ]}),
    );

    let licenses = client.standalone().licenses(&RequestContext::new()).await.unwrap();

    assert_eq!(licenses.len(), 1);
    assert_eq!(licenses[0].name, "matlab");
    assert_eq!(licenses[0].free, 6);
    assert!(licenses[0].remote);
    assert_eq!(wire.last().path, "/slurm/v0.0.43/licenses/");
}

#[tokio::test]
async fn shares_send_filters_and_read_fairshare() {
    let (client, wire) = client(ApiVersion::V0_0_41);
    wire.reply(
        200,
        json!({"shares": {"shares": [{
            "id": 3, "name": "alice", "parent": "physics", "type": ["USER"],
            "shares": {"set": true, "infinite": false, "number": 1},
            "effective_usage": 0.5,
            "fairshare": {"factor": {"set": true, "infinite": false, "number": 0.75}}
        }]}}),
    );

    let opts = SharesOptions {
        users: vec!["alice".to_owned()],
        accounts: vec!["physics".to_owned(), "chem".to_owned()],
    };
    let shares = client
        .standalone()
        .shares(&RequestContext::new(), &opts)
        .await
        .unwrap();

    assert_eq!(shares[0].name, "alice");
    assert_eq!(shares[0].kind, vec![ShareKind::User]);
    assert_eq!(shares[0].shares, 1);
    assert!((shares[0].fairshare_factor - 0.75).abs() < f64::EPSILON);
    let request = wire.last();
    assert_eq!(request.path, "/slurm/v0.0.41/shares");
    assert_eq!(
        request.query,
        vec![
            ("users".to_owned(), "alice".to_owned()),
            ("accounts".to_owned(), "physics,chem".to_owned()),
        ]
    );
}

#[tokio::test]
async fn accounting_config_lists_names_and_tres() {
    let (client, wire) = client(ApiVersion::V0_0_44);
    wire.reply(
        200,
        json!({
            "clusters": [{"name": "hpc"}],
            "accounts": [{"name": "root"}, {"name": "physics"}],
            "qos": [{"name": "normal"}],
            "tres": [{"type": "gres", "name": "gpu", "id": 1001}]
        }),
    );

    let config = client.standalone().config(&RequestContext::new()).await.unwrap();

    assert_eq!(config.clusters, vec!["hpc"]);
    assert_eq!(config.accounts, vec!["root", "physics"]);
    assert!(config.users.is_empty());
    assert_eq!(config.tres[0].key(), "gres/gpu");
    assert_eq!(config.tres[0].id, 1001);
    assert_eq!(wire.last().path, "/slurmdb/v0.0.44/config");
}

#[tokio::test]
async fn diagnostics_read_scheduler_counters() {
    let (client, wire) = client(ApiVersion::V0_0_40);
    wire.reply(
        200,
        json!({"statistics": {
            "req_time": {"set": true, "infinite": false, "number": 1_700_000_000},
            "server_thread_count": 3,
            "jobs_failed": 2,
            "schedule_cycle_max": 91_000,
            "bf_active": true,
            "bf_when_last_cycle": {"set": true, "infinite": false, "number": 0}
        }}),
    );

    let diag = client.standalone().diagnostics(&RequestContext::new()).await.unwrap();

    assert_eq!(diag.server_thread_count, 3);
    assert_eq!(diag.jobs_failed, 2);
    assert_eq!(diag.schedule_cycle_max, 91_000);
    assert!(diag.bf_active);
    assert_eq!(diag.collected_at.unwrap().timestamp(), 1_700_000_000);
    assert!(diag.bf_last_cycle_at.is_none());
    assert_eq!(wire.last().path, "/slurm/v0.0.40/diag/");
}

#[tokio::test]
async fn database_diagnostics_only_on_v0_0_43() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    wire.reply(
        200,
        json!({"statistics": {
            "time_start": 1_700_000_000,
            "RPCs": [{"rpc": "DBD_GET_QOS", "count": 12, "time": {"average": 40, "total": 480}}]
        }}),
    );

    let ctx = RequestContext::new();
    let diag = client.standalone().db_diagnostics(&ctx).await.unwrap();
    assert_eq!(diag.rpcs[0].name, "DBD_GET_QOS");
    assert_eq!(diag.rpcs[0].total_us, 480);
    assert_eq!(wire.last().path, "/slurmdb/v0.0.43/diag/");

    let (client, wire) = common::client(ApiVersion::V0_0_44);
    let err = client.standalone().db_diagnostics(&ctx).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedOperation);
    assert!(wire.requests().is_empty());
}

#[tokio::test]
async fn tres_catalogue_reads_the_upper_case_collection() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    wire.reply(
        200,
        json!({"TRES": [
            {"type": "cpu", "id": 1, "count": 512},
            {"type": "gres", "name": "gpu", "id": 1001, "count": 16}
        ]}),
    );

    let tres = client.standalone().tres(&RequestContext::new()).await.unwrap();

    let keys: Vec<String> = tres.iter().map(|t| t.key()).collect();
    assert_eq!(keys, vec!["cpu", "gres/gpu"]);
    assert_eq!(tres[0].count, 512);
    assert_eq!(wire.last().path, "/slurmdb/v0.0.42/tres/");
}

#[tokio::test]
async fn partition_watch_reports_drained_partition() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    wire.reply(200, json!({"partitions": [{"name": "batch", "partition": {"state": ["UP"]}}]}))
        .reply(200, json!({"partitions": [{"name": "batch", "partition": {"state": ["DRAIN"]}}]}));

    let ctx = RequestContext::new();
    let opts = PartitionWatchOptions {
        poll_interval: Some(Duration::from_millis(10)),
        ..PartitionWatchOptions::default()
    };
    let mut events = client
        .partitions()
        .unwrap()
        .watch(&ctx, Some(&opts))
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    ctx.cancel();
    assert_eq!(event.kind, PartitionEventKind::StateChanged);
    assert_eq!(event.partition_name, "batch");
    assert_eq!(wire.requests()[0].path, "/slurm/v0.0.43/partitions/");
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn v0_0_40_submit_sends_script_beside_descriptor() {
    let (client, wire) = client(ApiVersion::V0_0_40);
    wire.reply(200, json!({"job_id": 77, "step_id": "batch"}));

    let submitted = client
        .jobs()
        .unwrap()
        .submit(&RequestContext::new(), &job_script())
        .await
        .unwrap();

    assert_eq!(submitted.job_id, 77);
    assert_eq!(submitted.step_id, "batch");
    let request = wire.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "/slurm/v0.0.40/job/submit");
    let body = request.body.unwrap();
    assert_eq!(body["script"], "#!/bin/bash\nsrun hostname");
    assert_eq!(body["job"]["name"], "hostname");
}

#[tokio::test]
async fn v0_0_42_submit_embeds_script_in_descriptor() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    wire.reply(
        200,
        json!({"job_id": 78, "warnings": [{"description": "partition default used"}]}),
    );

    let submitted = client
        .jobs()
        .unwrap()
        .submit(&RequestContext::new(), &job_script())
        .await
        .unwrap();

    assert_eq!(submitted.job_id, 78);
    assert_eq!(submitted.warnings, vec!["partition default used".to_owned()]);
    let body = wire.last().body.unwrap();
    assert!(body.get("script").is_none());
    assert_eq!(body["job"]["script"], "#!/bin/bash\nsrun hostname");
    assert_eq!(body["job"]["partition"], "debug");
}

#[tokio::test]
async fn invalid_submit_never_reaches_the_wire() {
    let (client, wire) = client(ApiVersion::V0_0_44);
    let job = JobCreate {
        min_nodes: Some(4),
        max_nodes: Some(2),
        ..job_script()
    };

    let err = client
        .jobs()
        .unwrap()
        .submit(&RequestContext::new(), &job)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(err.operation().verb, Verb::Submit);
    assert!(wire.requests().is_empty());
}

#[tokio::test]
async fn empty_script_is_rejected() {
    let (client, wire) = client(ApiVersion::V0_0_41);
    let err = client
        .jobs()
        .unwrap()
        .submit(&RequestContext::new(), &JobCreate::default())
        .await
        .unwrap_err();

    match err {
        SlurmError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("script")),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(wire.requests().is_empty());
}

#[tokio::test]
async fn signal_travels_as_query() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    client
        .jobs()
        .unwrap()
        .signal(&RequestContext::new(), 12, " SIGUSR1 ")
        .await
        .unwrap();

    let request = wire.last();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.path, "/slurm/v0.0.43/job/12");
    assert_eq!(
        request.query,
        vec![("signal".to_owned(), "SIGUSR1".to_owned())]
    );
}

#[tokio::test]
async fn drain_marks_node_with_reason() {
    let (client, wire) = client(ApiVersion::V0_0_44);
    client
        .nodes()
        .unwrap()
        .drain(&RequestContext::new(), "c7", "bad dimm")
        .await
        .unwrap();

    let request = wire.last();
    assert_eq!(request.path, "/slurm/v0.0.44/node/c7");
    let body = request.body.unwrap();
    assert_eq!(body["state"], json!(["DRAIN"]));
    assert_eq!(body["reason"], "bad dimm");
}

#[tokio::test]
async fn drain_requires_reason() {
    let (client, wire) = client(ApiVersion::V0_0_44);
    let err = client
        .nodes()
        .unwrap()
        .drain(&RequestContext::new(), "c7", "  ")
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert!(wire.requests().is_empty());
}

#[tokio::test]
async fn account_create_uses_association_endpoint_from_v0_0_42() {
    let account = AccountCreate {
        name: "physics".to_owned(),
        description: "Physics".to_owned(),
        organization: "science".to_owned(),
        cluster: "hpc".to_owned(),
        ..AccountCreate::default()
    };

    let (old, old_wire) = client(ApiVersion::V0_0_41);
    let created = old
        .accounts()
        .unwrap()
        .create(&RequestContext::new(), &account)
        .await
        .unwrap();
    assert_eq!(created.key.as_deref(), Some("physics"));
    let request = old_wire.last();
    assert_eq!(request.path, "/slurmdb/v0.0.41/accounts/");
    assert_eq!(request.body.unwrap()["accounts"][0]["name"], "physics");

    let (new, new_wire) = client(ApiVersion::V0_0_42);
    new.accounts()
        .unwrap()
        .create(&RequestContext::new(), &account)
        .await
        .unwrap();
    let request = new_wire.last();
    assert_eq!(request.path, "/slurmdb/v0.0.42/accounts_association/");
    let body = request.body.unwrap();
    assert_eq!(body["association_condition"]["accounts"][0], "physics");
    assert_eq!(body["account"]["description"], "Physics");
}

#[tokio::test]
async fn qos_update_sends_exactly_the_given_fields() {
    let update = QosUpdate {
        priority: Some(0),
        description: Some(String::new()),
        flags: Some(vec![]),
        max_tres_per_job: Some(TresMap::new()),
        usage_factor: None,
        ..QosUpdate::default()
    };

    for version in &ApiVersion::ALL[1..] {
        let (client, wire) = client(*version);
        client
            .qos()
            .unwrap()
            .update(&RequestContext::new(), "normal", &update)
            .await
            .unwrap();

        let request = wire.last();
        assert_eq!(request.path, format!("/slurmdb/{version}/qos/"));
        assert_eq!(
            request.body.unwrap(),
            json!({
                "qos": [{
                    "name": "normal",
                    "description": "",
                    "flags": [],
                    "priority": {"set": true, "infinite": false, "number": 0},
                    "limits": {"max": {"tres": {"per": {"job": []}}}}
                }]
            }),
            "{version}"
        );
    }
}

#[tokio::test]
async fn association_update_keeps_zero_and_empty_values() {
    let update = AssociationUpdate {
        max_jobs: Some(0),
        qos_list: Some(vec![]),
        grp_tres: Some(TresMap::new()),
        ..AssociationUpdate::default()
    };

    for version in ApiVersion::ALL {
        let (client, wire) = client(version);
        client
            .associations()
            .unwrap()
            .update(&RequestContext::new(), 7, &update)
            .await
            .unwrap();

        assert_eq!(
            wire.last().body.unwrap(),
            json!({
                "associations": [{
                    "id": 7,
                    "qos": [],
                    "max": {
                        "jobs": {"active": {"set": true, "infinite": false, "number": 0}},
                        "tres": {"total": []}
                    }
                }]
            }),
            "{version}"
        );
    }
}

#[tokio::test]
async fn create_tres_posts_the_upper_case_collection() {
    let (client, wire) = client(ApiVersion::V0_0_41);
    let tres = TresCreate {
        kind: "license".to_owned(),
        name: "matlab".to_owned(),
    };

    let created = client
        .standalone()
        .create_tres(&RequestContext::new(), &tres)
        .await
        .unwrap();

    assert_eq!(created.key.as_deref(), Some("license/matlab"));
    let request = wire.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "/slurmdb/v0.0.41/tres/");
    assert_eq!(
        request.body.unwrap(),
        json!({"TRES": [{"type": "license", "name": "matlab"}]})
    );
}

#[tokio::test]
async fn create_tres_requires_a_kind() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    let err = client
        .standalone()
        .create_tres(&RequestContext::new(), &TresCreate::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert!(wire.requests().is_empty());
}

#[tokio::test]
async fn reconfigure_returns_controller_warnings() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    wire.reply(200, json!({"warnings": [{"description": "node c9 not responding"}]}));

    let warnings = client
        .standalone()
        .reconfigure(&RequestContext::new())
        .await
        .unwrap();

    assert_eq!(warnings, vec!["node c9 not responding"]);
    assert_eq!(wire.last().path, "/slurm/v0.0.43/reconfigure/");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn missing_entity_accessor_is_none() {
    let (client, _wire) = client(ApiVersion::V0_0_40);
    assert!(client.qos().is_none());
    assert!(!client.capabilities().has_entity(EntityKind::Qos));
    let (client, _wire) = common::client(ApiVersion::V0_0_41);
    assert!(client.qos().is_some());
}

#[tokio::test]
async fn unconfigured_operation_is_unsupported() {
    let (client, wire) = client(ApiVersion::V0_0_40);
    let err = client
        .jobs()
        .unwrap()
        .hold(&RequestContext::new(), 3)
        .await
        .unwrap_err();

    assert!(matches!(err, SlurmError::Unsupported { .. }));
    assert_eq!(err.code(), ErrorCode::UnsupportedOperation);
    assert!(wire.requests().is_empty());
}

#[tokio::test]
async fn slurm_error_names_map_to_codes() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    wire.reply(500, errors("ESLURM_INVALID_JOB_ID", "Invalid job id specified"));

    let err = client
        .jobs()
        .unwrap()
        .cancel(&RequestContext::new(), 404)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
    assert!(err.to_string().contains("Invalid job id specified"));
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    wire.reply(503, json!({}));

    let err = client
        .partitions()
        .unwrap()
        .list(&RequestContext::new(), &PartitionListOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn transport_failure_keeps_origin() {
    let (client, wire) = client(ApiVersion::V0_0_43);
    wire.fail(TransportErrorKind::Connect);

    let err = client
        .users()
        .unwrap()
        .get(&RequestContext::new(), "alice")
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ConnectionRefused);
    assert_eq!(err.operation().entity, EntityKind::User);
    assert_eq!(err.version(), ApiVersion::V0_0_43);
}

#[tokio::test]
async fn detached_client_reports_not_initialized() {
    let client = SlurmClient::detached(ApiVersion::V0_0_44);
    let err = client
        .clusters()
        .unwrap()
        .list(&RequestContext::new(), &ClusterListOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ClientNotInitialized);
}

#[tokio::test]
async fn cancelled_context_stops_before_the_wire() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    let ctx = RequestContext::new();
    ctx.cancel();

    let err = client.info().ping(&ctx).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ContextCanceled);
    assert!(wire.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn expired_deadline_is_reported() {
    let (client, wire) = client(ApiVersion::V0_0_42);
    let ctx = RequestContext::new().with_timeout(Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(20)).await;

    let err = client.info().ping(&ctx).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::DeadlineExceeded);
    assert!(wire.requests().is_empty());
}
