#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The hyper wire client against a mock `slurmrestd`

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use slurm_client::sdk::{ApiVersion, ErrorCode, JobListOptions, RequestContext};
use slurm_client::transport::{USER_NAME_HEADER, USER_TOKEN_HEADER};
use slurm_client::{
    Auth, HttpMethod, HttpWireClient, SlurmClient, SlurmClientConfig, WireClient, WireRequest,
};

fn config(base_url: &str, auth: Auth) -> SlurmClientConfig {
    SlurmClientConfig {
        base_url: base_url.to_owned(),
        version: "v0.0.42".to_owned(),
        auth,
        ..SlurmClientConfig::default()
    }
}

#[tokio::test]
async fn token_credentials_reach_slurmrestd() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/slurm/v0.0.42/jobs/")
            .header(USER_NAME_HEADER, "alice")
            .header(USER_TOKEN_HEADER, "jwt-123")
            .header("accept", "application/json");
        then.status(200)
            .json_body(json!({"jobs": [{"job_id": 3, "name": "train"}]}));
    });

    let auth = Auth::token("alice", "jwt-123");
    let client = SlurmClient::from_config(&config(&server.base_url(), auth)).unwrap();
    assert_eq!(client.version(), ApiVersion::V0_0_42);
    let jobs = client
        .jobs()
        .unwrap()
        .list(&RequestContext::new(), &JobListOptions::default())
        .await
        .unwrap();

    m.assert_async().await;
    assert_eq!(jobs.total, 1);
    assert_eq!(jobs.items[0].name, "train");
}

#[tokio::test]
async fn basic_credentials_use_authorization_header() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/slurm/v0.0.42/ping/")
            .header("authorization", "Basic Ym9iOnNlY3JldA==");
        then.status(200)
            .json_body(json!({"pings": [{"hostname": "ctl", "pinged": "UP"}]}));
    });

    let auth = Auth::basic("bob", "secret");
    let client = SlurmClient::from_config(&config(&server.base_url(), auth)).unwrap();
    let pings = client.info().ping(&RequestContext::new()).await.unwrap();

    m.assert_async().await;
    assert_eq!(pings[0].hostname, "ctl");
}

#[tokio::test]
async fn json_bodies_carry_content_type_and_query() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(DELETE)
            .path("/slurm/v0.0.42/job/9")
            .query_param("signal", "SIGTERM");
        then.status(200).json_body(json!({}));
    });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/slurm/v0.0.42/node/c1")
            .header("content-type", "application/json");
        then.status(200).json_body(json!({}));
    });

    let client = SlurmClient::from_config(&config(&server.base_url(), Auth::None)).unwrap();
    let ctx = RequestContext::new();
    client
        .jobs()
        .unwrap()
        .signal(&ctx, 9, "SIGTERM")
        .await
        .unwrap();
    client.nodes().unwrap().resume(&ctx, "c1").await.unwrap();

    m.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn error_status_is_a_response_not_a_transport_failure() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/slurm/v0.0.42/jobs/");
        then.status(502).body("<html>bad gateway</html>");
    });

    let wire = HttpWireClient::new(&server.base_url(), Auth::None, Duration::from_secs(5), "test")
        .unwrap();
    let response = wire
        .execute(WireRequest {
            method: HttpMethod::Get,
            path: "/slurm/v0.0.42/jobs/".to_owned(),
            query: Vec::new(),
            body: None,
        })
        .await
        .unwrap();
    assert_eq!(response.status, 502);
    assert!(!response.is_success());

    let client = SlurmClient::from_config(&config(&server.base_url(), Auth::None)).unwrap();
    let err = client
        .jobs()
        .unwrap()
        .list(&RequestContext::new(), &JobListOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.code(), ErrorCode::SlurmDaemonDown);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/slurm/v0.0.42/ping/");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(json!({"pings": []}));
    });

    let mut settings = config(&server.base_url(), Auth::None);
    settings.timeout = Duration::from_millis(50);
    let client = SlurmClient::from_config(&settings).unwrap();
    let err = client.info().ping(&RequestContext::new()).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::NetworkTimeout);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn closed_port_is_connection_refused() {
    let client = SlurmClient::from_config(&config("http://127.0.0.1:1", Auth::None)).unwrap();
    let err = client.info().ping(&RequestContext::new()).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ConnectionRefused);
}

#[test]
fn malformed_base_url_is_rejected() {
    let err = SlurmClient::from_config(&config("http://bad host", Auth::None)).unwrap_err();
    assert!(err.to_string().contains("bad host"));
}
