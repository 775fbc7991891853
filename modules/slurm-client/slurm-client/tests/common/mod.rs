#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for slurm-client integration tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use slurm_client::sdk::{ApiVersion, TransportError, TransportErrorKind};
use slurm_client::{SlurmClient, WireClient, WireRequest, WireResponse};

/// In-memory [`WireClient`] that replays queued replies and records every
/// request it receives. An empty queue answers `200 {}`.
#[derive(Default)]
pub struct MockWire {
    replies: Mutex<VecDeque<Result<WireResponse, TransportError>>>,
    requests: Mutex<Vec<WireRequest>>,
}

impl MockWire {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(WireResponse::json(status, &body)));
        self
    }

    pub fn fail(&self, kind: TransportErrorKind) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(kind, "mock transport failure")));
        self
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> WireRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl WireClient for MockWire {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(WireResponse::json(200, &json!({}))))
    }
}

pub fn client(version: ApiVersion) -> (SlurmClient, Arc<MockWire>) {
    let wire = MockWire::new();
    let client = SlurmClient::new(version, wire.clone());
    (client, wire)
}

/// A `slurmrestd` error envelope.
pub fn errors(name: &str, description: &str) -> Value {
    json!({
        "errors": [{
            "error": name,
            "error_number": 2017,
            "description": description,
            "source": "slurm_rest",
        }]
    })
}
