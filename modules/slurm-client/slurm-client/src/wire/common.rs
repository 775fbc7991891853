//! Schemas shared unchanged by every revision.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::noval::NoVal;

wire_model! {
    pub struct Tres {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub name: Option<String>,
        pub id: Option<i32>,
        pub count: Option<i64>,
    }

    pub struct Coord {
        pub name: Option<String>,
        pub direct: Option<bool>,
    }

    pub struct ExitSignal {
        pub id: Option<NoVal<u16>>,
        pub name: Option<String>,
    }

    pub struct ProcessExitCode {
        pub status: Option<Vec<String>>,
        pub return_code: Option<NoVal<i32>>,
        pub signal: Option<ExitSignal>,
    }

    pub struct OpenapiError {
        pub description: Option<String>,
        pub error_number: Option<i32>,
        pub error: Option<String>,
        pub source: Option<String>,
    }

    pub struct OpenapiWarning {
        pub description: Option<String>,
        pub source: Option<String>,
    }

    /// The `errors`/`warnings` lists every response body carries.
    pub struct Envelope {
        pub errors: Option<Vec<OpenapiError>>,
        pub warnings: Option<Vec<OpenapiWarning>>,
    }

    pub struct Ping {
        pub hostname: Option<String>,
        pub pinged: Option<String>,
        pub latency: Option<i64>,
        pub mode: Option<String>,
    }

    pub struct SubmitResponse {
        pub job_id: Option<u32>,
        pub step_id: Option<String>,
        pub job_submit_user_msg: Option<String>,
    }

    pub struct AllocateResponse {
        pub job_id: Option<u32>,
        pub job_submit_user_msg: Option<String>,
    }

    pub struct SlurmRelease {
        pub major: Option<Scalar>,
        pub minor: Option<Scalar>,
        pub micro: Option<Scalar>,
    }

    pub struct SlurmMeta {
        pub version: Option<SlurmRelease>,
        pub release: Option<String>,
        pub cluster: Option<String>,
    }

    pub struct Meta {
        pub slurm: Option<SlurmMeta>,
    }

    /// Any response, read only for its `meta` block.
    pub struct MetaDocument {
        pub meta: Option<Meta>,
    }

    pub struct License {
        #[serde(rename = "LicenseName")]
        pub name: Option<String>,
        #[serde(rename = "Total")]
        pub total: Option<u32>,
        #[serde(rename = "Used")]
        pub used: Option<u32>,
        #[serde(rename = "Free")]
        pub free: Option<u32>,
        #[serde(rename = "Reserved")]
        pub reserved: Option<u32>,
        #[serde(rename = "Remote")]
        pub remote: Option<bool>,
    }

    pub struct Fairshare {
        pub factor: Option<Number<f64>>,
        pub level: Option<Number<f64>>,
    }

    pub struct Share {
        pub id: Option<u32>,
        pub cluster: Option<String>,
        pub name: Option<String>,
        pub parent: Option<String>,
        pub partition: Option<String>,
        pub shares: Option<Number<u32>>,
        pub shares_normalized: Option<Number<f64>>,
        pub usage: Option<i64>,
        pub usage_normalized: Option<Number<f64>>,
        pub effective_usage: Option<Number<f64>>,
        pub fairshare: Option<Fairshare>,
        #[serde(rename = "type")]
        pub kind: Option<Vec<String>>,
    }

    pub struct SharesReport {
        pub shares: Option<Vec<Share>>,
        pub total_shares: Option<i64>,
    }

    pub struct SharesDocument {
        pub shares: Option<SharesReport>,
    }

    /// `sdiag` counters of slurmctld.
    pub struct Statistics {
        pub req_time: Option<Number<i64>>,
        pub req_time_start: Option<Number<i64>>,
        pub server_thread_count: Option<u32>,
        pub agent_queue_size: Option<u32>,
        pub agent_count: Option<u32>,
        pub agent_thread_count: Option<u32>,
        pub dbd_agent_queue_size: Option<u32>,
        pub jobs_submitted: Option<u32>,
        pub jobs_started: Option<u32>,
        pub jobs_completed: Option<u32>,
        pub jobs_canceled: Option<u32>,
        pub jobs_failed: Option<u32>,
        pub jobs_pending: Option<u32>,
        pub jobs_running: Option<u32>,
        pub schedule_cycle_last: Option<u64>,
        pub schedule_cycle_max: Option<u64>,
        pub schedule_cycle_mean: Option<u64>,
        pub schedule_cycle_total: Option<u32>,
        pub schedule_queue_length: Option<u32>,
        pub bf_active: Option<bool>,
        pub bf_backfilled_jobs: Option<u32>,
        pub bf_cycle_counter: Option<u32>,
        pub bf_cycle_mean: Option<u64>,
        pub bf_cycle_max: Option<u64>,
        pub bf_queue_len: Option<u32>,
        pub bf_when_last_cycle: Option<Number<i64>>,
    }

    pub struct DiagDocument {
        pub statistics: Option<Statistics>,
    }

    pub struct Named {
        pub name: Option<String>,
    }

    /// Body of `GET /slurmdb/{version}/config`.
    pub struct AccountingDocument {
        pub clusters: Option<Vec<Named>>,
        pub accounts: Option<Vec<Named>>,
        pub users: Option<Vec<Named>>,
        pub qos: Option<Vec<Named>>,
        pub wckeys: Option<Vec<Named>>,
        pub tres: Option<Vec<Tres>>,
    }

    pub struct RpcTime {
        pub average: Option<i64>,
        pub total: Option<i64>,
    }

    /// One row of `RPCs` (keyed by `rpc`) or `users` (keyed by `user`).
    pub struct RpcCounter {
        pub rpc: Option<String>,
        pub user: Option<String>,
        pub count: Option<u32>,
        pub time: Option<RpcTime>,
    }

    pub struct DbStatistics {
        pub time_start: Option<i64>,
        #[serde(rename = "RPCs")]
        pub rpcs: Option<Vec<RpcCounter>>,
        pub users: Option<Vec<RpcCounter>>,
    }

    pub struct DbDiagDocument {
        pub statistics: Option<DbStatistics>,
    }
}

/// A number some revisions wrap in the no-value record and others send bare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number<T> {
    Bare(T),
    Wrapped(NoVal<T>),
}

impl<T: Copy> Number<T> {
    #[must_use]
    pub fn value(&self) -> Option<T> {
        match self {
            Self::Bare(n) => Some(*n),
            Self::Wrapped(w) => w.value(),
        }
    }
}

/// Read an optional [`Number`], unset meaning zero.
pub fn number<T: Copy + Default>(w: Option<&Number<T>>) -> T {
    w.and_then(Number::value).unwrap_or_default()
}

/// Release parts arrive as strings in newer revisions and integers in older.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Decode the list stored under `field` in a response document.
///
/// A missing or `null` field is an empty collection.
///
/// # Errors
/// Returns a JSON error when the body or the collection does not match `W`.
pub fn take_collection<W: DeserializeOwned>(
    body: &[u8],
    field: &str,
) -> Result<Vec<W>, serde_json::Error> {
    let mut doc: serde_json::Map<String, Value> = serde_json::from_slice(body)?;
    match doc.remove(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v) => serde_json::from_value(v),
    }
}

/// Decode a whole response document, treating an empty body as `{}`.
///
/// # Errors
/// Returns a JSON error when the body does not match `W`.
pub fn take_document<W: DeserializeOwned + Default>(body: &[u8]) -> Result<W, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(W::default());
    }
    serde_json::from_slice(body)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn collection_missing_or_null_is_empty() {
        let out: Vec<Ping> = take_collection(br#"{"meta":{}}"#, "pings").unwrap();
        assert!(out.is_empty());
        let out: Vec<Ping> = take_collection(br#"{"pings":null}"#, "pings").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn collection_decodes_items() {
        let body = br#"{"pings":[{"hostname":"ctl1","pinged":"UP","latency":120}]}"#;
        let out: Vec<Ping> = take_collection(body, "pings").unwrap();
        assert_eq!(out[0].hostname.as_deref(), Some("ctl1"));
        assert_eq!(out[0].latency, Some(120));
    }

    #[test]
    fn none_fields_are_not_serialized() {
        let tres = Tres {
            kind: Some("cpu".to_owned()),
            count: Some(4),
            ..Tres::default()
        };
        assert_eq!(
            serde_json::to_string(&tres).unwrap(),
            r#"{"type":"cpu","count":4}"#
        );
    }

    #[test]
    fn numbers_decode_bare_or_wrapped() {
        let share: Share = serde_json::from_str(
            r#"{"effective_usage": 0.25,
                "usage_normalized": {"set": true, "infinite": false, "number": 0.5},
                "shares_normalized": {"set": false, "infinite": false, "number": 0.0}}"#,
        )
        .unwrap();
        assert!((number(share.effective_usage.as_ref()) - 0.25).abs() < f64::EPSILON);
        assert!((number(share.usage_normalized.as_ref()) - 0.5).abs() < f64::EPSILON);
        assert_eq!(share.shares_normalized.and_then(|n| n.value()), None);
    }

    #[test]
    fn release_parts_accept_strings_and_integers() {
        let doc: MetaDocument = serde_json::from_str(
            r#"{"meta": {"slurm": {"version": {"major": "24", "minor": 5, "micro": "3"}}}}"#,
        )
        .unwrap();
        let version = doc.meta.and_then(|m| m.slurm).and_then(|s| s.version).unwrap();
        assert_eq!(version.major.unwrap().to_string(), "24");
        assert_eq!(version.minor.unwrap().to_string(), "5");
    }

    #[test]
    fn empty_document_defaults() {
        let env: Envelope = take_document(b"").unwrap();
        assert!(env.errors.is_none());
    }
}
