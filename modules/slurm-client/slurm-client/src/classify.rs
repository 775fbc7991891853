//! Turns a wire response into a success reply or a typed [`SlurmError`].
//!
//! A response fails when its status is outside 2xx or when the body carries a
//! non-empty `errors` list, whichever comes first. A recognised Slurm error
//! name decides the code; otherwise the HTTP status does, and an HTTP 200 with
//! errors is `SERVER_INTERNAL`.

use bytes::Bytes;
use slurm_client_sdk::{ApiErrorDetail, ApiFailure, ErrorCode, Origin, SlurmError};
use tracing::warn;

use crate::transport::WireResponse;
use crate::wire::common::{Envelope, OpenapiError, take_document};

/// A successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Bytes,
    pub warnings: Vec<String>,
}

/// # Errors
/// Returns the [`SlurmError`] variant matching the failure.
pub fn classify(origin: Origin, response: WireResponse) -> Result<Reply, SlurmError> {
    // Non-JSON bodies (proxy error pages) carry no envelope.
    let envelope: Envelope = take_document(&response.body).unwrap_or_default();
    let details: Vec<ApiErrorDetail> = envelope
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(detail)
        .collect();
    let warnings = envelope
        .warnings
        .unwrap_or_default()
        .into_iter()
        .filter_map(|w| w.description)
        .filter(|d| !d.is_empty())
        .collect();

    if response.is_success() && details.is_empty() {
        return Ok(Reply {
            status: response.status,
            body: response.body,
            warnings,
        });
    }

    let code = details
        .iter()
        .find_map(|d| ErrorCode::from_slurm_error(&d.error))
        .unwrap_or(if response.is_success() {
            ErrorCode::ServerInternal
        } else {
            ErrorCode::from_status(response.status)
        });
    let message = details
        .first()
        .map_or_else(|| status_message(response.status), ToString::to_string);
    warn!(
        version = %origin.version,
        operation = %origin.operation,
        status = response.status,
        code = %code,
        "slurm request failed: {message}"
    );

    let failure = ApiFailure {
        status: response.status,
        code,
        message,
        details,
    };
    Err(match code {
        ErrorCode::ResourceNotFound | ErrorCode::PartitionUnavailable => SlurmError::NotFound {
            origin,
            message: failure.message,
        },
        ErrorCode::InvalidCredentials
        | ErrorCode::TokenExpired
        | ErrorCode::PermissionDenied
        | ErrorCode::Unauthorized => SlurmError::Unauthorized { origin, failure },
        ErrorCode::Conflict => SlurmError::Conflict { origin, failure },
        ErrorCode::ResourceExhausted | ErrorCode::JobQueueFull | ErrorCode::RateLimited => {
            SlurmError::ResourceExhausted { origin, failure }
        }
        ErrorCode::InvalidRequest | ErrorCode::ValidationFailed => SlurmError::Validation {
            origin,
            code,
            field: None,
            message: failure.message,
        },
        ErrorCode::UnsupportedOperation => SlurmError::Unsupported { origin },
        _ => SlurmError::Server { origin, failure },
    })
}

fn detail(e: OpenapiError) -> ApiErrorDetail {
    ApiErrorDetail {
        error_number: e.error_number.unwrap_or_default(),
        error: e.error.unwrap_or_default(),
        description: e.description.unwrap_or_default(),
        source: e.source.unwrap_or_default(),
    }
}

fn status_message(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_owned)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;
    use slurm_client_sdk::{ApiVersion, EntityKind, ErrorCategory, Operation, Verb};

    use super::*;

    fn origin() -> Origin {
        Origin::new(
            ApiVersion::V0_0_42,
            Operation::new(EntityKind::Job, Verb::Get),
        )
    }

    fn failing(status: u16, errors: serde_json::Value) -> SlurmError {
        classify(origin(), WireResponse::json(status, &json!({ "errors": errors }))).unwrap_err()
    }

    #[test]
    fn success_keeps_body_and_warnings() {
        let body = json!({"jobs": [], "warnings": [{"description": "deprecated field"}]});
        let reply = classify(origin(), WireResponse::json(200, &body)).unwrap();
        assert_eq!(reply.warnings, vec!["deprecated field".to_owned()]);
        assert_eq!(reply.status, 200);
    }

    #[test]
    fn ok_status_with_errors_fails() {
        let err = failing(200, json!([{"error": "Unknown", "description": "boom"}]));
        assert_eq!(err.code(), ErrorCode::ServerInternal);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn slurm_error_name_wins_over_status() {
        let err = failing(500, json!([{"error": "ESLURM_INVALID_JOB_ID", "error_number": 2017}]));
        assert!(err.is_not_found());

        let err = failing(400, json!([{"error": "ESLURM_NODES_BUSY"}]));
        assert!(matches!(err, SlurmError::ResourceExhausted { .. }));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn status_decides_without_known_name() {
        let err = failing(503, json!([]));
        assert_eq!(err.code(), ErrorCode::SlurmDaemonDown);
        assert!(err.is_retryable());

        let err = failing(400, json!([{"error": "SOMETHING_NEW", "description": "bad field"}]));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());

        let err = failing(401, json!([]));
        assert!(matches!(err, SlurmError::Unauthorized { .. }));
    }

    #[test]
    fn non_json_error_page_uses_reason_phrase() {
        let response = WireResponse {
            status: 502,
            body: Bytes::from_static(b"<html>bad gateway</html>"),
        };
        let err = classify(origin(), response).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SlurmDaemonDown);
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn empty_success_body_is_fine() {
        let response = WireResponse {
            status: 204,
            body: Bytes::new(),
        };
        assert!(classify(origin(), response).is_ok());
    }
}
