//! Error types for the Slurm client.
//!
//! Every failure raised through an adapter is a [`SlurmError`] that names the
//! API version and operation it came from, carries a stable [`ErrorCode`], and
//! knows whether a retry could help.

use std::fmt;

use serde::{Deserialize, Serialize};
use slurm_retry::{RetryTrigger, Retryable};
use thiserror::Error;

use crate::context::ContextState;
use crate::version::{ApiVersion, Operation};

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // Network
    NetworkTimeout,
    ConnectionRefused,
    DnsResolution,
    TlsHandshake,
    // Authentication
    InvalidCredentials,
    TokenExpired,
    PermissionDenied,
    Unauthorized,
    // Request / resource
    InvalidRequest,
    ValidationFailed,
    ResourceNotFound,
    Conflict,
    RateLimited,
    // Server
    ServerInternal,
    SlurmDaemonDown,
    ServiceUnavailable,
    ResourceExhausted,
    JobQueueFull,
    PartitionUnavailable,
    // Client
    ClientNotInitialized,
    InvalidConfiguration,
    VersionMismatch,
    UnsupportedOperation,
    // Context
    ContextCanceled,
    DeadlineExceeded,
    Unknown,
}

/// Coarse grouping of [`ErrorCode`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Network,
    Authentication,
    Validation,
    Resource,
    Server,
    Client,
    Context,
    Unknown,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkTimeout => "NETWORK_TIMEOUT",
            Self::ConnectionRefused => "CONNECTION_REFUSED",
            Self::DnsResolution => "DNS_RESOLUTION",
            Self::TlsHandshake => "TLS_HANDSHAKE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::RateLimited => "RATE_LIMITED",
            Self::ServerInternal => "SERVER_INTERNAL",
            Self::SlurmDaemonDown => "SLURM_DAEMON_DOWN",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::JobQueueFull => "JOB_QUEUE_FULL",
            Self::PartitionUnavailable => "PARTITION_UNAVAILABLE",
            Self::ClientNotInitialized => "CLIENT_NOT_INITIALIZED",
            Self::InvalidConfiguration => "INVALID_CONFIGURATION",
            Self::VersionMismatch => "VERSION_MISMATCH",
            Self::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            Self::ContextCanceled => "CONTEXT_CANCELED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::Unknown => "UNKNOWN",
        }
    }

    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::NetworkTimeout
            | Self::ConnectionRefused
            | Self::DnsResolution
            | Self::TlsHandshake => ErrorCategory::Network,
            Self::InvalidCredentials
            | Self::TokenExpired
            | Self::PermissionDenied
            | Self::Unauthorized => ErrorCategory::Authentication,
            Self::InvalidRequest | Self::ValidationFailed => ErrorCategory::Validation,
            Self::ResourceNotFound
            | Self::Conflict
            | Self::ResourceExhausted
            | Self::JobQueueFull
            | Self::PartitionUnavailable => ErrorCategory::Resource,
            Self::ServerInternal
            | Self::SlurmDaemonDown
            | Self::ServiceUnavailable
            | Self::RateLimited => ErrorCategory::Server,
            Self::ClientNotInitialized
            | Self::InvalidConfiguration
            | Self::VersionMismatch
            | Self::UnsupportedOperation => ErrorCategory::Client,
            Self::ContextCanceled | Self::DeadlineExceeded => ErrorCategory::Context,
            Self::Unknown => ErrorCategory::Unknown,
        }
    }

    /// Whether an identical request may succeed later.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::NetworkTimeout
                | Self::ConnectionRefused
                | Self::DnsResolution
                | Self::ServerInternal
                | Self::SlurmDaemonDown
                | Self::ServiceUnavailable
                | Self::ResourceExhausted
                | Self::RateLimited
        )
    }

    /// Code for a non-success HTTP status.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::PermissionDenied,
            404 => Self::ResourceNotFound,
            409 => Self::Conflict,
            422 => Self::ValidationFailed,
            429 => Self::RateLimited,
            500 => Self::ServerInternal,
            502..=504 => Self::SlurmDaemonDown,
            501 | 505..=599 => Self::ServiceUnavailable,
            400..=499 => Self::InvalidRequest,
            _ => Self::Unknown,
        }
    }

    /// Code for an error name embedded in a Slurm response body, if recognised.
    #[must_use]
    pub fn from_slurm_error(name: &str) -> Option<Self> {
        let code = match name.trim() {
            "ESLURM_INVALID_JOB_ID"
            | "SLURM_INVALID_JOB_ID"
            | "ESLURM_INVALID_NODE_NAME"
            | "SLURM_NO_CHANGE_IN_DATA" => Self::ResourceNotFound,
            "ESLURM_INVALID_PARTITION_NAME" | "SLURM_INVALID_PARTITION_NAME" => {
                Self::PartitionUnavailable
            }
            "ESLURM_ACCESS_DENIED" | "SLURM_ACCESS_DENIED" | "ESLURM_USER_ID_MISSING" => {
                Self::PermissionDenied
            }
            "SLURM_AUTHENTICATION_ERROR" => Self::InvalidCredentials,
            "ESLURM_ALREADY_DONE" | "ESLURM_JOB_FINISHED" | "SLURM_JOB_ALREADY_COMPLETE" => {
                Self::Conflict
            }
            "ESLURM_NODES_BUSY"
            | "ESLURM_NODE_NOT_AVAIL"
            | "SLURM_NODE_NOT_AVAIL"
            | "SLURM_JOB_PENDING" => Self::ResourceExhausted,
            "ESLURM_JOB_QUEUE_FULL" => Self::JobQueueFull,
            "ESLURM_NOT_SUPPORTED" => Self::UnsupportedOperation,
            "ESLURM_PROTOCOL_VERSION_ERROR" | "SLURM_PROTOCOL_VERSION_ERROR" => {
                Self::VersionMismatch
            }
            "SLURM_UNEXPECTED_MSG_ERROR" => Self::InvalidRequest,
            "SLURM_COMMUNICATIONS_CONNECTION_ERROR" => Self::ConnectionRefused,
            "SLURM_COMMUNICATIONS_SEND_ERROR" | "SLURM_COMMUNICATIONS_RECEIVE_ERROR" => {
                Self::NetworkTimeout
            }
            _ => return None,
        };
        Some(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version and operation an error was raised through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub version: ApiVersion,
    pub operation: Operation,
}

impl Origin {
    #[must_use]
    pub const fn new(version: ApiVersion, operation: Operation) -> Self {
        Self { version, operation }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.version, self.operation)
    }
}

/// Transport failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Dns,
    Tls,
    Other,
}

impl TransportErrorKind {
    #[must_use]
    pub const fn code(self) -> ErrorCode {
        match self {
            Self::Timeout => ErrorCode::NetworkTimeout,
            Self::Connect => ErrorCode::ConnectionRefused,
            Self::Dns => ErrorCode::DnsResolution,
            Self::Tls => ErrorCode::TlsHandshake,
            Self::Other => ErrorCode::Unknown,
        }
    }
}

/// Failure to exchange a request with `slurmrestd` at all.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(
        kind: TransportErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// One entry of the `errors` list embedded in a Slurm response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub error_number: i32,
    pub error: String,
    pub description: String,
    pub source: String,
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.description.is_empty(), self.error.is_empty()) {
            (false, _) => f.write_str(&self.description),
            (true, false) => f.write_str(&self.error),
            (true, true) => write!(f, "error {}", self.error_number),
        }
    }
}

/// A request that reached Slurm and was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
    pub details: Vec<ApiErrorDetail>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} [{}]: {}", self.status, self.code, self.message)
    }
}

/// Errors returned by every Slurm manager operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlurmError {
    /// Input rejected before any wire call, or by Slurm with 400/422.
    #[error("{origin}: validation failed: {message}")]
    Validation {
        origin: Origin,
        code: ErrorCode,
        field: Option<String>,
        message: String,
    },

    #[error("{origin}: not found: {message}")]
    NotFound { origin: Origin, message: String },

    #[error("{origin}: unauthorized: {failure}")]
    Unauthorized { origin: Origin, failure: ApiFailure },

    #[error("{origin}: conflict: {failure}")]
    Conflict { origin: Origin, failure: ApiFailure },

    #[error("{origin}: resource exhausted: {failure}")]
    ResourceExhausted { origin: Origin, failure: ApiFailure },

    #[error("{origin}: server error: {failure}")]
    Server { origin: Origin, failure: ApiFailure },

    /// The operation is not available in this API version.
    #[error("{origin}: operation not supported by this API version")]
    Unsupported { origin: Origin },

    #[error("{origin}: network error: {source}")]
    Network {
        origin: Origin,
        #[source]
        source: TransportError,
    },

    #[error("{origin}: request cancelled")]
    Cancelled { origin: Origin },

    #[error("{origin}: deadline exceeded")]
    DeadlineExceeded { origin: Origin },

    #[error("{origin}: client not initialized")]
    ClientNotInitialized { origin: Origin },

    /// The response body did not match the version's wire schema.
    #[error("{origin}: failed to decode response: {message}")]
    Decode { origin: Origin, message: String },
}

impl SlurmError {
    #[must_use]
    pub fn validation(origin: Origin, field: Option<&str>, message: impl Into<String>) -> Self {
        Self::Validation {
            origin,
            code: ErrorCode::ValidationFailed,
            field: field.map(str::to_owned),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn from_context(origin: Origin, state: ContextState) -> Self {
        match state {
            ContextState::Cancelled => Self::Cancelled { origin },
            ContextState::DeadlineExceeded => Self::DeadlineExceeded { origin },
        }
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        match self {
            Self::Validation { origin, .. }
            | Self::NotFound { origin, .. }
            | Self::Unauthorized { origin, .. }
            | Self::Conflict { origin, .. }
            | Self::ResourceExhausted { origin, .. }
            | Self::Server { origin, .. }
            | Self::Unsupported { origin }
            | Self::Network { origin, .. }
            | Self::Cancelled { origin }
            | Self::DeadlineExceeded { origin }
            | Self::ClientNotInitialized { origin }
            | Self::Decode { origin, .. } => *origin,
        }
    }

    #[must_use]
    pub fn version(&self) -> ApiVersion {
        self.origin().version
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.origin().operation
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::Unauthorized { failure, .. }
            | Self::Conflict { failure, .. }
            | Self::ResourceExhausted { failure, .. }
            | Self::Server { failure, .. } => failure.code,
            Self::Unsupported { .. } => ErrorCode::UnsupportedOperation,
            Self::Network { source, .. } => source.kind.code(),
            Self::Cancelled { .. } => ErrorCode::ContextCanceled,
            Self::DeadlineExceeded { .. } => ErrorCode::DeadlineExceeded,
            Self::ClientNotInitialized { .. } => ErrorCode::ClientNotInitialized,
            Self::Decode { .. } => ErrorCode::VersionMismatch,
        }
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }

    /// HTTP status, for errors that came back from Slurm.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { failure, .. }
            | Self::Conflict { failure, .. }
            | Self::ResourceExhausted { failure, .. }
            | Self::Server { failure, .. } => Some(failure.status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Retryable for SlurmError {
    fn retry_trigger(&self) -> RetryTrigger {
        if !self.is_retryable() {
            return RetryTrigger::NonRetryable;
        }
        match self {
            Self::Network { source, .. } if source.kind == TransportErrorKind::Timeout => {
                RetryTrigger::Timeout
            }
            Self::Network { .. } => RetryTrigger::TransportError,
            // A busy error embedded in a 4xx reply is still transient.
            _ => match self.status() {
                Some(status) if status == 429 || status >= 500 => RetryTrigger::Status(status),
                _ => RetryTrigger::Transient,
            },
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use slurm_retry::RetryPolicy;

    use super::*;
    use crate::version::{EntityKind, Verb};

    fn origin() -> Origin {
        Origin::new(ApiVersion::V0_0_42, Operation::new(EntityKind::Job, Verb::Get))
    }

    fn failure(status: u16) -> ApiFailure {
        ApiFailure {
            status,
            code: ErrorCode::from_status(status),
            message: "boom".to_owned(),
            details: Vec::new(),
        }
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::from_status(400), ErrorCode::InvalidRequest);
        assert_eq!(ErrorCode::from_status(401), ErrorCode::Unauthorized);
        assert_eq!(ErrorCode::from_status(403), ErrorCode::PermissionDenied);
        assert_eq!(ErrorCode::from_status(404), ErrorCode::ResourceNotFound);
        assert_eq!(ErrorCode::from_status(409), ErrorCode::Conflict);
        assert_eq!(ErrorCode::from_status(418), ErrorCode::InvalidRequest);
        assert_eq!(ErrorCode::from_status(422), ErrorCode::ValidationFailed);
        assert_eq!(ErrorCode::from_status(429), ErrorCode::RateLimited);
        assert_eq!(ErrorCode::from_status(500), ErrorCode::ServerInternal);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::SlurmDaemonDown);
        assert_eq!(ErrorCode::from_status(507), ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn retryability_follows_code() {
        let err = SlurmError::Server {
            origin: origin(),
            failure: failure(503),
        };
        assert!(err.is_retryable());
        assert_eq!(err.retry_trigger(), RetryTrigger::Status(503));
        assert_eq!(err.category(), ErrorCategory::Server);

        let err = SlurmError::validation(origin(), Some("script"), "script is required");
        assert!(!err.is_retryable());
        assert_eq!(err.retry_trigger(), RetryTrigger::NonRetryable);
    }

    #[test]
    fn embedded_busy_error_on_success_status_is_transient() {
        let err = SlurmError::ResourceExhausted {
            origin: origin(),
            failure: ApiFailure {
                status: 200,
                code: ErrorCode::ResourceExhausted,
                message: "nodes busy".to_owned(),
                details: Vec::new(),
            },
        };
        assert_eq!(err.retry_trigger(), RetryTrigger::Transient);
    }

    #[test]
    fn every_retryable_error_passes_the_default_policy() {
        let policy = RetryPolicy::default();
        for status in [501, 505, 507] {
            let err = SlurmError::Server {
                origin: origin(),
                failure: failure(status),
            };
            assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
            assert!(err.is_retryable());
            assert!(policy.should_retry(err.retry_trigger()), "status {status}");
        }

        let busy = SlurmError::ResourceExhausted {
            origin: origin(),
            failure: ApiFailure {
                status: 400,
                code: ErrorCode::ResourceExhausted,
                message: "ESLURM_NODES_BUSY".to_owned(),
                details: Vec::new(),
            },
        };
        assert_eq!(busy.retry_trigger(), RetryTrigger::Transient);
        assert!(policy.should_retry(busy.retry_trigger()));
    }

    #[test]
    fn network_timeout_maps_to_timeout_trigger() {
        let err = SlurmError::Network {
            origin: origin(),
            source: TransportError::new(TransportErrorKind::Timeout, "timed out"),
        };
        assert_eq!(err.code(), ErrorCode::NetworkTimeout);
        assert_eq!(err.retry_trigger(), RetryTrigger::Timeout);
    }

    #[test]
    fn display_names_version_and_operation() {
        let err = SlurmError::Unsupported { origin: origin() };
        assert_eq!(
            err.to_string(),
            "v0.0.42 job.get: operation not supported by this API version"
        );
        assert_eq!(err.version(), ApiVersion::V0_0_42);
    }

    #[test]
    fn slurm_error_names() {
        assert_eq!(
            ErrorCode::from_slurm_error("ESLURM_INVALID_JOB_ID"),
            Some(ErrorCode::ResourceNotFound)
        );
        assert_eq!(
            ErrorCode::from_slurm_error("ESLURM_NODES_BUSY"),
            Some(ErrorCode::ResourceExhausted)
        );
        assert_eq!(ErrorCode::from_slurm_error("Unspecified error"), None);
    }
}
