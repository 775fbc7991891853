//! API version identifiers and the operation vocabulary shared by every adapter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A supported Slurm REST API revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApiVersion {
    #[serde(rename = "v0.0.40")]
    V0_0_40,
    #[serde(rename = "v0.0.41")]
    V0_0_41,
    #[serde(rename = "v0.0.42")]
    V0_0_42,
    #[serde(rename = "v0.0.43")]
    V0_0_43,
    #[serde(rename = "v0.0.44")]
    V0_0_44,
}

impl ApiVersion {
    /// All supported versions, oldest first.
    pub const ALL: [Self; 5] = [
        Self::V0_0_40,
        Self::V0_0_41,
        Self::V0_0_42,
        Self::V0_0_43,
        Self::V0_0_44,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V0_0_40 => "v0.0.40",
            Self::V0_0_41 => "v0.0.41",
            Self::V0_0_42 => "v0.0.42",
            Self::V0_0_43 => "v0.0.43",
            Self::V0_0_44 => "v0.0.44",
        }
    }

    /// Newest supported revision.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V0_0_44
    }

    /// Revision recommended for production clusters.
    #[must_use]
    pub const fn stable() -> Self {
        Self::V0_0_42
    }

    /// Revisions newer Slurm releases no longer serve.
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(self, Self::V0_0_40)
    }

    /// Resolve a version selector: `latest`, `stable`, `v0.0.4x` or `0.0.4x`.
    ///
    /// # Errors
    /// Returns [`VersionParseError`] for unknown selectors.
    pub fn select(selector: &str) -> Result<Self, VersionParseError> {
        match selector.trim() {
            "latest" => Ok(Self::latest()),
            "stable" => Ok(Self::stable()),
            other => other.parse(),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown or malformed version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported Slurm API version: {0}")]
pub struct VersionParseError(pub String);

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        let normalized = normalized.strip_prefix('v').unwrap_or(normalized);
        Self::ALL
            .into_iter()
            .find(|v| &v.as_str()[1..] == normalized)
            .ok_or_else(|| VersionParseError(s.to_owned()))
    }
}

/// Resource families exposed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Job,
    Node,
    Partition,
    Account,
    User,
    Association,
    Qos,
    Reservation,
    Cluster,
    Wckey,
    Info,
    /// Cluster-wide reports and actions outside any entity.
    Standalone,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Node => "node",
            Self::Partition => "partition",
            Self::Account => "account",
            Self::User => "user",
            Self::Association => "association",
            Self::Qos => "qos",
            Self::Reservation => "reservation",
            Self::Cluster => "cluster",
            Self::Wckey => "wckey",
            Self::Info => "info",
            Self::Standalone => "standalone",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions an adapter can perform on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    List,
    Get,
    Create,
    Update,
    Delete,
    Submit,
    Cancel,
    Hold,
    Release,
    Signal,
    Notify,
    Requeue,
    Allocate,
    Watch,
    Drain,
    Resume,
    CreateAssociation,
    Ping,
    PingDatabase,
    Stats,
    Version,
    Licenses,
    Shares,
    Config,
    Diagnostics,
    DbDiagnostics,
    Tres,
    CreateTres,
    Reconfigure,
}

impl Verb {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
            Self::Hold => "hold",
            Self::Release => "release",
            Self::Signal => "signal",
            Self::Notify => "notify",
            Self::Requeue => "requeue",
            Self::Allocate => "allocate",
            Self::Watch => "watch",
            Self::Drain => "drain",
            Self::Resume => "resume",
            Self::CreateAssociation => "create_association",
            Self::Ping => "ping",
            Self::PingDatabase => "ping_database",
            Self::Stats => "stats",
            Self::Version => "version",
            Self::Licenses => "licenses",
            Self::Shares => "shares",
            Self::Config => "config",
            Self::Diagnostics => "diagnostics",
            Self::DbDiagnostics => "db_diagnostics",
            Self::Tres => "tres",
            Self::CreateTres => "create_tres",
            Self::Reconfigure => "reconfigure",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity/verb pair, rendered as `job.submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Operation {
    pub entity: EntityKind,
    pub verb: Verb,
}

impl Operation {
    #[must_use]
    pub const fn new(entity: EntityKind, verb: Verb) -> Self {
        Self { entity, verb }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.verb)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!("v0.0.43".parse::<ApiVersion>().unwrap(), ApiVersion::V0_0_43);
        assert_eq!("0.0.40".parse::<ApiVersion>().unwrap(), ApiVersion::V0_0_40);
        assert!("v0.0.39".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn selectors_resolve_aliases() {
        assert_eq!(ApiVersion::select("latest").unwrap(), ApiVersion::V0_0_44);
        assert_eq!(ApiVersion::select("stable").unwrap(), ApiVersion::V0_0_42);
        assert_eq!(ApiVersion::select(" v0.0.41 ").unwrap(), ApiVersion::V0_0_41);
        let err = ApiVersion::select("newest").unwrap_err();
        assert_eq!(err.to_string(), "unsupported Slurm API version: newest");
    }

    #[test]
    fn versions_are_ordered() {
        assert!(ApiVersion::V0_0_40 < ApiVersion::V0_0_44);
        assert_eq!(ApiVersion::ALL.last().copied(), Some(ApiVersion::latest()));
    }

    #[test]
    fn operation_display() {
        let op = Operation::new(EntityKind::Job, Verb::Submit);
        assert_eq!(op.to_string(), "job.submit");
        let op = Operation::new(EntityKind::User, Verb::CreateAssociation);
        assert_eq!(op.to_string(), "user.create_association");
        let op = Operation::new(EntityKind::Standalone, Verb::DbDiagnostics);
        assert_eq!(op.to_string(), "standalone.db_diagnostics");
    }

    #[test]
    fn only_the_oldest_revision_is_deprecated() {
        let deprecated: Vec<ApiVersion> =
            ApiVersion::ALL.into_iter().filter(|v| v.is_deprecated()).collect();
        assert_eq!(deprecated, vec![ApiVersion::V0_0_40]);
    }
}
