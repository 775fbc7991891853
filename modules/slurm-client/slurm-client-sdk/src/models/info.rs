use serde::{Deserialize, Serialize};

use crate::version::ApiVersion;

/// Reachability of one controller as reported by `slurmrestd`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    pub hostname: String,
    /// `UP` or `DOWN`
    pub pinged: String,
    pub latency_us: i64,
    /// `primary` or `backup`
    pub mode: String,
}

impl PingResult {
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.pinged.eq_ignore_ascii_case("UP")
    }
}

/// Identity of the controller behind the REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    /// Slurm release as `major.minor.micro`.
    pub version: String,
    pub release: String,
    pub cluster_name: String,
    pub api_version: ApiVersion,
}

/// Job counters from the scheduler diagnostics plus node and CPU totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub total_nodes: u32,
    pub idle_nodes: u32,
    pub allocated_nodes: u32,
    pub total_cpus: u32,
    pub idle_cpus: u32,
    pub allocated_cpus: u32,
    pub total_jobs: u32,
    pub running_jobs: u32,
    pub pending_jobs: u32,
    pub completed_jobs: u32,
}

/// The REST revision in use and the Slurm release serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiVersionInfo {
    pub version: ApiVersion,
    /// Slurm release string; empty when the server did not report one.
    pub release: String,
    pub description: String,
    pub deprecated: bool,
}

impl ApiVersionInfo {
    /// Whether the reported release is an alpha, beta, release candidate or
    /// development build.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        let release = self.release.to_ascii_lowercase();
        ["alpha", "beta", "rc", "dev"]
            .iter()
            .any(|tag| release.contains(tag))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn prerelease_tags_are_detected() {
        let info = |release: &str| ApiVersionInfo {
            version: ApiVersion::V0_0_43,
            release: release.to_owned(),
            description: String::new(),
            deprecated: false,
        };
        assert!(info("25.05.0-rc1").is_prerelease());
        assert!(info("24.11.0-0dev").is_prerelease());
        assert!(!info("24.05.3").is_prerelease());
    }
}
