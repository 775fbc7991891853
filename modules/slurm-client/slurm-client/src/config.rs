//! Client configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional YAML file,
//! then `SLURM_*` environment variables with `__` separating nested keys
//! (`SLURM_RETRY__MAX_RETRIES=5`).

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use slurm_client_sdk::{ApiVersion, TransportError, VersionParseError};
use slurm_retry::RetryPolicy;
use thiserror::Error;

use crate::transport::Auth;
use crate::watch::WatchConfig;

pub const ENV_PREFIX: &str = "SLURM_";

/// Top-level keys read from the environment. Slurm exports many unrelated
/// `SLURM_*` variables inside jobs; only these are considered.
const ENV_KEYS: &[&str] = &[
    "base_url",
    "version",
    "timeout",
    "auth",
    "retry",
    "watch",
    "user_agent",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error(transparent)]
    Version(#[from] VersionParseError),

    #[error("cannot build HTTP client: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlurmClientConfig {
    /// `slurmrestd` root, e.g. `https://slurm.example.org:6820`.
    pub base_url: String,
    /// `latest`, `stable`, or an explicit revision such as `v0.0.42`.
    pub version: String,
    /// Per-request timeout.
    #[serde(with = "slurm_retry::humantime_serde")]
    pub timeout: Duration,
    pub auth: Auth,
    pub retry: RetryPolicy,
    pub watch: WatchConfig,
    pub user_agent: String,
}

impl Default for SlurmClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6820".to_owned(),
            version: "stable".to_owned(),
            timeout: Duration::from_secs(30),
            auth: Auth::None,
            retry: RetryPolicy::default(),
            watch: WatchConfig::default(),
            user_agent: concat!("cf-slurm-client/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl SlurmClientConfig {
    /// Defaults, then `file` when given, then the environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a layer cannot be read or the merged
    /// result does not match the schema.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Yaml::file_exact(path));
        }
        let env = Env::prefixed(ENV_PREFIX)
            .filter(|key| {
                let top = key.as_str().split("__").next().unwrap_or_default();
                ENV_KEYS.iter().any(|known| top.eq_ignore_ascii_case(known))
            })
            .split("__");
        Self::from_figment(&figment.merge(env))
    }

    /// # Errors
    /// Returns [`ConfigError::Load`] when the figment does not match the schema.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// The revision the `version` selector names.
    ///
    /// # Errors
    /// Returns [`ConfigError::Version`] for an unknown selector.
    pub fn api_version(&self) -> Result<ApiVersion, ConfigError> {
        Ok(ApiVersion::select(&self.version)?)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    fn yaml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_select_stable() {
        let config = SlurmClientConfig::default();
        assert_eq!(config.api_version().unwrap(), ApiVersion::stable());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.watch, WatchConfig::default());
        assert!(config.user_agent.starts_with("cf-slurm-client/"));
    }

    #[test]
    fn yaml_overrides_defaults() {
        let file = yaml(
            "base_url: https://slurm.example.org:6820\n\
             version: v0.0.44\n\
             timeout: 5s\n\
             auth:\n  kind: token\n  user: alice\n  token: jwt\n\
             retry:\n  max_retries: 1\n\
             watch:\n  poll_interval: 250ms\n",
        );
        temp_env::with_vars_unset(["SLURM_VERSION", "SLURM_TIMEOUT"], || {
            let config = SlurmClientConfig::load(Some(file.path())).unwrap();
            assert_eq!(config.base_url, "https://slurm.example.org:6820");
            assert_eq!(config.api_version().unwrap(), ApiVersion::V0_0_44);
            assert_eq!(config.timeout, Duration::from_secs(5));
            assert_eq!(config.retry.max_retries, 1);
            assert_eq!(config.watch.poll_interval, Duration::from_millis(250));
            assert_eq!(config.watch.buffer, 100);
            match config.auth {
                Auth::Token { user, token } => {
                    assert_eq!(user, "alice");
                    assert_eq!(token.expose_secret(), "jwt");
                }
                other => panic!("unexpected auth {other:?}"),
            }
        });
    }

    #[test]
    fn env_overrides_yaml_and_ignores_job_variables() {
        let file = yaml("version: v0.0.41\n");
        temp_env::with_vars(
            [
                ("SLURM_VERSION", Some("latest")),
                ("SLURM_RETRY__MAX_RETRIES", Some("7")),
                ("SLURM_JOB_ID", Some("1234")),
                ("SLURM_CLUSTER_NAME", Some("hpc")),
            ],
            || {
                let config = SlurmClientConfig::load(Some(file.path())).unwrap();
                assert_eq!(config.api_version().unwrap(), ApiVersion::latest());
                assert_eq!(config.retry.max_retries, 7);
            },
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml("base_uri: http://typo\n");
        let err = SlurmClientConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = SlurmClientConfig::load(Some(Path::new("/nonexistent/slurm.yaml"))).unwrap_err();
        assert!(err.to_string().starts_with("invalid client configuration"));
    }

    #[test]
    fn unknown_version_selector() {
        let config = SlurmClientConfig {
            version: "v0.0.39".to_owned(),
            ..SlurmClientConfig::default()
        };
        assert!(matches!(config.api_version(), Err(ConfigError::Version(_))));
    }
}
