#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Slurm REST client
//!
//! Version adapters for `slurmrestd` revisions v0.0.40 through v0.0.44
//! behind the version-agnostic managers of [`slurm_client_sdk`].
//!
//! - [`SlurmClient`] - entry point; one adapter per entity for the selected revision
//! - [`transport`] - the [`WireClient`] boundary and its hyper implementation
//! - [`versions`] - capability tables and generated wire conversions
//! - [`validation`] - input rules checked before any wire call
//! - [`watch`] - polling job and node watchers
//!
//! ## Usage
//!
//! ```ignore
//! let config = SlurmClientConfig::load(Some(Path::new("slurm.yaml")))?;
//! let client = SlurmClient::from_config(&config)?;
//! let ctx = RequestContext::new().with_timeout(Duration::from_secs(10));
//! let pings = client.info().ping(&ctx).await?;
//! ```

pub mod adapter;
pub mod classify;
pub mod client;
pub mod config;
pub mod convert;
pub mod noval;
pub mod transport;
pub mod validation;
pub mod versions;
pub mod watch;
pub mod wire;

pub use client::SlurmClient;
pub use config::{ConfigError, SlurmClientConfig};
pub use transport::{Auth, HttpWireClient, WireClient, WireRequest, WireResponse};
pub use versions::HttpMethod;
pub use watch::WatchConfig;

pub use slurm_client_sdk as sdk;
