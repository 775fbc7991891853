//! The wire boundary: one request in, one status and body out.
//!
//! Adapters only ever talk to a [`WireClient`]. [`HttpWireClient`] is the
//! production implementation over hyper; tests substitute in-memory fakes.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slurm_client_sdk::{TransportError, TransportErrorKind};

use crate::versions::HttpMethod;

pub const USER_NAME_HEADER: &str = "X-SLURM-USER-NAME";
pub const USER_TOKEN_HEADER: &str = "X-SLURM-USER-TOKEN";

#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: HttpMethod,
    /// Absolute path, e.g. `/slurm/v0.0.42/jobs/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: Bytes,
}

impl WireResponse {
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: Bytes::from(body.to_string()),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[async_trait]
pub trait WireClient: Send + Sync {
    /// Perform exactly one exchange with `slurmrestd`.
    ///
    /// Any HTTP status is a successful exchange; only failing to obtain a
    /// response is an error.
    ///
    /// # Errors
    /// Returns a [`TransportError`] when no response could be obtained.
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

/// Credentials attached to every request.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Auth {
    #[default]
    None,
    /// JWT issued by `scontrol token`.
    Token {
        user: String,
        #[serde(skip_serializing, deserialize_with = "secret")]
        token: SecretString,
    },
    Basic {
        user: String,
        #[serde(skip_serializing, deserialize_with = "secret")]
        password: SecretString,
    },
}

fn secret<'de, D: serde::Deserializer<'de>>(de: D) -> Result<SecretString, D::Error> {
    String::deserialize(de).map(SecretString::from)
}

impl Auth {
    #[must_use]
    pub fn token(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Token {
            user: user.into(),
            token: SecretString::from(token.into()),
        }
    }

    #[must_use]
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            user: user.into(),
            password: SecretString::from(password.into()),
        }
    }

    fn headers(&self) -> Result<Vec<(&'static str, HeaderValue)>, TransportError> {
        let value = |v: &str| {
            let mut header = HeaderValue::from_str(v).map_err(|e| {
                TransportError::with_source(
                    TransportErrorKind::Other,
                    "credentials are not a valid header value",
                    e,
                )
            })?;
            header.set_sensitive(true);
            Ok::<_, TransportError>(header)
        };
        match self {
            Self::None => Ok(Vec::new()),
            Self::Token { user, token } => Ok(vec![
                (USER_NAME_HEADER, value(user)?),
                (USER_TOKEN_HEADER, value(token.expose_secret())?),
            ]),
            Self::Basic { user, password } => {
                let encoded = STANDARD.encode(format!("{user}:{}", password.expose_secret()));
                Ok(vec![(AUTHORIZATION.as_str(), value(&format!("Basic {encoded}"))?)])
            }
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Token { user, .. } => f
                .debug_struct("Token")
                .field("user", user)
                .finish_non_exhaustive(),
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .finish_non_exhaustive(),
        }
    }
}

type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// [`WireClient`] over a pooled hyper client with rustls.
#[derive(Clone)]
pub struct HttpWireClient {
    client: HyperClient,
    base_url: String,
    auth: Auth,
    timeout: Duration,
    user_agent: HeaderValue,
}

impl fmt::Debug for HttpWireClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpWireClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpWireClient {
    /// # Errors
    /// Returns a TLS error if no crypto provider is available, or `Other` if
    /// the base URL or user agent is malformed.
    pub fn new(
        base_url: &str,
        auth: Auth,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        base_url.parse::<http::Uri>().map_err(|e| {
            TransportError::with_source(
                TransportErrorKind::Other,
                format!("invalid base URL '{base_url}'"),
                e,
            )
        })?;
        let user_agent = HeaderValue::from_str(user_agent).map_err(|e| {
            TransportError::with_source(TransportErrorKind::Other, "invalid user agent", e)
        })?;

        let provider = rustls::crypto::CryptoProvider::get_default()
            .cloned()
            .unwrap_or_else(|| std::sync::Arc::new(rustls::crypto::aws_lc_rs::default_provider()));
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(provider)
            .map_err(|e| {
                TransportError::with_source(TransportErrorKind::Tls, "TLS setup failed", e)
            })?
            .https_or_http()
            .enable_all_versions()
            .build();

        let mut builder = Client::builder(TokioExecutor::new());
        builder.pool_timer(TokioTimer::new());
        let client = builder.build::<_, Full<Bytes>>(https);

        Ok(Self {
            client,
            base_url,
            auth,
            timeout,
            user_agent,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn uri(&self, request: &WireRequest) -> Result<String, TransportError> {
        let mut uri = format!("{}{}", self.base_url, request.path);
        if !request.query.is_empty() {
            let query = serde_urlencoded::to_string(&request.query).map_err(|e| {
                TransportError::with_source(TransportErrorKind::Other, "invalid query", e)
            })?;
            uri.push('?');
            uri.push_str(&query);
        }
        Ok(uri)
    }

    async fn exchange(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(self.uri(&request)?)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent.clone());
        for (name, value) in self.auth.headers()? {
            builder = builder.header(name, value);
        }
        let body = match &request.body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Bytes::from(json.to_string())
            }
            None => Bytes::new(),
        };
        let http_request = builder.body(Full::new(body)).map_err(|e| {
            TransportError::with_source(TransportErrorKind::Other, "invalid request", e)
        })?;

        let response = self
            .client
            .request(http_request)
            .await
            .map_err(classify_client_error)?;
        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| {
                TransportError::with_source(
                    TransportErrorKind::Other,
                    "failed to read response body",
                    e,
                )
            })?
            .to_bytes();
        Ok(WireResponse { status, body })
    }
}

#[async_trait]
impl WireClient for HttpWireClient {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let timeout = self.timeout;
        tokio::time::timeout(timeout, self.exchange(request))
            .await
            .map_err(|_| {
                TransportError::new(
                    TransportErrorKind::Timeout,
                    format!("request timed out after {}", humantime::format_duration(timeout)),
                )
            })?
    }
}

fn classify_client_error(err: hyper_util::client::legacy::Error) -> TransportError {
    let mut kind = if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };
    let mut cause: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(e) = cause {
        if e.is::<rustls::Error>() {
            kind = TransportErrorKind::Tls;
            break;
        }
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                kind = TransportErrorKind::Timeout;
                break;
            }
            let text = io.to_string();
            if text.contains("dns error") || text.contains("failed to lookup address") {
                kind = TransportErrorKind::Dns;
                break;
            }
        }
        cause = e.source();
    }
    TransportError::with_source(kind, err.to_string(), err)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn token_auth_sets_slurm_headers() {
        let headers = Auth::token("alice", "jwt-123").headers().unwrap();
        assert_eq!(headers[0].0, USER_NAME_HEADER);
        assert_eq!(headers[0].1, "alice");
        assert_eq!(headers[1].0, USER_TOKEN_HEADER);
        assert!(headers[1].1.is_sensitive());
    }

    #[test]
    fn basic_auth_is_base64() {
        let headers = Auth::basic("bob", "secret").headers().unwrap();
        assert_eq!(headers[0].0, "authorization");
        assert_eq!(headers[0].1, "Basic Ym9iOnNlY3JldA==");
    }

    #[test]
    fn debug_hides_secrets() {
        let shown = format!("{:?}", Auth::token("alice", "jwt-123"));
        assert!(shown.contains("alice"));
        assert!(!shown.contains("jwt-123"));
    }

    #[test]
    fn auth_deserializes_from_tagged_config() {
        let auth: Auth =
            serde_json::from_str(r#"{"kind":"token","user":"alice","token":"t0k"}"#).unwrap();
        match auth {
            Auth::Token { user, token } => {
                assert_eq!(user, "alice");
                assert_eq!(token.expose_secret(), "t0k");
            }
            other => panic!("unexpected auth {other:?}"),
        }
    }

    #[tokio::test]
    async fn uri_joins_base_path_and_query() {
        let client =
            HttpWireClient::new("http://slurm:6820/", Auth::None, Duration::from_secs(1), "t")
                .unwrap();
        let uri = client
            .uri(&WireRequest {
                method: HttpMethod::Delete,
                path: "/slurm/v0.0.42/job/7".to_owned(),
                query: vec![("signal".to_owned(), "SIGUSR1".to_owned())],
                body: None,
            })
            .unwrap();
        assert_eq!(uri, "http://slurm:6820/slurm/v0.0.42/job/7?signal=SIGUSR1");
    }
}
