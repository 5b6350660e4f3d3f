//! Authenticated GitLab HTTP client.
//!
//! All verbs funnel through [`GitLabClient::request`], which attaches the
//! credential header, fails with [`GitLabError::Api`] on non-success statuses
//! and parses successful bodies as JSON. There is no retry and no caching.

use std::fmt;
use std::future::Future;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::error::{GitLabError, GitLabResult};

const PRIVATE_TOKEN: HeaderName = HeaderName::from_static("private-token");

/// Connection settings for one client instance.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://gitlab.com/api/v4`
    pub api_base: String,
    /// Personal, project or group access token
    pub token: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field("token", &"[redacted]")
            .finish()
    }
}

/// Operations tool handlers need from a GitLab client.
///
/// Endpoints are relative to the API base and already carry their query
/// string. Implemented by [`GitLabClient`]; tests provide a recording double.
pub trait GitLabApi: Send + Sync {
    fn get<T>(&self, endpoint: &str) -> impl Future<Output = GitLabResult<T>> + Send
    where
        T: DeserializeOwned + Send;

    fn post<B, T>(&self, endpoint: &str, body: &B) -> impl Future<Output = GitLabResult<T>> + Send
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send;

    fn put<B, T>(&self, endpoint: &str, body: &B) -> impl Future<Output = GitLabResult<T>> + Send
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send;
}

/// HTTP client bound to one GitLab instance and token.
///
/// Immutable after construction and safe to share between concurrent tool
/// invocations.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    config: ClientConfig,
    headers: HeaderMap,
    http: Client,
}

impl GitLabClient {
    /// Create a new client from its configuration.
    pub fn new(config: ClientConfig) -> GitLabResult<Self> {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut token =
            HeaderValue::from_str(&config.token).map_err(|_| GitLabError::InvalidToken)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(PRIVATE_TOKEN, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Server certificates are checked against the OS trust store by
        // reqwest's default rustls verifier.
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|source| GitLabError::ClientBuild { source })?;

        Ok(Self {
            config,
            headers,
            http,
        })
    }

    /// Get the API base URL being used
    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    /// Issue one authenticated request and decode the JSON response.
    ///
    /// `extra_headers` are merged over the defaults: they may replace a
    /// default value but the credential header is always sent.
    #[instrument(skip(self, body, extra_headers))]
    pub async fn request<T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
        extra_headers: HeaderMap,
    ) -> GitLabResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base, endpoint);

        let mut headers = self.headers.clone();
        headers.extend(extra_headers);

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| GitLabError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "GitLab API request failed");
            return Err(GitLabError::Api {
                status: status.as_u16(),
                body,
                endpoint: endpoint.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| GitLabError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "GitLab API request succeeded");

        serde_json::from_slice(&bytes).map_err(|source| GitLabError::InvalidResponse {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn encode_body<B>(endpoint: &str, body: &B) -> GitLabResult<Vec<u8>>
where
    B: Serialize + ?Sized,
{
    serde_json::to_vec(body).map_err(|source| GitLabError::Serialize {
        endpoint: endpoint.to_string(),
        source,
    })
}

impl GitLabApi for GitLabClient {
    fn get<T>(&self, endpoint: &str) -> impl Future<Output = GitLabResult<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        self.request(Method::GET, endpoint, None, HeaderMap::new())
    }

    fn post<B, T>(&self, endpoint: &str, body: &B) -> impl Future<Output = GitLabResult<T>> + Send
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let payload = encode_body(endpoint, body);
        async move {
            self.request(Method::POST, endpoint, Some(payload?), HeaderMap::new())
                .await
        }
    }

    fn put<B, T>(&self, endpoint: &str, body: &B) -> impl Future<Output = GitLabResult<T>> + Send
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let payload = encode_body(endpoint, body);
        async move {
            self.request(Method::PUT, endpoint, Some(payload?), HeaderMap::new())
                .await
        }
    }
}
