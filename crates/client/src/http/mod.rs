//! HTTP transport used by the remote loader.
//!
//! The loader only needs "POST this JSON, give me status and body", so the
//! transport sits behind the [`HttpClient`] trait and tests substitute a stub.
//! A non-2xx status is a successful exchange at this layer; interpreting it
//! is the loader's job.

pub mod error;

pub use error::HttpError;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header;
use std::time::{Duration, Instant};
use url::Url;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "kjv-search/0.1";

/// Status and body of a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Minimal HTTP capability the remote loader depends on.
///
/// Implementations may complete on any thread.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON to `url`.
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<HttpResponse, HttpError>;
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bearer token sent as `Authorization: Bearer <token>`, if any.
    pub bearer_token: Option<String>,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: kjv-search/0.x).
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { bearer_token: None, timeout: DEFAULT_TIMEOUT, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// reqwest-backed [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl ReqwestHttpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn post_request(&self, url: &Url, body: &serde_json::Value) -> reqwest::RequestBuilder {
        let request = self
            .http
            .post(url.as_str())
            .header(header::ACCEPT, "application/json")
            .json(body);
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<HttpResponse, HttpError> {
        let start = Instant::now();

        let response = self.post_request(url, body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!("POST {} -> {} in {:?} ({} bytes)", url, status, start.elapsed(), body.len());

        Ok(HttpResponse { status, body })
    }
}
