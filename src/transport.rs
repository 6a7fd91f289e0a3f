use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{BoxError, WxPayError};

const USER_AGENT: &str = concat!("wxpay-refund/", env!("CARGO_PKG_VERSION"));

/// Sends a signed XML body and returns the raw response bytes.
///
/// Any error is surfaced to the caller as [`WxPayError::Transport`].
/// Implementations must not retry. Deadlines belong here, not in the caller
/// of `send`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, body: String) -> Result<Bytes, BoxError>;
}

/// [`Transport`] over a `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Use `config.http_client` as-is, or build one honoring `config.timeout`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, WxPayError> {
        if let Some(http) = &config.http_client {
            return Ok(Self::new(http.clone()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| WxPayError::Config(format!("build HTTP client: {e}")))?;
        Ok(Self::new(http))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, url: &str, body: String) -> Result<Bytes, BoxError> {
        let resp = self
            .http
            .post(url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("User-Agent", USER_AGENT)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            debug!(%status, "gateway returned non-success HTTP status");
            return Err(format!("unexpected HTTP status {status}: {body}").into());
        }

        Ok(resp.bytes().await?)
    }
}
