use std::time::Duration;

use crate::error::WxPayError;

const DEFAULT_BASE_URL: &str = "https://api.mch.weixin.qq.com";

pub struct ClientConfig {
    pub base_url: String,
    pub http_client: Option<reqwest::Client>,
    pub timeout: Option<Duration>,
    /// Check the `sign` field of successful responses against the request key.
    pub verify_response_sign: bool,
}

pub struct ClientConfigBuilder {
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    verify_response_sign: bool,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            base_url: None,
            http_client: None,
            timeout: None,
            verify_response_sign: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: None,
            timeout: None,
            verify_response_sign: false,
        }
    }
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a preconfigured HTTP client (custom TLS, proxies, pooling).
    ///
    /// When set, `timeout` is ignored; configure it on the client instead.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn verify_response_sign(mut self, verify: bool) -> Self {
        self.verify_response_sign = verify;
        self
    }

    pub fn build(self) -> Result<ClientConfig, WxPayError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(WxPayError::Config(format!(
                "base_url must be an http(s) URL, got {base_url:?}"
            )));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(WxPayError::Config("timeout must be non-zero".into()));
        }

        Ok(ClientConfig {
            base_url,
            http_client: self.http_client,
            timeout: self.timeout,
            verify_response_sign: self.verify_response_sign,
        })
    }
}
