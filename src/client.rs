use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::WxPayError;
use crate::response::RawResponse;
use crate::transport::{HttpTransport, Transport};

/// WeChat Pay v2 client.
///
/// Holds no key material and no mutable state; signing keys are passed per
/// call, so one client can serve several merchants concurrently.
pub struct WxPayClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<dyn Transport>,
}

impl WxPayClient {
    /// Create a client sending over HTTP.
    pub fn new(config: ClientConfig) -> Result<Self, WxPayError> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST an XML body and decode the XML response.
    ///
    /// Envelope status is not checked here.
    pub(crate) async fn post_xml(&self, path: &str, body: String) -> Result<RawResponse, WxPayError> {
        let url = format!("{}{path}", self.config.base_url);
        debug!(path, "sending signed request");

        let bytes = self
            .transport
            .send(&url, body)
            .await
            .map_err(WxPayError::Transport)?;
        debug!(path, len = bytes.len(), "received response");

        RawResponse::from_xml(&bytes)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::error::BoxError;

    pub(crate) enum Reply {
        Body(String),
        Fail(&'static str),
        /// Fails with a crate error that is not a transport error.
        FailWith(fn() -> WxPayError),
    }

    /// Records every request and answers with a fixed reply.
    pub(crate) struct MockTransport {
        reply: Reply,
        pub(crate) requests: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl MockTransport {
        pub(crate) fn new(reply: Reply) -> Self {
            Self {
                reply,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(crate) fn body(body: impl Into<String>) -> Self {
            Self::new(Reply::Body(body.into()))
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, url: &str, body: String) -> Result<Bytes, BoxError> {
            self.requests.lock().unwrap().push((url.to_string(), body));
            match &self.reply {
                Reply::Body(b) => Ok(Bytes::from(b.clone())),
                Reply::Fail(msg) => Err((*msg).into()),
                Reply::FailWith(make) => Err(Box::new(make())),
            }
        }
    }

    /// Decode a request body sent by the client.
    pub(crate) fn request_fields(xml: &str) -> BTreeMap<String, String> {
        quick_xml::de::from_str(xml).unwrap()
    }

    fn client(transport: MockTransport) -> WxPayClient {
        let config = ClientConfig::builder()
            .base_url("https://gateway.test")
            .build()
            .unwrap();
        WxPayClient::with_transport(config, transport)
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WxPayClient>();
    }

    #[tokio::test]
    async fn test_post_xml_joins_url() {
        let transport = MockTransport::body("<xml><return_code>SUCCESS</return_code></xml>");
        let requests = Arc::clone(&transport.requests);
        let client = client(transport);

        let raw = client.post_xml("/pay/refundquery", "<xml/>".into()).await.unwrap();
        assert_eq!(raw.get("return_code"), Some("SUCCESS"));

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://gateway.test/pay/refundquery");
        assert_eq!(requests[0].1, "<xml/>");
    }

    #[tokio::test]
    async fn test_post_xml_transport_error() {
        let client = client(MockTransport::new(Reply::Fail("connection reset")));
        let result = client.post_xml("/pay/refundquery", "<xml/>".into()).await;
        assert!(matches!(result, Err(WxPayError::Transport(_))));
    }

    #[tokio::test]
    async fn test_post_xml_wraps_any_transport_error() {
        fn config_error() -> WxPayError {
            WxPayError::Config("tls handshake config".into())
        }
        fn business_error() -> WxPayError {
            WxPayError::BusinessFailure {
                err_code: Some("SYSTEMERROR".into()),
                err_code_des: None,
            }
        }

        for make in [config_error as fn() -> WxPayError, business_error] {
            let client = client(MockTransport::new(Reply::FailWith(make)));
            match client.post_xml("/pay/refundquery", "<xml/>".into()).await {
                Err(WxPayError::Transport(source)) => {
                    assert!(source.downcast_ref::<WxPayError>().is_some());
                }
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_post_xml_decode_error() {
        let client = client(MockTransport::body("<html>502 Bad Gateway</body>"));
        let result = client.post_xml("/pay/refundquery", "<xml/>".into()).await;
        assert!(matches!(result, Err(WxPayError::Decode(_))));
    }

    #[test]
    fn test_base_url() {
        let client = client(MockTransport::body(""));
        assert_eq!(client.base_url(), "https://gateway.test");
    }
}
