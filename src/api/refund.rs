use tracing::debug;

use crate::client::WxPayClient;
use crate::error::WxPayError;
use crate::model::refund::{RefundQuery, RefundQueryResponse};

const REFUND_QUERY_PATH: &str = "/pay/refundquery";

impl WxPayClient {
    /// Query a refund by `out_refund_no` or `refund_id`.
    ///
    /// POST /pay/refundquery
    ///
    /// `key` is the merchant API key used for signing. A single request is
    /// made; nothing is retried.
    pub async fn query_refund(
        &self,
        query: &RefundQuery,
        key: &str,
    ) -> Result<RefundQueryResponse, WxPayError> {
        let req = query.prepare(key)?;
        let raw = self.post_xml(REFUND_QUERY_PATH, req.to_xml()?).await?;

        // The gateway only signs responses it could process.
        if self.config.verify_response_sign && raw.envelope().return_ok() {
            raw.verify_sign(key, req.sign_type())?;
        }

        let resp = RefundQueryResponse::from_raw(&raw)?;
        debug!(
            refund_id = %resp.refund_id,
            refund_status = %resp.refund_status,
            "refund query succeeded"
        );
        Ok(resp)
    }
}
