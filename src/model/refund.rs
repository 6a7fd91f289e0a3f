use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::crypto::sign::{sign, SignType};
use crate::error::WxPayError;
use crate::response::{parse_int, RawResponse};

/// Refund query condition.
///
/// Exactly one of `out_refund_no` / `refund_id` must be set. Querying by
/// `out_trade_no` or `transaction_id` is not offered: the gateway then returns
/// every refund of the order and record 0 is no longer the one asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefundQuery {
    pub app_id: String,
    pub mch_id: String,
    /// Defaults to MD5.
    pub sign_type: Option<SignType>,
    pub out_refund_no: Option<String>,
    pub refund_id: Option<String>,
}

impl RefundQuery {
    /// Query by merchant refund number.
    pub fn by_out_refund_no(
        app_id: impl Into<String>,
        mch_id: impl Into<String>,
        out_refund_no: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            mch_id: mch_id.into(),
            out_refund_no: Some(out_refund_no.into()),
            ..Default::default()
        }
    }

    /// Query by WeChat refund id.
    pub fn by_refund_id(
        app_id: impl Into<String>,
        mch_id: impl Into<String>,
        refund_id: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            mch_id: mch_id.into(),
            refund_id: Some(refund_id.into()),
            ..Default::default()
        }
    }

    pub fn with_sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = Some(sign_type);
        self
    }

    /// Validate the condition and build a signed request with a fresh nonce.
    pub fn prepare(&self, key: &str) -> Result<RefundQueryRequest, WxPayError> {
        self.prepare_with_nonce(key, generate_nonce())
    }

    /// Same as [`RefundQuery::prepare`] with a caller-supplied nonce.
    ///
    /// A nonce must never be reused across requests.
    pub fn prepare_with_nonce(
        &self,
        key: &str,
        nonce_str: impl Into<String>,
    ) -> Result<RefundQueryRequest, WxPayError> {
        let out_refund_no = non_empty(&self.out_refund_no);
        let refund_id = non_empty(&self.refund_id);
        match (out_refund_no, refund_id) {
            (None, None) => {
                return Err(WxPayError::Validation(
                    "one of out_refund_no and refund_id is required".into(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(WxPayError::Validation(
                    "out_refund_no and refund_id are mutually exclusive".into(),
                ))
            }
            _ => {}
        }

        let nonce_str = nonce_str.into();
        if nonce_str.is_empty() {
            return Err(WxPayError::Validation("nonce_str must not be empty".into()));
        }

        let sign_type = self.sign_type.unwrap_or_default();
        let mut req = RefundQueryRequest {
            appid: self.app_id.clone(),
            mch_id: self.mch_id.clone(),
            nonce_str,
            sign: String::new(),
            sign_type,
            out_refund_no: out_refund_no.map(String::from),
            refund_id: refund_id.map(String::from),
        };
        req.sign = sign(&req.sign_params(), key, sign_type)?;
        Ok(req)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// 32-character single-use nonce.
pub(crate) fn generate_nonce() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Signed `/pay/refundquery` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "xml")]
pub struct RefundQueryRequest {
    pub appid: String,
    pub mch_id: String,
    pub nonce_str: String,
    pub sign: String,
    pub sign_type: SignType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_refund_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
}

impl RefundQueryRequest {
    /// Fixed signing schema; unset fields enter as empty values and are
    /// skipped by the signer.
    pub fn sign_params(&self) -> Vec<(&str, &str)> {
        vec![
            ("appid", self.appid.as_str()),
            ("mch_id", self.mch_id.as_str()),
            ("nonce_str", self.nonce_str.as_str()),
            ("sign_type", self.sign_type.as_str()),
            ("out_refund_no", self.out_refund_no.as_deref().unwrap_or_default()),
            ("refund_id", self.refund_id.as_deref().unwrap_or_default()),
        ]
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    pub fn to_xml(&self) -> Result<String, WxPayError> {
        quick_xml::se::to_string(self).map_err(|e| WxPayError::Serialize(e.to_string()))
    }
}

/// Refund state as reported by the gateway.
///
/// `Processing` moves to one of the other three; the client only observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundStatus {
    Success,
    /// Refund failed and needs manual handling.
    Change,
    RefundClose,
    Processing,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Success => "SUCCESS",
            RefundStatus::Change => "CHANGE",
            RefundStatus::RefundClose => "REFUNDCLOSE",
            RefundStatus::Processing => "PROCESSING",
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, RefundStatus::Processing)
    }
}

impl fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefundStatus {
    type Err = WxPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(RefundStatus::Success),
            "CHANGE" => Ok(RefundStatus::Change),
            "REFUNDCLOSE" => Ok(RefundStatus::RefundClose),
            "PROCESSING" => Ok(RefundStatus::Processing),
            other => Err(WxPayError::UnknownStatus(other.to_string())),
        }
    }
}

/// One `_N` refund group of a refund query response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundRecord {
    pub refund_id: String,
    pub out_refund_no: String,
    pub refund_fee: i64,
    pub refund_status: RefundStatus,
    pub success_time: Option<String>,
    pub recv_account: String,
    pub refund_account: Option<String>,
    pub refund_channel: Option<String>,
}

impl RefundRecord {
    /// Extract refund group `index` from a response that passed the status check.
    pub fn at(raw: &RawResponse, index: usize) -> Result<Self, WxPayError> {
        let refund_fee_key = format!("refund_fee_{index}");
        Ok(Self {
            refund_id: raw.require_indexed("refund_id", index)?.to_string(),
            out_refund_no: raw.require_indexed("out_refund_no", index)?.to_string(),
            refund_fee: parse_int(&refund_fee_key, raw.require_indexed("refund_fee", index)?)?,
            refund_status: raw
                .require_indexed("refund_status", index)?
                .parse::<RefundStatus>()?,
            success_time: raw.indexed("refund_success_time", index).map(String::from),
            recv_account: raw
                .indexed("refund_recv_accout", index)
                .unwrap_or_default()
                .to_string(),
            refund_account: raw.indexed("refund_account", index).map(String::from),
            refund_channel: raw.indexed("refund_channel", index).map(String::from),
        })
    }
}

fn refund_count(raw: &RawResponse) -> Result<u32, WxPayError> {
    let value = raw.require("refund_count")?;
    u32::try_from(parse_int("refund_count", value)?).map_err(|_| WxPayError::MalformedField {
        field: "refund_count".into(),
        value: value.to_string(),
    })
}

/// Refund query result, built from refund group 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundQueryResponse {
    pub app_id: String,
    pub mch_id: String,
    pub transaction_id: String,
    pub out_trade_no: String,
    pub refund_id: String,
    pub out_refund_no: String,
    /// Order amount, in fen.
    pub total_fee: i64,
    pub cash_fee: Option<i64>,
    /// Amount of this refund, in fen.
    pub refund_fee: i64,
    pub refund_status: RefundStatus,
    /// e.g. `2017-12-15 09:46:01`
    pub success_time: Option<String>,
    pub receive_account: String,
    pub refund_account: Option<String>,
    pub refund_channel: Option<String>,
    pub refund_count: u32,
}

impl RefundQueryResponse {
    /// Validate the envelope and extract the result.
    pub fn from_raw(raw: &RawResponse) -> Result<Self, WxPayError> {
        raw.envelope().check()?;

        let refund_count = refund_count(raw)?;
        if refund_count == 0 {
            return Err(WxPayError::MissingField("refund_id_0".into()));
        }
        // Queries are keyed by a single refund, so group 0 is the one asked for.
        let record = RefundRecord::at(raw, 0)?;

        let cash_fee = match raw.get("cash_fee") {
            Some(v) => Some(parse_int("cash_fee", v)?),
            None => None,
        };

        Ok(Self {
            app_id: raw.get("appid").unwrap_or_default().to_string(),
            mch_id: raw.get("mch_id").unwrap_or_default().to_string(),
            transaction_id: raw.require("transaction_id")?.to_string(),
            out_trade_no: raw.require("out_trade_no")?.to_string(),
            refund_id: record.refund_id,
            out_refund_no: record.out_refund_no,
            total_fee: raw.int_field("total_fee")?,
            cash_fee,
            refund_fee: record.refund_fee,
            refund_status: record.refund_status,
            success_time: record.success_time,
            receive_account: record.recv_account,
            refund_account: record.refund_account,
            refund_channel: record.refund_channel,
            refund_count,
        })
    }
}
