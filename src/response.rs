use std::collections::BTreeMap;

use tracing::warn;

use crate::crypto::sign::{SignType, SIGN_FIELD};
use crate::crypto::verify::verify_signature;
use crate::error::WxPayError;

const SUCCESS: &str = "SUCCESS";

/// Flat view of a v2 XML response body: element name → text.
///
/// Indexed groups (`refund_id_0`, `refund_id_1`, ...) stay as plain keys and
/// are addressed through [`RawResponse::indexed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    fields: BTreeMap<String, String>,
}

impl RawResponse {
    /// Decode a response body.
    ///
    /// Only well-formedness is checked; a missing `return_code` is left to
    /// [`ResponseEnvelope::check`].
    pub fn from_xml(body: &[u8]) -> Result<Self, WxPayError> {
        let text = std::str::from_utf8(body)
            .map_err(|e| WxPayError::Decode(format!("response body is not valid UTF-8: {e}")))?;
        if text.trim().is_empty() {
            return Err(WxPayError::Decode("empty response body".into()));
        }

        let fields: BTreeMap<String, String> =
            quick_xml::de::from_str(text).map_err(|e| WxPayError::Decode(e.to_string()))?;

        Ok(Self { fields })
    }

    /// Non-empty value of a top-level field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, name: &str) -> Result<&str, WxPayError> {
        self.get(name)
            .ok_or_else(|| WxPayError::MissingField(name.to_string()))
    }

    /// Value of `{name}_{index}` in an indexed group.
    pub fn indexed(&self, name: &str, index: usize) -> Option<&str> {
        self.get(&format!("{name}_{index}"))
    }

    pub fn require_indexed(&self, name: &str, index: usize) -> Result<&str, WxPayError> {
        let key = format!("{name}_{index}");
        self.get(&key).ok_or(WxPayError::MissingField(key))
    }

    /// Every field as `(name, value)` pairs, in name order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    pub fn envelope(&self) -> ResponseEnvelope {
        let owned = |name: &str| self.get(name).unwrap_or_default().to_string();
        ResponseEnvelope {
            return_code: owned("return_code"),
            return_msg: owned("return_msg"),
            result_code: owned("result_code"),
            err_code: self.get("err_code").map(String::from),
            err_code_des: self.get("err_code_des").map(String::from),
            appid: owned("appid"),
            mch_id: owned("mch_id"),
            nonce_str: owned("nonce_str"),
            sign: owned(SIGN_FIELD),
        }
    }

    /// Check the response `sign` against `key`.
    pub fn verify_sign(&self, key: &str, sign_type: SignType) -> Result<(), WxPayError> {
        let signature = self.get(SIGN_FIELD).unwrap_or_default();
        if verify_signature(&self.pairs(), key, sign_type, signature)? {
            Ok(())
        } else {
            warn!("response signature mismatch");
            Err(WxPayError::VerifyError(
                "response signature verification failed".into(),
            ))
        }
    }

    /// Parse an integer amount (minor currency unit).
    pub fn int_field(&self, name: &str) -> Result<i64, WxPayError> {
        parse_int(name, self.require(name)?)
    }
}

pub(crate) fn parse_int(field: &str, value: &str) -> Result<i64, WxPayError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| WxPayError::MalformedField {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Common header of every v2 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub return_code: String,
    pub return_msg: String,
    pub result_code: String,
    pub err_code: Option<String>,
    pub err_code_des: Option<String>,
    pub appid: String,
    pub mch_id: String,
    pub nonce_str: String,
    pub sign: String,
}

/// Outcome of the two-tier status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayStatus {
    /// `return_code` != SUCCESS. Business fields are not meaningful.
    ReturnFail { message: String },
    /// `return_code` == SUCCESS but `result_code` != SUCCESS.
    ResultFail {
        err_code: Option<String>,
        err_code_des: Option<String>,
    },
    Success,
}

impl ResponseEnvelope {
    pub fn return_ok(&self) -> bool {
        self.return_code == SUCCESS
    }

    pub fn status(&self) -> GatewayStatus {
        if !self.return_ok() {
            return GatewayStatus::ReturnFail {
                message: self.return_msg.clone(),
            };
        }
        if self.result_code != SUCCESS {
            return GatewayStatus::ResultFail {
                err_code: self.err_code.clone(),
                err_code_des: self.err_code_des.clone(),
            };
        }
        GatewayStatus::Success
    }

    /// Convert a failed status into the matching error.
    ///
    /// A body without `return_code` is not a v2 envelope and fails as
    /// [`WxPayError::Decode`].
    pub fn check(&self) -> Result<(), WxPayError> {
        if self.return_code.is_empty() {
            return Err(WxPayError::Decode("response has no return_code".into()));
        }
        match self.status() {
            GatewayStatus::Success => Ok(()),
            GatewayStatus::ReturnFail { message } => {
                warn!(return_msg = %message, "gateway rejected request");
                Err(WxPayError::TransportFailure { message })
            }
            GatewayStatus::ResultFail {
                err_code,
                err_code_des,
            } => {
                warn!(
                    err_code = err_code.as_deref().unwrap_or_default(),
                    err_code_des = err_code_des.as_deref().unwrap_or_default(),
                    "gateway reported business failure"
                );
                Err(WxPayError::BusinessFailure {
                    err_code,
                    err_code_des,
                })
            }
        }
    }
}
