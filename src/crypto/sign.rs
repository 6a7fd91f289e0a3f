use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use serde::{Serialize, Serializer};
use sha2::Sha256;

use crate::error::WxPayError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signature parameter; never part of its own input.
pub const SIGN_FIELD: &str = "sign";

/// Signing algorithm selector sent as `sign_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignType {
    #[default]
    Md5,
    HmacSha256,
}

impl SignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SignType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for SignType {
    type Err = WxPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MD5" => Ok(SignType::Md5),
            "HMAC-SHA256" => Ok(SignType::HmacSha256),
            other => Err(WxPayError::SignError(format!("unsupported sign_type: {other}"))),
        }
    }
}

/// Build the canonical string-to-sign.
///
/// Format: `"{k1}={v1}&{k2}={v2}&...&key={secret}"`
///
/// - parameters with an empty value are dropped before sorting
/// - the `sign` parameter itself is dropped
/// - names are sorted byte-lexicographically, so caller order is irrelevant
pub fn build_sign_string(params: &[(&str, &str)], key: &str) -> String {
    let mut signed: Vec<&(&str, &str)> = params
        .iter()
        .filter(|(name, value)| !value.is_empty() && *name != SIGN_FIELD)
        .collect();
    signed.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

    let mut out = String::new();
    for (name, value) in signed {
        out.push_str(name);
        out.push('=');
        out.push_str(value);
        out.push('&');
    }
    out.push_str("key=");
    out.push_str(key);
    out
}

/// Sign the parameters and return the uppercase hex digest.
pub fn sign(params: &[(&str, &str)], key: &str, sign_type: SignType) -> Result<String, WxPayError> {
    if key.is_empty() {
        return Err(WxPayError::SignError("signing key is empty".into()));
    }

    let message = build_sign_string(params, key);
    match sign_type {
        SignType::Md5 => Ok(hex::encode_upper(md5::compute(message.as_bytes()).0)),
        SignType::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(key.as_bytes())
                .map_err(|e| WxPayError::SignError(format!("create HMAC: {e}")))?;
            mac.update(message.as_bytes());
            Ok(hex::encode_upper(mac.finalize().into_bytes()))
        }
    }
}
