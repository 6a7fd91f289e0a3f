use crate::crypto::sign::{sign, SignType};
use crate::error::WxPayError;

/// Verify the `sign` carried by a gateway response.
///
/// - `fields`: every response field, `sign` included (it is skipped when signing)
/// - `signature`: the `sign` value returned by the gateway
///
/// Comparison ignores hex case.
pub fn verify_signature(
    fields: &[(&str, &str)],
    key: &str,
    sign_type: SignType,
    signature: &str,
) -> Result<bool, WxPayError> {
    if signature.is_empty() {
        return Err(WxPayError::VerifyError("response carries no sign".into()));
    }
    let expected = sign(fields, key, sign_type)?;
    Ok(expected.eq_ignore_ascii_case(signature))
}
