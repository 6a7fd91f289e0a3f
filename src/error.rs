use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum WxPayError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Transport failed: {0}")]
    Transport(#[source] BoxError),

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Request serialization failed: {0}")]
    Serialize(String),

    /// `return_code` was not `SUCCESS`; the gateway rejected the request itself.
    #[error("WeChat Pay rejected request: {message}")]
    TransportFailure { message: String },

    /// `result_code` was not `SUCCESS`; the query was processed but failed.
    #[error(
        "WeChat Pay business error: code={}, description={}",
        err_code.as_deref().unwrap_or("-"),
        err_code_des.as_deref().unwrap_or("-")
    )]
    BusinessFailure {
        err_code: Option<String>,
        err_code_des: Option<String>,
    },

    #[error("Malformed field {field}: {value:?}")]
    MalformedField { field: String, value: String },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unknown refund status: {0}")]
    UnknownStatus(String),

    #[error("Signature generation failed: {0}")]
    SignError(String),

    #[error("Signature verification failed: {0}")]
    VerifyError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WxPayError {
    /// Gateway error code carried by a [`WxPayError::BusinessFailure`].
    pub fn err_code(&self) -> Option<&str> {
        match self {
            WxPayError::BusinessFailure { err_code, .. } => err_code.as_deref(),
            _ => None,
        }
    }
}
