pub mod api;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod model;
pub mod response;
pub mod transport;

#[cfg(test)]
mod fixtures;

pub use client::WxPayClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use crypto::sign::SignType;
pub use error::WxPayError;
pub use model::refund::{RefundQuery, RefundQueryResponse, RefundRecord, RefundStatus};
pub use transport::{HttpTransport, Transport};
