pub mod delhivery;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourierError {
    #[error("courier responded {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("courier request failed: {0}")]
    Transport(String),

    #[error("courier response is not json: {0}")]
    Decode(String),
}

/// Remote source of raw scan history for a waybill.
#[async_trait]
pub trait CourierClient: Send + Sync {
    async fn fetch_shipments(&self, waybill: &str) -> Result<Value, CourierError>;
}

/// Public courier page for a waybill, for linking out of the dashboard.
pub fn public_tracking_url(base: &str, waybill: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), waybill)
}
