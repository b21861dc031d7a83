use serde::{Deserialize, Serialize};

use crate::error::AppError;

const TRACKING_NUMBER_MIN_LEN: usize = 8;
const TRACKING_NUMBER_MAX_LEN: usize = 15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderProduct {
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "orderName", default)]
    pub order_name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub sale_price: f64,
    #[serde(default)]
    pub product_page_url: String,
    #[serde(default)]
    pub product_category: String,
    #[serde(default)]
    pub colour: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub qty: u32,
    #[serde(default)]
    pub downloaddesign: Option<String>,
}

/// Order document as kept by the dashboard's own store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<String>,
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(rename = "orderstatus", default)]
    pub order_status: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub design_url: Option<String>,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
}

impl Order {
    pub fn tracking_number(&self) -> Result<String, AppError> {
        match self.tracking_id.as_deref() {
            Some(raw) if !raw.trim().is_empty() => validate_tracking_number(raw),
            _ => Err(AppError::BadRequest(format!(
                "order {} has no tracking id",
                self.order_id
            ))),
        }
    }
}

/// Courier waybills are 8 to 15 upper-case letters or digits.
pub fn validate_tracking_number(raw: &str) -> Result<String, AppError> {
    let candidate = raw.trim();
    let len_ok = (TRACKING_NUMBER_MIN_LEN..=TRACKING_NUMBER_MAX_LEN).contains(&candidate.len());
    let chars_ok = candidate
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());

    if len_ok && chars_ok {
        Ok(candidate.to_string())
    } else {
        Err(AppError::BadRequest(format!(
            "invalid tracking number: {candidate}"
        )))
    }
}
