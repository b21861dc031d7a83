use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tracing::info;

use crate::auth::{Role, Session};
use crate::courier::public_tracking_url;
use crate::error::AppError;
use crate::models::order::Order;
use crate::models::shipment::TrackingResponse;
use crate::models::woo::{LineItem, VariantBadge, WooOrder};
use crate::state::AppState;
use crate::tracking::lookup::lookup_tracking;
use crate::tracking::normalizer::{normalize_tracking, TrackingDescriptor};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/orders/tracking", post(track_order))
        .route("/api/woo/orders/tracking", post(track_woo_order))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrackingResponse {
    pub order_id: String,
    pub tracking_id: String,
    pub tracking_url: String,
    pub shipment: TrackingResponse,
}

#[derive(Serialize)]
pub struct LineItemSummary {
    pub name: String,
    pub sku: Option<String>,
    pub quantity: u32,
    pub variants: Vec<VariantBadge>,
}

impl From<&LineItem> for LineItemSummary {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
            variants: item.variant_badges(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WooOrderTrackingResponse {
    pub order_id: u64,
    pub number: Option<String>,
    pub tracking: Option<TrackingDescriptor>,
    pub tracking_url: Option<String>,
    pub shipment: Option<TrackingResponse>,
    pub items: Vec<LineItemSummary>,
}

async fn track_order(
    session: Session,
    State(state): State<Arc<AppState>>,
    Json(order): Json<Order>,
) -> Result<Json<OrderTrackingResponse>, AppError> {
    session.require(Role::User)?;

    let tracking_id = order.tracking_number()?;
    let shipment = lookup_tracking(&state, &tracking_id).await?;

    Ok(Json(OrderTrackingResponse {
        order_id: order.order_id,
        tracking_url: public_tracking_url(&state.public_tracking_url, &tracking_id),
        tracking_id,
        shipment,
    }))
}

async fn track_woo_order(
    session: Session,
    State(state): State<Arc<AppState>>,
    Json(order): Json<WooOrder>,
) -> Result<Json<WooOrderTrackingResponse>, AppError> {
    session.require(Role::Admin)?;

    let tracking = normalize_tracking(&order.meta_data);
    let number = tracking
        .as_ref()
        .and_then(|descriptor| descriptor.number.clone());

    let shipment = match number.as_deref() {
        Some(number) => Some(lookup_tracking(&state, number).await?),
        None => {
            info!(order_id = order.id, "order carries no tracking reference");
            None
        }
    };

    let tracking_url = tracking
        .as_ref()
        .and_then(|descriptor| descriptor.url.clone())
        .or_else(|| {
            number
                .as_deref()
                .map(|number| public_tracking_url(&state.public_tracking_url, number))
        });

    Ok(Json(WooOrderTrackingResponse {
        order_id: order.id,
        number: order.number,
        tracking,
        tracking_url,
        shipment,
        items: order.line_items.iter().map(LineItemSummary::from).collect(),
    }))
}
