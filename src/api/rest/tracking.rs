use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::shipment::TrackingResponse;
use crate::state::AppState;
use crate::tracking::lookup::{lookup_tracking, WAYBILL_REQUIRED};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/tracking", get(get_tracking))
}

#[derive(Deserialize)]
pub struct TrackingQuery {
    pub waybill: Option<String>,
}

async fn get_tracking(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TrackingQuery>, QueryRejection>,
) -> Result<Json<TrackingResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "unreadable tracking query");
        AppError::BadRequest(WAYBILL_REQUIRED.to_string())
    })?;
    let waybill = query.waybill.unwrap_or_default();
    let response = lookup_tracking(&state, &waybill).await?;

    Ok(Json(response))
}
