use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::shipment::{Shipment, TrackingResponse};
use crate::state::AppState;
use crate::tracking::estimator::estimate_delivery;
use crate::tracking::phase::ShipmentPhase;

pub const WAYBILL_REQUIRED: &str = "Waybill is required";

/// Single best-effort courier fetch for `waybill`, decorated with delivery dates.
///
/// An unknown waybill is not an error: it comes back as the "Not Found" record.
/// The estimate is taken from the first shipment entry and copied onto every
/// entry; consumers only read entry 0 today.
pub async fn lookup_tracking(state: &AppState, waybill: &str) -> Result<TrackingResponse, AppError> {
    let waybill = waybill.trim();
    if waybill.is_empty() {
        state.metrics.record_lookup("bad_request");
        return Err(AppError::BadRequest(WAYBILL_REQUIRED.to_string()));
    }

    let start = Instant::now();
    let raw = match state.courier.fetch_shipments(waybill).await {
        Ok(raw) => {
            state
                .metrics
                .courier_request_seconds
                .with_label_values(&["success"])
                .observe(start.elapsed().as_secs_f64());
            raw
        }
        Err(err) => {
            state
                .metrics
                .courier_request_seconds
                .with_label_values(&["error"])
                .observe(start.elapsed().as_secs_f64());
            state.metrics.record_lookup("courier_error");
            warn!(waybill = %waybill, error = %err, "courier lookup failed");
            return Err(AppError::CourierLookup(err));
        }
    };

    let mut response = decode_response(waybill, raw);

    if response.shipment_data.is_empty() {
        info!(waybill = %waybill, "waybill unknown to courier");
        state.metrics.record_lookup("not_found");
        return Ok(TrackingResponse::not_found(Utc::now()));
    }

    let estimate = match estimate_delivery(response.primary_shipment()) {
        Some(estimate) => {
            state.metrics.record_lookup("found");
            estimate
        }
        None => {
            debug!(waybill = %waybill, "no shipment data to estimate from");
            state.metrics.record_lookup("no_shipment_data");
            Default::default()
        }
    };

    for entry in &mut response.shipment_data {
        estimate.apply_to(entry.shipment.get_or_insert_with(Shipment::default));
    }

    if let Some(status) = response
        .primary_shipment()
        .and_then(|shipment| shipment.status.as_ref())
    {
        let phase = ShipmentPhase::classify(&status.status);
        state
            .metrics
            .tracking_phase_total
            .with_label_values(&[phase.as_str()])
            .inc();
        info!(waybill = %waybill, phase = phase.as_str(), status = %status.status, "tracking resolved");
    }

    Ok(response)
}

/// A payload that does not match the courier's shape reads as "no shipments".
fn decode_response(waybill: &str, raw: Value) -> TrackingResponse {
    match serde_json::from_value::<TrackingResponse>(raw) {
        Ok(response) => response,
        Err(err) => {
            warn!(waybill = %waybill, error = %err, "unexpected courier payload shape");
            TrackingResponse::default()
        }
    }
}
