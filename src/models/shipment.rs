//! Courier shipment payloads as they travel through the tracking endpoint.
//!
//! Field names follow the courier's PascalCase JSON. Anything the courier sends
//! that is not modelled here is kept in `extra` and written back out unchanged.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const NOT_FOUND_STATUS: &str = "Not Found";
const NOT_FOUND_LOCATION: &str = "N/A";
const NOT_FOUND_INSTRUCTIONS: &str = "No tracking information found for this waybill";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentStatus {
    #[serde(default, deserialize_with = "string_or_default")]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub status_date_time: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub status_location: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ScanDetail {
    #[serde(default, deserialize_with = "string_or_default")]
    pub scan: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub scan_date_time: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub scan_location: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScanDetail {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.scan_date_time)
    }
}

/// One checkpoint in a parcel's history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScanEvent {
    #[serde(rename = "ScanDetail", default)]
    pub detail: ScanDetail,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A delivery date we worked out ourselves, or one the courier reported verbatim.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DeliveryDate {
    Computed(DateTime<Utc>),
    Reported(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Shipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ShipmentStatus>,
    #[serde(default, deserialize_with = "vec_or_default")]
    pub scans: Vec<ScanEvent>,
    #[serde(default, deserialize_with = "reported_date")]
    pub estimated_delivery_date: Option<DeliveryDate>,
    #[serde(default, deserialize_with = "reported_date")]
    pub promised_delivery_date: Option<DeliveryDate>,
    #[serde(default, deserialize_with = "reported_date")]
    pub actual_delivery_date: Option<DeliveryDate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShipmentEntry {
    #[serde(rename = "Shipment", default, skip_serializing_if = "Option::is_none")]
    pub shipment: Option<Shipment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackingResponse {
    #[serde(rename = "ShipmentData", default, deserialize_with = "vec_or_default")]
    pub shipment_data: Vec<ShipmentEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackingResponse {
    /// The record handed back when the courier has never seen the waybill.
    pub fn not_found(now: DateTime<Utc>) -> Self {
        let status = ShipmentStatus {
            status: NOT_FOUND_STATUS.to_string(),
            status_date_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            status_location: NOT_FOUND_LOCATION.to_string(),
            instructions: Some(NOT_FOUND_INSTRUCTIONS.to_string()),
            extra: Map::new(),
        };

        Self {
            shipment_data: vec![ShipmentEntry {
                shipment: Some(Shipment {
                    status: Some(status),
                    ..Shipment::default()
                }),
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }

    pub fn primary_shipment(&self) -> Option<&Shipment> {
        self.shipment_data.first()?.shipment.as_ref()
    }

    pub fn is_not_found(&self) -> bool {
        self.primary_shipment()
            .and_then(|shipment| shipment.status.as_ref())
            .is_some_and(|status| status.status == NOT_FOUND_STATUS)
    }
}

/// Accepts RFC 3339 timestamps, and offset-less ISO-8601 ones which are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn vec_or_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn reported_date<'de, D>(deserializer: D) -> Result<Option<DeliveryDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| DeliveryDate::Reported(raw.to_string())))
}
