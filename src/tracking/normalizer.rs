//! Pulls a courier reference out of an e-commerce order's metadata.
//!
//! Shipment-tracking plugins store the reference under different keys and in
//! different shapes: a JSON-encoded list of tracking items, an already decoded
//! list, or a bare waybill string. Anything we cannot read is "no tracking".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::woo::{meta_text, MetaEntry};

pub const TRACKING_META_KEYS: [&str; 3] = [
    "_wc_shipment_tracking_items",
    "wc_shipment_tracking_items",
    "_tracking_number",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackingDescriptor {
    pub number: Option<String>,
    pub provider: Option<String>,
    pub url: Option<String>,
}

impl TrackingDescriptor {
    fn is_empty(&self) -> bool {
        self.number.is_none() && self.provider.is_none() && self.url.is_none()
    }
}

#[derive(Debug, PartialEq)]
enum TrackingMetaValue<'a> {
    PlainString(&'a str),
    JsonList(&'a str),
    DecodedList(&'a [Value]),
}

impl<'a> TrackingMetaValue<'a> {
    fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(raw) if raw.starts_with('[') => Some(Self::JsonList(raw)),
            Value::String(raw) => Some(Self::PlainString(raw)),
            Value::Array(items) => Some(Self::DecodedList(items)),
            _ => None,
        }
    }
}

/// First matching metadata entry wins, in the order the entries were given.
pub fn normalize_tracking(meta: &[MetaEntry]) -> Option<TrackingDescriptor> {
    let entry = meta
        .iter()
        .find(|entry| TRACKING_META_KEYS.contains(&entry.key.as_str()))?;

    let Some(value) = TrackingMetaValue::classify(&entry.value) else {
        debug!(key = %entry.key, "tracking metadata has an unsupported shape");
        return None;
    };

    match value {
        TrackingMetaValue::PlainString(raw) => {
            if raw.trim().is_empty() {
                return None;
            }
            Some(TrackingDescriptor {
                number: Some(raw.to_string()),
                ..TrackingDescriptor::default()
            })
        }
        TrackingMetaValue::JsonList(raw) => match serde_json::from_str::<Vec<Value>>(raw) {
            Ok(items) => from_tracking_items(&items),
            Err(err) => {
                warn!(key = %entry.key, error = %err, "failed to parse tracking metadata");
                None
            }
        },
        TrackingMetaValue::DecodedList(items) => from_tracking_items(items),
    }
}

fn from_tracking_items(items: &[Value]) -> Option<TrackingDescriptor> {
    let first = items.first()?.as_object()?;

    let descriptor = TrackingDescriptor {
        number: item_field(first, "tracking_number"),
        provider: item_field(first, "tracking_provider"),
        url: item_field(first, "tracking_link").or_else(|| item_field(first, "tracking_url")),
    };

    if descriptor.is_empty() {
        None
    } else {
        Some(descriptor)
    }
}

fn item_field(item: &Map<String, Value>, key: &str) -> Option<String> {
    item.get(key).and_then(meta_text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{normalize_tracking, TrackingDescriptor, TrackingMetaValue};
    use crate::models::woo::MetaEntry;

    #[test]
    fn no_tracking_keys_means_none_found() {
        let meta = vec![
            MetaEntry::new("_billing_gstin", "29ABCDE1234F1Z5"),
            MetaEntry::new("is_vat_exempt", "no"),
        ];
        assert_eq!(normalize_tracking(&meta), None);
        assert_eq!(normalize_tracking(&[]), None);
    }

    #[test]
    fn plain_tracking_number_becomes_number_only() {
        let meta = vec![MetaEntry::new("_tracking_number", "AWB123456789")];

        assert_eq!(
            normalize_tracking(&meta),
            Some(TrackingDescriptor {
                number: Some("AWB123456789".to_string()),
                provider: None,
                url: None,
            })
        );
    }

    #[test]
    fn json_encoded_items_use_first_entry() {
        let meta = vec![MetaEntry::new(
            "wc_shipment_tracking_items",
            r#"[{"tracking_number":"XYZ1","tracking_provider":"Delhivery","tracking_link":"https://t.co/xyz1"},{"tracking_number":"XYZ2"}]"#,
        )];

        assert_eq!(
            normalize_tracking(&meta),
            Some(TrackingDescriptor {
                number: Some("XYZ1".to_string()),
                provider: Some("Delhivery".to_string()),
                url: Some("https://t.co/xyz1".to_string()),
            })
        );
    }

    #[test]
    fn tracking_url_is_used_when_link_is_missing_or_blank() {
        let meta = vec![MetaEntry::new(
            "_wc_shipment_tracking_items",
            r#"[{"tracking_number":"XYZ1","tracking_link":"","tracking_url":"https://t.co/alt"}]"#,
        )];

        let descriptor = normalize_tracking(&meta).unwrap();
        assert_eq!(descriptor.url.as_deref(), Some("https://t.co/alt"));
    }

    #[test]
    fn malformed_json_is_none_found() {
        let meta = vec![MetaEntry::new("_wc_shipment_tracking_items", "[invalid json")];
        assert_eq!(normalize_tracking(&meta), None);
    }

    #[test]
    fn empty_list_is_none_found() {
        let meta = vec![MetaEntry::new("_wc_shipment_tracking_items", "[]")];
        assert_eq!(normalize_tracking(&meta), None);
    }

    #[test]
    fn first_matching_entry_in_input_order_wins() {
        let meta = vec![
            MetaEntry::new("_tracking_number", "FIRST0001"),
            MetaEntry::new(
                "_wc_shipment_tracking_items",
                r#"[{"tracking_number":"SECOND02"}]"#,
            ),
        ];

        let descriptor = normalize_tracking(&meta).unwrap();
        assert_eq!(descriptor.number.as_deref(), Some("FIRST0001"));
    }

    #[test]
    fn already_decoded_item_list_is_read() {
        let meta = vec![MetaEntry::new(
            "_wc_shipment_tracking_items",
            json!([{ "tracking_number": 1234567890u64, "tracking_provider": "delhivery" }]),
        )];

        let descriptor = normalize_tracking(&meta).unwrap();
        assert_eq!(descriptor.number.as_deref(), Some("1234567890"));
        assert_eq!(descriptor.provider.as_deref(), Some("delhivery"));
        assert_eq!(descriptor.url, None);
    }

    #[test]
    fn unsupported_shapes_are_none_found() {
        let meta = vec![MetaEntry::new("_tracking_number", json!({ "awb": "X" }))];
        assert_eq!(normalize_tracking(&meta), None);

        let meta = vec![MetaEntry::new("_tracking_number", "   ")];
        assert_eq!(normalize_tracking(&meta), None);

        let meta = vec![MetaEntry::new("_wc_shipment_tracking_items", "[1, 2]")];
        assert_eq!(normalize_tracking(&meta), None);
    }

    #[test]
    fn classification_looks_at_leading_bracket_only() {
        let list = json!("[{}]");
        let plain = json!("AWB1 [x]");
        assert_eq!(
            TrackingMetaValue::classify(&list),
            Some(TrackingMetaValue::JsonList("[{}]"))
        );
        assert_eq!(
            TrackingMetaValue::classify(&plain),
            Some(TrackingMetaValue::PlainString("AWB1 [x]"))
        );
        assert_eq!(TrackingMetaValue::classify(&json!(null)), None);
    }
}
