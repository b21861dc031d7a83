use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetaEntry {
    #[serde(default)]
    pub id: Option<u64>,
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub display_key: Option<String>,
    #[serde(default)]
    pub display_value: Option<Value>,
}

impl MetaEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: None,
            key: key.into(),
            value: value.into(),
            display_key: None,
            display_value: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub meta_data: Vec<MetaEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WooOrder {
    pub id: u64,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub meta_data: Vec<MetaEntry>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    Regular,
    FullSleeve,
    Children,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantBadge {
    pub label: String,
    pub value: String,
    pub kind: VariantKind,
}

const VARIANT_KEYS: [(&str, &str); 6] = [
    ("select_size", "Size"),
    ("select_colour", "Color"),
    ("select_colour_fs", "Full Sleeve Color"),
    ("size_fs", "Full Sleeve Size"),
    ("select_size_child", "Child's Size"),
    ("select_colour_child", "Child's Color"),
];

impl LineItem {
    /// Size/colour choices the customer picked, in display order.
    pub fn variant_badges(&self) -> Vec<VariantBadge> {
        VARIANT_KEYS
            .iter()
            .filter_map(|(key, label)| {
                let value = meta_value(&self.meta_data, key).and_then(meta_text)?;
                Some(VariantBadge {
                    label: (*label).to_string(),
                    value,
                    kind: variant_kind(key),
                })
            })
            .collect()
    }
}

fn variant_kind(key: &str) -> VariantKind {
    if key.contains("_fs") {
        VariantKind::FullSleeve
    } else if key.contains("_child") {
        VariantKind::Children
    } else {
        VariantKind::Regular
    }
}

pub fn meta_value<'a>(meta: &'a [MetaEntry], key: &str) -> Option<&'a Value> {
    meta.iter().find(|entry| entry.key == key).map(|entry| &entry.value)
}

/// Non-empty text form of a metadata value. Numbers are rendered, other shapes are ignored.
pub fn meta_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
