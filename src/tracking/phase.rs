use serde::Serialize;

/// Coarse bucket for a courier's free-text status label.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentPhase {
    Delivered,
    InTransit,
    PickedUp,
    Pending,
    Failed,
    Other,
}

impl ShipmentPhase {
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();

        if status.contains("delivered") {
            ShipmentPhase::Delivered
        } else if status.contains("transit") {
            ShipmentPhase::InTransit
        } else if status.contains("picked") {
            ShipmentPhase::PickedUp
        } else if status.contains("pending") {
            ShipmentPhase::Pending
        } else if status.contains("failed") {
            ShipmentPhase::Failed
        } else {
            ShipmentPhase::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentPhase::Delivered => "delivered",
            ShipmentPhase::InTransit => "in_transit",
            ShipmentPhase::PickedUp => "picked_up",
            ShipmentPhase::Pending => "pending",
            ShipmentPhase::Failed => "failed",
            ShipmentPhase::Other => "other",
        }
    }
}
