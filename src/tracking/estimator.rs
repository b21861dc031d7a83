use chrono::Duration;

use crate::models::shipment::{DeliveryDate, Shipment};

/// Flat delivery window counted from the first scan.
pub const SLA_DAYS: i64 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryEstimate {
    pub estimated: Option<DeliveryDate>,
    pub promised: Option<DeliveryDate>,
    pub actual: Option<DeliveryDate>,
}

impl DeliveryEstimate {
    pub fn apply_to(&self, shipment: &mut Shipment) {
        shipment.estimated_delivery_date = self.estimated.clone();
        shipment.promised_delivery_date = self.promised.clone();
        shipment.actual_delivery_date = self.actual.clone();
    }
}

/// `None` means there was no usable shipment to estimate from, which callers
/// keep apart from a shipment that simply has no scans yet.
pub fn estimate_delivery(shipment: Option<&Shipment>) -> Option<DeliveryEstimate> {
    let shipment = shipment?;
    let status = shipment.status.as_ref()?;

    // The courier's own delivery time is passed through as text, not re-parsed.
    if status.status.to_lowercase().contains("delivered") {
        let delivered_at = Some(&status.status_date_time)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| DeliveryDate::Reported(raw.clone()));
        return Some(DeliveryEstimate {
            estimated: delivered_at.clone(),
            promised: delivered_at.clone(),
            actual: delivered_at,
        });
    }

    let eta = shipment
        .scans
        .first()
        .and_then(|scan| scan.detail.timestamp())
        .and_then(|pickup| pickup.checked_add_signed(Duration::days(SLA_DAYS)))
        .map(DeliveryDate::Computed);

    Some(DeliveryEstimate {
        estimated: eta.clone(),
        promised: eta,
        actual: None,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{estimate_delivery, DeliveryEstimate};
    use crate::models::shipment::{DeliveryDate, ScanDetail, ScanEvent, Shipment, ShipmentStatus};

    fn reported(raw: &str) -> Option<DeliveryDate> {
        Some(DeliveryDate::Reported(raw.to_string()))
    }

    fn status(label: &str, at: &str) -> ShipmentStatus {
        ShipmentStatus {
            status: label.to_string(),
            status_date_time: at.to_string(),
            status_location: "Bengaluru_Hub".to_string(),
            ..ShipmentStatus::default()
        }
    }

    fn scan(at: &str) -> ScanEvent {
        ScanEvent {
            detail: ScanDetail {
                scan: "Manifested".to_string(),
                scan_date_time: at.to_string(),
                scan_location: "Mumbai".to_string(),
                ..ScanDetail::default()
            },
            ..ScanEvent::default()
        }
    }

    fn shipment(status: ShipmentStatus, scans: Vec<ScanEvent>) -> Shipment {
        Shipment {
            status: Some(status),
            scans,
            ..Shipment::default()
        }
    }

    #[test]
    fn delivered_status_sets_all_dates_to_status_time() {
        let delivered = shipment(
            status("Delivered", "2024-01-10T10:00:00Z"),
            vec![scan("2024-01-01T08:00:00Z")],
        );
        let estimate = estimate_delivery(Some(&delivered)).unwrap();
        assert_eq!(
            estimate,
            DeliveryEstimate {
                estimated: reported("2024-01-10T10:00:00Z"),
                promised: reported("2024-01-10T10:00:00Z"),
                actual: reported("2024-01-10T10:00:00Z"),
            }
        );
        assert_eq!(
            serde_json::to_value(&estimate.actual).unwrap(),
            "2024-01-10T10:00:00Z"
        );
    }

    #[test]
    fn delivered_time_without_offset_is_kept_verbatim() {
        let delivered = shipment(status("Delivered", "2024-01-10T10:00:00.000"), vec![]);

        let estimate = estimate_delivery(Some(&delivered)).unwrap();
        assert_eq!(estimate.actual, reported("2024-01-10T10:00:00.000"));
        assert_eq!(estimate.estimated, estimate.actual);
        assert_eq!(
            serde_json::to_value(&estimate.actual).unwrap(),
            "2024-01-10T10:00:00.000"
        );
    }

    #[test]
    fn delivered_time_in_courier_format_is_not_dropped() {
        let delivered = shipment(status("Delivered", "10-01-2024 10:00"), vec![]);

        let estimate = estimate_delivery(Some(&delivered)).unwrap();
        assert_eq!(estimate.actual, reported("10-01-2024 10:00"));
        assert_eq!(estimate.promised, reported("10-01-2024 10:00"));
    }

    #[test]
    fn delivered_match_ignores_case() {
        let delivered = shipment(status("DELIVERED TO CONSIGNEE", "2024-01-10T10:00:00Z"), vec![]);
        let estimate = estimate_delivery(Some(&delivered)).unwrap();
        assert!(estimate.actual.is_some());
    }

    #[test]
    fn first_scan_plus_three_days_keeps_time_of_day() {
        let in_transit = shipment(
            status("In Transit", "2024-01-02T18:45:00Z"),
            vec![scan("2024-01-01T08:00:00Z"), scan("2024-01-02T18:45:00Z")],
        );
        let eta = Utc.with_ymd_and_hms(2024, 1, 4, 8, 0, 0).unwrap();

        let estimate = estimate_delivery(Some(&in_transit)).unwrap();
        assert_eq!(estimate.estimated, Some(DeliveryDate::Computed(eta)));
        assert_eq!(estimate.promised, Some(DeliveryDate::Computed(eta)));
        assert_eq!(estimate.actual, None);
        assert_eq!(
            serde_json::to_value(&estimate.estimated).unwrap(),
            "2024-01-04T08:00:00Z"
        );
    }

    #[test]
    fn window_crosses_month_boundary() {
        let in_transit = shipment(
            status("Picked Up", "2024-01-30T21:15:00Z"),
            vec![scan("2024-01-30T21:15:00")],
        );
        let eta = Utc.with_ymd_and_hms(2024, 2, 2, 21, 15, 0).unwrap();

        assert_eq!(
            estimate_delivery(Some(&in_transit)).unwrap().estimated,
            Some(DeliveryDate::Computed(eta))
        );
    }

    #[test]
    fn no_scans_and_not_delivered_gives_empty_estimate() {
        let pending = shipment(status("Pending", "2024-01-01T08:00:00Z"), vec![]);
        assert_eq!(
            estimate_delivery(Some(&pending)),
            Some(DeliveryEstimate::default())
        );
    }

    #[test]
    fn missing_shipment_or_status_is_no_estimate() {
        assert_eq!(estimate_delivery(None), None);

        let malformed = Shipment {
            scans: vec![scan("2024-01-01T08:00:00Z")],
            ..Shipment::default()
        };
        assert_eq!(estimate_delivery(Some(&malformed)), None);
    }
}
