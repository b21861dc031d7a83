use prometheus::{Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub tracking_lookups_total: IntCounterVec,
    pub courier_request_seconds: HistogramVec,
    pub tracking_phase_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let tracking_lookups_total = IntCounterVec::new(
            Opts::new("tracking_lookups_total", "Tracking lookups by outcome"),
            &["outcome"],
        )
        .expect("valid tracking_lookups_total metric");

        let courier_request_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "courier_request_seconds",
                "Latency of courier tracking requests in seconds",
            ),
            &["outcome"],
        )
        .expect("valid courier_request_seconds metric");

        let tracking_phase_total = IntCounterVec::new(
            Opts::new(
                "tracking_phase_total",
                "Shipments seen by current courier phase",
            ),
            &["phase"],
        )
        .expect("valid tracking_phase_total metric");

        registry
            .register(Box::new(tracking_lookups_total.clone()))
            .expect("register tracking_lookups_total");
        registry
            .register(Box::new(courier_request_seconds.clone()))
            .expect("register courier_request_seconds");
        registry
            .register(Box::new(tracking_phase_total.clone()))
            .expect("register tracking_phase_total");

        Self {
            registry,
            tracking_lookups_total,
            courier_request_seconds,
            tracking_phase_total,
        }
    }

    pub fn record_lookup(&self, outcome: &str) {
        self.tracking_lookups_total
            .with_label_values(&[outcome])
            .inc();
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
