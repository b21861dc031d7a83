use std::sync::Arc;

use crate::config::DEFAULT_PUBLIC_TRACKING_URL;
use crate::courier::CourierClient;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub courier: Arc<dyn CourierClient>,
    pub public_tracking_url: String,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(courier: Arc<dyn CourierClient>) -> Self {
        Self {
            courier,
            public_tracking_url: DEFAULT_PUBLIC_TRACKING_URL.to_string(),
            metrics: Metrics::new(),
        }
    }

    pub fn with_public_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.public_tracking_url = url.into();
        self
    }
}
