use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::courier::{CourierClient, CourierError};

pub struct DelhiveryClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl DelhiveryClient {
    pub fn new(base_url: &str, api_token: &str) -> Result<Self, CourierError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| CourierError::Transport(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    fn packages_url(&self) -> String {
        format!("{}/api/v1/packages/json/", self.base_url)
    }
}

#[async_trait]
impl CourierClient for DelhiveryClient {
    async fn fetch_shipments(&self, waybill: &str) -> Result<Value, CourierError> {
        let response = self
            .http
            .get(self.packages_url())
            .query(&[("waybill", waybill)])
            .header("Authorization", format!("Token {}", self.api_token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|err| CourierError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_string());
            warn!(status = status.as_u16(), body = %body, "courier api error");

            return Err(CourierError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| CourierError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::DelhiveryClient;

    #[test]
    fn packages_url_strips_trailing_slash() {
        let client = DelhiveryClient::new("https://track.example.com/", "token").unwrap();
        assert_eq!(
            client.packages_url(),
            "https://track.example.com/api/v1/packages/json/"
        );
    }
}
