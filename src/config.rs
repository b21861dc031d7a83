use std::env;

use crate::error::AppError;

pub const DEFAULT_COURIER_BASE_URL: &str = "https://track.delhivery.com";
pub const DEFAULT_PUBLIC_TRACKING_URL: &str = "https://www.delhivery.com/track-v2/package";

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub courier_base_url: String,
    pub courier_api_token: String,
    pub public_tracking_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            courier_base_url: env::var("COURIER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_COURIER_BASE_URL.to_string()),
            courier_api_token: env::var("COURIER_API_TOKEN").unwrap_or_default(),
            public_tracking_url: env::var("COURIER_PUBLIC_TRACKING_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_TRACKING_URL.to_string()),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
