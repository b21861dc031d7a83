use std::sync::Arc;

use order_tracker::courier::delhivery::DelhiveryClient;
use order_tracker::error::AppError;
use order_tracker::{api, config, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    if config.courier_api_token.is_empty() {
        tracing::warn!("COURIER_API_TOKEN is not set; courier lookups will be unauthenticated");
    }

    let courier = DelhiveryClient::new(&config.courier_base_url, &config.courier_api_token)
        .map_err(|err| AppError::Internal(format!("failed to build courier client: {err}")))?;

    let app_state = state::AppState::new(Arc::new(courier))
        .with_public_tracking_url(config.public_tracking_url.clone());
    let app = api::rest::router(Arc::new(app_state));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        courier = %config.courier_base_url,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
