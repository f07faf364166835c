pub mod admin;
pub mod menu;
pub mod orders;
pub mod ws;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub orders: usize,
    pub feed_subscribers: usize,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    // The store is the only stateful dependency; a poisoned lock is the one
    // way this service can be unhealthy.
    let (status_code, status, orders) = match state.orders.count() {
        Ok(orders) => (StatusCode::OK, "healthy", orders),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", 0),
    };

    let health_response = HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        orders,
        feed_subscribers: state.feed.subscriber_count(),
    };

    (status_code, Json(health_response))
}
