use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::domain::order::{Decision, Order};
use crate::error::AppError;
use crate::middleware::auth::bearer_token;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state.sessions.login(&req.username, &req.password)?;
    Ok(Json(LoginResponse { token }))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    // The auth middleware has already validated this token.
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("missing admin token".to_string()))?;
    state.sessions.logout(&token)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.list()?))
}

pub async fn decide(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.decide(id, req.decision)?))
}

pub async fn mark_paid(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.mark_paid(id)?))
}
