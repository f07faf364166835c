use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;
use crate::domain::order::Order;
use crate::error::AppError;
use crate::payment::{self, PaymentInstructions};
use crate::services::orders::{OrderStatusView, PlaceOrderRequest};

pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.orders.place_order(req)?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.get(id)?))
}

/// Polled by the customer's order page.
pub async fn order_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<OrderStatusView>, AppError> {
    Ok(Json(state.orders.status(id)?))
}

pub async fn payment_instructions(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<PaymentInstructions>, AppError> {
    let order = state.orders.get(id)?;
    let instructions = payment::for_order(
        &order,
        &state.config.upi_payee_id,
        &state.config.upi_payee_name,
    )?;
    Ok(Json(instructions))
}
