use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;

/// Bearer-token guard for admin-only routes. Rejections carry no order data.
pub async fn admin_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("missing admin token".to_string()))?;

    if !state.sessions.is_valid(&token) {
        tracing::warn!("rejected admin request with invalid session token");
        return Err(AppError::Unauthorized(
            "invalid or expired admin token".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

/// Accepts both `Authorization: Bearer <token>` and a bare token value.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header);
    Uuid::parse_str(token.trim()).ok()
}
