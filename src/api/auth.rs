use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LoginRequest, TokenResponse};

/// Authentication middleware for every protected route.
///
/// Verification fails closed: a missing, malformed, or invalid
/// `Authorization: Bearer` header rejects the request before any
/// resource component runs. On success the resolved
/// [`crate::services::Principal`] is attached to the request
/// extensions for the handlers that care about the caller's role.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let principal = state.resources.auth().authenticate(token).await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// POST /auth/login
/// Verifies credentials and returns a signed bearer token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let token = state
        .resources
        .auth()
        .issue_token(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(TokenResponse { token })))
}
