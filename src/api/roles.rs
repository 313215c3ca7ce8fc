use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, NewRoleRequest, RoleDto, RolePatchRequest, UpdateRoleRequest,
};

/// GET /role
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RoleDto>>>, ApiError> {
    let roles = state.resources.roles().list().await?;
    let dtos = roles.into_iter().map(RoleDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /role/{id}
pub async fn get_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state.resources.roles().get(id).await?;
    Ok(Json(ApiResponse::success(RoleDto::from(role))))
}

/// GET /role/name/{name} — public lookup used during registration
/// flows, before the caller holds a token.
pub async fn get_role_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state.resources.roles().get_by_name(&name).await?;
    Ok(Json(ApiResponse::success(RoleDto::from(role))))
}

/// POST /role
pub async fn create_role(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewRoleRequest>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state.resources.roles().create(payload.name).await?;
    Ok(Json(ApiResponse::success(RoleDto::from(role))))
}

/// PUT /role
pub async fn update_role(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state
        .resources
        .roles()
        .update(payload.id, payload.name)
        .await?;
    Ok(Json(ApiResponse::success(RoleDto::from(role))))
}

/// PATCH /role/{id}
pub async fn patch_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<RolePatchRequest>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state.resources.roles().patch(id, payload.name).await?;
    Ok(Json(ApiResponse::success(RoleDto::from(role))))
}

/// DELETE /role/{id}
pub async fn delete_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.resources.roles().delete(id).await?;
    Ok(Json(ApiResponse::success(())))
}
