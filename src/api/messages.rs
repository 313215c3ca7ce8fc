use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, MessageDto, MessagePatchRequest, NewMessageRequest,
    UpdateTextRequest,
};

/// GET /message
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MessageDto>>>, ApiError> {
    let messages = state.resources.messages().list().await?;
    let dtos = messages.into_iter().map(MessageDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /message/{id}
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let message = state.resources.messages().get(id).await?;
    Ok(Json(ApiResponse::success(MessageDto::from(message))))
}

/// GET /message/room/{room_id}
pub async fn list_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<MessageDto>>>, ApiError> {
    let messages = state.resources.messages().list_by_room(room_id).await?;
    let dtos = messages.into_iter().map(MessageDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// POST /message
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMessageRequest>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let message = state.resources.messages().create(payload).await?;
    Ok(Json(ApiResponse::success(MessageDto::from(message))))
}

/// PUT /message/{id}/text
pub async fn update_text(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTextRequest>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let message = state
        .resources
        .messages()
        .update_text(id, payload.text)
        .await?;
    Ok(Json(ApiResponse::success(MessageDto::from(message))))
}

/// PATCH /message/{id}
pub async fn patch_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<MessagePatchRequest>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let message = state.resources.messages().patch(id, payload).await?;
    Ok(Json(ApiResponse::success(MessageDto::from(message))))
}

/// DELETE /message/{id}
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.resources.messages().delete(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// DELETE /message/room/{room_id} — bulk removal used by the room
/// cascade; idempotent, returns the number of messages removed.
pub async fn delete_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i32>,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let removed = state
        .resources
        .messages()
        .delete_all_by_room(room_id)
        .await?;
    Ok(Json(ApiResponse::success(removed)))
}
