use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, NewRoomRequest, RenameRoomRequest, RoomDto, RoomPatchRequest,
};

/// GET /room
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError> {
    let rooms = state.resources.rooms().list().await?;
    let dtos = rooms.into_iter().map(RoomDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /room/{id} — enriched with the room's messages.
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError> {
    let (room, messages) = state.resources.rooms().get(id).await?;
    Ok(Json(ApiResponse::success(
        RoomDto::from(room).with_messages(messages),
    )))
}

/// GET /room/author/{author_id}
pub async fn list_rooms_by_author(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError> {
    let rooms = state.resources.rooms().list_by_author(author_id).await?;
    let dtos = rooms.into_iter().map(RoomDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// POST /room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewRoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError> {
    let room = state.resources.rooms().create(payload).await?;
    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

/// PUT /room/{id}/name
pub async fn rename_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<RenameRoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError> {
    let room = state.resources.rooms().update_name(id, payload.name).await?;
    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

/// PATCH /room/{id}
pub async fn patch_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<RoomPatchRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError> {
    let room = state.resources.rooms().patch(id, payload).await?;
    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

/// DELETE /room/{id}
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.resources.rooms().delete(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// DELETE /room/author/{author_id} — removes every room the author
/// owns, messages first. Returns the number of rooms removed.
pub async fn delete_rooms_by_author(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<i32>,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let removed = state
        .resources
        .rooms()
        .delete_all_by_author(author_id)
        .await?;
    Ok(Json(ApiResponse::success(removed)))
}
