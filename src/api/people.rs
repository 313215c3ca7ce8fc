use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, ChangeRoleRequest, NewPersonRequest, PersonDto,
    PersonPatchRequest, UpdatePersonRequest,
};
use crate::services::Principal;

/// GET /person
pub async fn list_people(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PersonDto>>>, ApiError> {
    let people = state.resources.people().list().await?;

    let dtos = people
        .into_iter()
        .map(|(person, rooms)| PersonDto::from(person).with_rooms(rooms))
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /person/{id}
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PersonDto>>, ApiError> {
    let (person, rooms) = state.resources.people().get(id).await?;
    Ok(Json(ApiResponse::success(
        PersonDto::from(person).with_rooms(rooms),
    )))
}

/// POST /person — administrative creation, same semantics as sign-up
/// but restricted to admin callers.
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<NewPersonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PersonDto>>), ApiError> {
    if !principal.is_admin() {
        return Err(ApiError::Forbidden(
            "Creating people requires the admin role".to_string(),
        ));
    }

    let person = state.resources.people().create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PersonDto::from(person))),
    ))
}

/// POST /person/sign-up — public registration with the default role.
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPersonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PersonDto>>), ApiError> {
    let person = state.resources.people().create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PersonDto::from(person))),
    ))
}

/// PUT /person
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdatePersonRequest>,
) -> Result<Json<ApiResponse<PersonDto>>, ApiError> {
    let person = state.resources.people().update(payload).await?;
    Ok(Json(ApiResponse::success(PersonDto::from(person))))
}

/// PUT /person/{id}/role
pub async fn change_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<PersonDto>>, ApiError> {
    let person = state
        .resources
        .people()
        .change_role(id, payload.role_id)
        .await?;
    Ok(Json(ApiResponse::success(PersonDto::from(person))))
}

/// PATCH /person/{id}
pub async fn patch_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<PersonPatchRequest>,
) -> Result<Json<ApiResponse<PersonDto>>, ApiError> {
    let person = state.resources.people().patch(id, payload).await?;
    Ok(Json(ApiResponse::success(PersonDto::from(person))))
}

/// DELETE /person/{id}
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.resources.people().delete(id).await?;
    Ok(Json(ApiResponse::success(())))
}
