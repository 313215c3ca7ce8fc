use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::Resources;

pub mod auth;
mod error;
mod messages;
mod people;
mod roles;
mod rooms;
pub mod types;

pub use error::ApiError;
pub use types::*;

pub struct AppState {
    pub resources: Resources,
    pub config: Config,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let resources = Resources::new(store, config.security.clone());

    Ok(Arc::new(AppState { resources, config }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/login", post(auth::login))
        .route("/person/sign-up", post(people::sign_up))
        .route("/role/name/{name}", get(roles::get_role_by_name))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/person", get(people::list_people))
        .route("/person/{id}", get(people::get_person))
        .route("/person", post(people::create_person))
        .route("/person", put(people::update_person))
        .route("/person/{id}/role", put(people::change_role))
        .route("/person/{id}", patch(people::patch_person))
        .route("/person/{id}", delete(people::delete_person))
        .route("/room", get(rooms::list_rooms))
        .route("/room/{id}", get(rooms::get_room))
        .route("/room/author/{author_id}", get(rooms::list_rooms_by_author))
        .route("/room", post(rooms::create_room))
        .route("/room/{id}/name", put(rooms::rename_room))
        .route("/room/{id}", patch(rooms::patch_room))
        .route("/room/{id}", delete(rooms::delete_room))
        .route(
            "/room/author/{author_id}",
            delete(rooms::delete_rooms_by_author),
        )
        .route("/message", get(messages::list_messages))
        .route("/message/{id}", get(messages::get_message))
        .route("/message/room/{room_id}", get(messages::list_room_messages))
        .route("/message", post(messages::create_message))
        .route("/message/{id}/text", put(messages::update_text))
        .route("/message/{id}", patch(messages::patch_message))
        .route("/message/{id}", delete(messages::delete_message))
        .route(
            "/message/room/{room_id}",
            delete(messages::delete_room_messages),
        )
        .route("/role", get(roles::list_roles))
        .route("/role/{id}", get(roles::get_role))
        .route("/role", post(roles::create_role))
        .route("/role", put(roles::update_role))
        .route("/role/{id}", patch(roles::patch_role))
        .route("/role/{id}", delete(roles::delete_role))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
