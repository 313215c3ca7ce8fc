use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use parley::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Default admin credentials seeded by the initial migration.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "password";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = parley::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    parley::api::router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"username": username, "password": password}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, token: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn sign_up_request(name: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/person/sign-up")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({"name": name, "password": password}).to_string(),
        ))
        .unwrap()
}

async fn sign_up(app: &Router, name: &str, password: &str) -> Value {
    let response = app
        .clone()
        .oneshot(sign_up_request(name, password))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/person")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(get("/api/room", "not-a-real-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"username": ADMIN_USERNAME, "password": "wrong"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_issues_usable_token() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app.clone().oneshot(get("/api/person", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].is_array());
}

#[tokio::test]
async fn test_sign_up_assigns_default_role() {
    let app = spawn_app().await;

    let body = sign_up(&app, "alice", "sunshine").await;
    assert_eq!(body["data"]["name"], "alice");
    assert_eq!(body["data"]["role_id"], 1);
    // The password hash never leaves the server.
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_sign_up_duplicate_name_rejected() {
    let app = spawn_app().await;

    sign_up(&app, "alice", "sunshine").await;

    let response = app
        .clone()
        .oneshot(sign_up_request("alice", "sunshine"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_kind"], "duplicate_name");
}

#[tokio::test]
async fn test_concurrent_sign_up_same_name_stores_one_row() {
    let app = spawn_app().await;

    // Both requests can pass the lookup-based uniqueness check before
    // either row lands; the unique name column decides the loser,
    // which surfaces as 400 or 500 depending on where it lost.
    let (first, second) = tokio::join!(
        app.clone().oneshot(sign_up_request("carol", "sunshine")),
        app.clone().oneshot(sign_up_request("carol", "sunshine"))
    );

    let statuses = [first.unwrap().status(), second.unwrap().status()];
    let created = statuses
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1, "unexpected statuses: {statuses:?}");

    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let response = app.clone().oneshot(get("/api/person", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let carols = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["name"] == "carol")
        .count();
    assert_eq!(carols, 1);
}

#[tokio::test]
async fn test_sign_up_rejects_short_password() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/person/sign-up")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"name": "bob", "password": "abc"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_kind"], "validation");
}

#[tokio::test]
async fn test_sign_up_rejects_future_created() {
    let app = spawn_app().await;

    let future = chrono::Utc::now() + chrono::Duration::hours(1);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/person/sign-up")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"name": "bob", "password": "sunshine", "created": future})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_kind"], "validation");
}

#[tokio::test]
async fn test_person_create_is_admin_only() {
    let app = spawn_app().await;

    sign_up(&app, "alice", "sunshine").await;
    let user_token = login(&app, "alice", "sunshine").await;

    let payload = json!({"name": "bob", "password": "sunshine"});
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/person", &user_token, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/person", &admin_token, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "bob");
}

#[tokio::test]
async fn test_change_role_validates_reference() {
    let app = spawn_app().await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/api/person/{alice_id}/role"),
            &token,
            &json!({"role_id": 999}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_kind"], "reference_not_found");

    // Promote to the seeded admin role.
    let response = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/api/person/{alice_id}/role"),
            &token,
            &json!({"role_id": 2}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["role_id"], 2);
}

#[tokio::test]
async fn test_room_create_validates_author() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/room",
            &token,
            &json!({"name": "General", "author_id": 999}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_kind"], "reference_not_found");
}

#[tokio::test]
async fn test_message_create_requires_text_and_references() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/room",
            &token,
            &json!({"name": "General", "author_id": alice_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let room_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/message",
            &token,
            &json!({"text": "", "room_id": room_id, "author_id": alice_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_kind"], "validation");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/message",
            &token,
            &json!({"text": "hi", "room_id": 999, "author_id": alice_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_kind"], "reference_not_found");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/message",
            &token,
            &json!({"text": "hi", "room_id": room_id, "author_id": alice_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["text"], "hi");
}

#[tokio::test]
async fn test_room_get_includes_messages() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/room",
            &token,
            &json!({"name": "General", "author_id": alice_id}),
        ))
        .await
        .unwrap();
    let room_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    for text in ["first", "second"] {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/message",
                &token,
                &json!({"text": text, "room_id": room_id, "author_id": alice_id}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get(&format!("/api/room/{room_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_person_delete_cascades_to_rooms_and_messages() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/room",
            &token,
            &json!({"name": "General", "author_id": alice_id}),
        ))
        .await
        .unwrap();
    let room_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/message",
            &token,
            &json!({"text": "hi", "room_id": room_id, "author_id": alice_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/person/{alice_id}"))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/person/{alice_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/room/{room_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/message/room/{room_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_patch_applies_only_present_fields() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();

    // Name only: the role must stay untouched.
    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &format!("/api/person/{alice_id}"),
            &token,
            &json!({"name": "alice2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "alice2");
    assert_eq!(body["data"]["role_id"], 1);

    // An explicit zero role_id means "not provided", never a reference error.
    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &format!("/api/person/{alice_id}"),
            &token,
            &json!({"role_id": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["role_id"], 1);
}

#[tokio::test]
async fn test_room_patch_zero_author_skips_reference_check() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/room",
            &token,
            &json!({"name": "General", "author_id": alice_id}),
        ))
        .await
        .unwrap();
    let room_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &format!("/api/room/{room_id}"),
            &token,
            &json!({"name": "Lobby", "author_id": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Lobby");
    assert_eq!(body["data"]["author_id"], alice_id);
}

#[tokio::test]
async fn test_delete_room_messages_is_idempotent() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/room",
            &token,
            &json!({"name": "General", "author_id": alice_id}),
        ))
        .await
        .unwrap();
    let room_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/message",
            &token,
            &json!({"text": "hi", "room_id": room_id, "author_id": alice_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/message/room/{room_id}"))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/message/room/{room_id}"))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 0);
}

#[tokio::test]
async fn test_role_lookup_by_name_is_public() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/role/name/ROLE_USER")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "ROLE_USER");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/role/name/ROLE_GHOST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_kind"], "role_name_not_found");
}

#[tokio::test]
async fn test_role_crud() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/role", &token, &json!({"name": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_kind"], "validation");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/role",
            &token,
            &json!({"name": "ROLE_MODERATOR"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let role_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "PUT",
            "/api/role",
            &token,
            &json!({"id": role_id, "name": "ROLE_MOD"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "ROLE_MOD");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/role/{role_id}"))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/role/{role_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_person_list_includes_authored_rooms() {
    let app = spawn_app().await;
    let token = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let alice = sign_up(&app, "alice", "sunshine").await;
    let alice_id = alice["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/room",
            &token,
            &json!({"name": "General", "author_id": alice_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/person/{alice_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rooms = body["data"]["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["name"], "General");
}
