use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{messages, people, roles, rooms};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            error_kind: None,
        }
    }

    pub fn error_with_kind(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            error_kind: Some(kind),
        }
    }
}

// ============================================================================
// Read views
//
// Distinct from the stored entities: the password hash is never
// serialized, and the `rooms`/`messages` lists are request-scoped
// enrichment, never written back to the store.
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PersonDto {
    pub id: i32,
    pub name: String,
    pub created: DateTime<Utc>,
    pub role_id: i32,
    pub rooms: Vec<RoomDto>,
}

impl From<people::Model> for PersonDto {
    fn from(model: people::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created: model.created,
            role_id: model.role_id,
            rooms: Vec::new(),
        }
    }
}

impl PersonDto {
    #[must_use]
    pub fn with_rooms(mut self, rooms: Vec<rooms::Model>) -> Self {
        self.rooms = rooms.into_iter().map(RoomDto::from).collect();
        self
    }
}

#[derive(Debug, Serialize)]
pub struct RoomDto {
    pub id: i32,
    pub name: String,
    pub created: DateTime<Utc>,
    pub author_id: i32,
    pub messages: Vec<MessageDto>,
}

impl From<rooms::Model> for RoomDto {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created: model.created,
            author_id: model.author_id,
            messages: Vec::new(),
        }
    }
}

impl RoomDto {
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<messages::Model>) -> Self {
        self.messages = messages.into_iter().map(MessageDto::from).collect();
        self
    }
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub id: i32,
    pub text: String,
    pub created: DateTime<Utc>,
    pub room_id: i32,
    pub author_id: i32,
}

impl From<messages::Model> for MessageDto {
    fn from(model: messages::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            created: model.created,
            room_id: model.room_id,
            author_id: model.author_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
}

impl From<roles::Model> for RoleDto {
    fn from(model: roles::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

// ============================================================================
// Write requests
//
// Partial-update payloads use the sentinel-zero convention for
// foreign-key fields: an absent (or explicit 0) id means "field not
// provided" and skips validation entirely.
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NewPersonRequest {
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePersonRequest {
    pub id: i32,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PersonPatchRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub role_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct NewRoomRequest {
    pub name: String,
    pub author_id: i32,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RenameRoomRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomPatchRequest {
    pub name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct NewMessageRequest {
    pub text: String,
    pub room_id: i32,
    pub author_id: i32,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MessagePatchRequest {
    pub text: Option<String>,
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub room_id: i32,
    #[serde(default)]
    pub author_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct NewRoleRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RolePatchRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
