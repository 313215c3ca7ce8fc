use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::messages;

pub struct MessageRepository {
    conn: DatabaseConnection,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<messages::Model>> {
        messages::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list messages")
    }

    pub async fn get(&self, id: i32) -> Result<Option<messages::Model>> {
        messages::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query message by id")
    }

    pub async fn list_by_room(&self, room_id: i32) -> Result<Vec<messages::Model>> {
        messages::Entity::find()
            .filter(messages::Column::RoomId.eq(room_id))
            .all(&self.conn)
            .await
            .context("Failed to list messages by room")
    }

    pub async fn insert(
        &self,
        text: String,
        created: DateTime<Utc>,
        room_id: i32,
        author_id: i32,
    ) -> Result<messages::Model> {
        let message = messages::ActiveModel {
            text: Set(text),
            created: Set(created),
            room_id: Set(room_id),
            author_id: Set(author_id),
            ..Default::default()
        };

        message.insert(&self.conn).await.context("Failed to insert message")
    }

    pub async fn save(&self, message: messages::Model) -> Result<messages::Model> {
        let active = messages::ActiveModel {
            id: Set(message.id),
            text: Set(message.text),
            created: Set(message.created),
            room_id: Set(message.room_id),
            author_id: Set(message.author_id),
        };

        active.update(&self.conn).await.context("Failed to update message")
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let res = messages::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete message")?;

        Ok(res.rows_affected)
    }

    pub async fn delete_all_by_room(&self, room_id: i32) -> Result<u64> {
        let res = messages::Entity::delete_many()
            .filter(messages::Column::RoomId.eq(room_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete messages by room")?;

        Ok(res.rows_affected)
    }
}
