use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::rooms;

pub struct RoomRepository {
    conn: DatabaseConnection,
}

impl RoomRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<rooms::Model>> {
        rooms::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list rooms")
    }

    pub async fn get(&self, id: i32) -> Result<Option<rooms::Model>> {
        rooms::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query room by id")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<rooms::Model>> {
        rooms::Entity::find()
            .filter(rooms::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query room by name")
    }

    pub async fn list_by_author(&self, author_id: i32) -> Result<Vec<rooms::Model>> {
        rooms::Entity::find()
            .filter(rooms::Column::AuthorId.eq(author_id))
            .all(&self.conn)
            .await
            .context("Failed to list rooms by author")
    }

    pub async fn insert(
        &self,
        name: String,
        created: DateTime<Utc>,
        author_id: i32,
    ) -> Result<rooms::Model> {
        let room = rooms::ActiveModel {
            name: Set(name),
            created: Set(created),
            author_id: Set(author_id),
            ..Default::default()
        };

        room.insert(&self.conn).await.context("Failed to insert room")
    }

    pub async fn save(&self, room: rooms::Model) -> Result<rooms::Model> {
        let active = rooms::ActiveModel {
            id: Set(room.id),
            name: Set(room.name),
            created: Set(room.created),
            author_id: Set(room.author_id),
        };

        active.update(&self.conn).await.context("Failed to update room")
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let res = rooms::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete room")?;

        Ok(res.rows_affected)
    }

    pub async fn delete_all_by_author(&self, author_id: i32) -> Result<u64> {
        let res = rooms::Entity::delete_many()
            .filter(rooms::Column::AuthorId.eq(author_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete rooms by author")?;

        Ok(res.rows_affected)
    }
}
