use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::roles;

pub struct RoleRepository {
    conn: DatabaseConnection,
}

impl RoleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<roles::Model>> {
        roles::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list roles")
    }

    pub async fn get(&self, id: i32) -> Result<Option<roles::Model>> {
        roles::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query role by id")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<roles::Model>> {
        roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query role by name")
    }

    pub async fn insert(&self, name: String) -> Result<roles::Model> {
        let role = roles::ActiveModel {
            name: Set(name),
            ..Default::default()
        };

        role.insert(&self.conn).await.context("Failed to insert role")
    }

    pub async fn save(&self, role: roles::Model) -> Result<roles::Model> {
        let active = roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name),
        };

        active.update(&self.conn).await.context("Failed to update role")
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let res = roles::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete role")?;

        Ok(res.rows_affected)
    }
}
