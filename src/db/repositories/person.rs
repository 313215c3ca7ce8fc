use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::people;

pub struct PersonRepository {
    conn: DatabaseConnection,
}

impl PersonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<people::Model>> {
        people::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list people")
    }

    pub async fn get(&self, id: i32) -> Result<Option<people::Model>> {
        people::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query person by id")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<people::Model>> {
        people::Entity::find()
            .filter(people::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query person by name")
    }

    pub async fn insert(
        &self,
        name: String,
        password_hash: String,
        created: DateTime<Utc>,
        role_id: i32,
    ) -> Result<people::Model> {
        let person = people::ActiveModel {
            name: Set(name),
            password: Set(password_hash),
            created: Set(created),
            role_id: Set(role_id),
            ..Default::default()
        };

        person.insert(&self.conn).await.context("Failed to insert person")
    }

    pub async fn save(&self, person: people::Model) -> Result<people::Model> {
        let active = people::ActiveModel {
            id: Set(person.id),
            name: Set(person.name),
            password: Set(person.password),
            created: Set(person.created),
            role_id: Set(person.role_id),
        };

        active.update(&self.conn).await.context("Failed to update person")
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let res = people::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete person")?;

        Ok(res.rows_affected)
    }

    /// Verify a plaintext password against the stored hash.
    /// Note: runs on `spawn_blocking` because Argon2 is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(&self, name: &str, password: &str) -> Result<bool> {
        let person = self
            .get_by_name(name)
            .await
            .context("Failed to query person for password verification")?;

        let Some(person) = person else {
            return Ok(false);
        };

        let password_hash = person.password;
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the crate defaults.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
