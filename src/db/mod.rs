use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{messages, people, roles, rooms};

pub mod migrator;
pub mod repositories;

pub use migrator::{ADMIN_ROLE, DEFAULT_ROLE};
pub use repositories::person::hash_password;

/// One logical store per entity kind, all sharing a single sqlite
/// connection pool. Each resource component only ever touches its own
/// tables through the repository accessors below; cross-entity
/// consistency is the components' job, not the store's.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn person_repo(&self) -> repositories::person::PersonRepository {
        repositories::person::PersonRepository::new(self.conn.clone())
    }

    fn room_repo(&self) -> repositories::room::RoomRepository {
        repositories::room::RoomRepository::new(self.conn.clone())
    }

    fn message_repo(&self) -> repositories::message::MessageRepository {
        repositories::message::MessageRepository::new(self.conn.clone())
    }

    fn role_repo(&self) -> repositories::role::RoleRepository {
        repositories::role::RoleRepository::new(self.conn.clone())
    }

    // People

    pub async fn list_people(&self) -> Result<Vec<people::Model>> {
        self.person_repo().list().await
    }

    pub async fn get_person(&self, id: i32) -> Result<Option<people::Model>> {
        self.person_repo().get(id).await
    }

    pub async fn get_person_by_name(&self, name: &str) -> Result<Option<people::Model>> {
        self.person_repo().get_by_name(name).await
    }

    pub async fn insert_person(
        &self,
        name: String,
        password_hash: String,
        created: DateTime<Utc>,
        role_id: i32,
    ) -> Result<people::Model> {
        self.person_repo()
            .insert(name, password_hash, created, role_id)
            .await
    }

    pub async fn save_person(&self, person: people::Model) -> Result<people::Model> {
        self.person_repo().save(person).await
    }

    pub async fn delete_person(&self, id: i32) -> Result<u64> {
        self.person_repo().delete(id).await
    }

    pub async fn verify_person_password(&self, name: &str, password: &str) -> Result<bool> {
        self.person_repo().verify_password(name, password).await
    }

    // Rooms

    pub async fn list_rooms(&self) -> Result<Vec<rooms::Model>> {
        self.room_repo().list().await
    }

    pub async fn get_room(&self, id: i32) -> Result<Option<rooms::Model>> {
        self.room_repo().get(id).await
    }

    pub async fn get_room_by_name(&self, name: &str) -> Result<Option<rooms::Model>> {
        self.room_repo().get_by_name(name).await
    }

    pub async fn list_rooms_by_author(&self, author_id: i32) -> Result<Vec<rooms::Model>> {
        self.room_repo().list_by_author(author_id).await
    }

    pub async fn insert_room(
        &self,
        name: String,
        created: DateTime<Utc>,
        author_id: i32,
    ) -> Result<rooms::Model> {
        self.room_repo().insert(name, created, author_id).await
    }

    pub async fn save_room(&self, room: rooms::Model) -> Result<rooms::Model> {
        self.room_repo().save(room).await
    }

    pub async fn delete_room(&self, id: i32) -> Result<u64> {
        self.room_repo().delete(id).await
    }

    pub async fn delete_rooms_by_author(&self, author_id: i32) -> Result<u64> {
        self.room_repo().delete_all_by_author(author_id).await
    }

    // Messages

    pub async fn list_messages(&self) -> Result<Vec<messages::Model>> {
        self.message_repo().list().await
    }

    pub async fn get_message(&self, id: i32) -> Result<Option<messages::Model>> {
        self.message_repo().get(id).await
    }

    pub async fn list_messages_by_room(&self, room_id: i32) -> Result<Vec<messages::Model>> {
        self.message_repo().list_by_room(room_id).await
    }

    pub async fn insert_message(
        &self,
        text: String,
        created: DateTime<Utc>,
        room_id: i32,
        author_id: i32,
    ) -> Result<messages::Model> {
        self.message_repo()
            .insert(text, created, room_id, author_id)
            .await
    }

    pub async fn save_message(&self, message: messages::Model) -> Result<messages::Model> {
        self.message_repo().save(message).await
    }

    pub async fn delete_message(&self, id: i32) -> Result<u64> {
        self.message_repo().delete(id).await
    }

    pub async fn delete_messages_by_room(&self, room_id: i32) -> Result<u64> {
        self.message_repo().delete_all_by_room(room_id).await
    }

    // Roles

    pub async fn list_roles(&self) -> Result<Vec<roles::Model>> {
        self.role_repo().list().await
    }

    pub async fn get_role(&self, id: i32) -> Result<Option<roles::Model>> {
        self.role_repo().get(id).await
    }

    pub async fn get_role_by_name(&self, name: &str) -> Result<Option<roles::Model>> {
        self.role_repo().get_by_name(name).await
    }

    pub async fn insert_role(&self, name: String) -> Result<roles::Model> {
        self.role_repo().insert(name).await
    }

    pub async fn save_role(&self, role: roles::Model) -> Result<roles::Model> {
        self.role_repo().save(role).await
    }

    pub async fn delete_role(&self, id: i32) -> Result<u64> {
        self.role_repo().delete(id).await
    }
}
