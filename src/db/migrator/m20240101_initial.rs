use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Role granted to every signed-up person.
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// Role required for the general person-create path.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Seeded administrator credentials. The password is expected to be
/// rotated right after the first login.
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &[u8] = b"password";

fn hash_default_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(DEFAULT_ADMIN_PASSWORD, &salt)
        .expect("Failed to hash default password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Roles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(People)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Rooms)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Messages)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed the two built-in roles with fixed ids so the admin
        // person can reference the admin role deterministically.
        let seed_roles = sea_orm_migration::sea_query::Query::insert()
            .into_table(Roles)
            .columns([
                crate::entities::roles::Column::Id,
                crate::entities::roles::Column::Name,
            ])
            .values_panic([1.into(), DEFAULT_ROLE.into()])
            .values_panic([2.into(), ADMIN_ROLE.into()])
            .to_owned();

        manager.exec_stmt(seed_roles).await?;

        let now = chrono::Utc::now();
        let password_hash = hash_default_password();

        let seed_admin = sea_orm_migration::sea_query::Query::insert()
            .into_table(People)
            .columns([
                crate::entities::people::Column::Name,
                crate::entities::people::Column::Password,
                crate::entities::people::Column::Created,
                crate::entities::people::Column::RoleId,
            ])
            .values_panic([
                DEFAULT_ADMIN_USERNAME.into(),
                password_hash.into(),
                now.into(),
                2.into(),
            ])
            .to_owned();

        manager.exec_stmt(seed_admin).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(People).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles).to_owned())
            .await?;

        Ok(())
    }
}
