//! Person resource component.
//!
//! Owns the `people` table. Reads are enriched with the rooms the
//! person authored by querying the room component; writes validate
//! the default-role reference through the role component. Deletes
//! cascade into the room component best-effort: a failed cascade is
//! logged and the person's own deletion proceeds regardless.

use chrono::Utc;
use tracing::warn;

use super::{Resources, ResourceError, validate};
use crate::api::types::{NewPersonRequest, PersonPatchRequest, UpdatePersonRequest};
use crate::db::{DEFAULT_ROLE, Store, hash_password};
use crate::entities::{people, rooms};

const RESOURCE: &str = "Person";

pub struct PersonService {
    ctx: Resources,
}

impl PersonService {
    #[must_use]
    pub(crate) const fn new(ctx: Resources) -> Self {
        Self { ctx }
    }

    fn store(&self) -> &Store {
        &self.ctx.store
    }

    /// Every person, each enriched with its authored rooms. An
    /// enrichment failure fails the whole listing.
    pub async fn list(&self) -> Result<Vec<(people::Model, Vec<rooms::Model>)>, ResourceError> {
        let people = self.store().list_people().await?;
        let rooms = self.ctx.rooms();

        let mut enriched = Vec::with_capacity(people.len());
        for person in people {
            let authored = rooms.list_by_author(person.id).await?;
            enriched.push((person, authored));
        }

        Ok(enriched)
    }

    pub async fn get(&self, id: i32) -> Result<(people::Model, Vec<rooms::Model>), ResourceError> {
        let person = self
            .store()
            .get_person(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        let authored = self.ctx.rooms().list_by_author(person.id).await?;
        Ok((person, authored))
    }

    /// Creates a person with the default role. Exactly one role lookup
    /// per create; a missing seed role is a diagnosable
    /// [`ResourceError::RoleNameNotFound`].
    pub async fn create(&self, req: NewPersonRequest) -> Result<people::Model, ResourceError> {
        self.check_name(&req.name).await?;
        validate::password_length(&req.password)?;

        let created = match req.created {
            Some(ts) => {
                validate::past_only("created", ts)?;
                ts
            }
            None => Utc::now(),
        };

        let default_role = self.ctx.roles().get_by_name(DEFAULT_ROLE).await?;
        let password_hash = self.hash(req.password).await?;

        let person = self
            .store()
            .insert_person(req.name, password_hash, created, default_role.id)
            .await?;

        Ok(person)
    }

    /// Full update. The stored `role_id` is preserved; clients cannot
    /// change a role through this path.
    pub async fn update(&self, req: UpdatePersonRequest) -> Result<people::Model, ResourceError> {
        self.check_name(&req.name).await?;
        validate::password_length(&req.password)?;
        if let Some(ts) = req.created {
            validate::past_only("created", ts)?;
        }

        let existing = self
            .store()
            .get_person(req.id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, req.id))?;

        let password_hash = self.hash(req.password).await?;

        let person = people::Model {
            id: existing.id,
            name: req.name,
            password: password_hash,
            created: req.created.unwrap_or(existing.created),
            role_id: existing.role_id,
        };

        Ok(self.store().save_person(person).await?)
    }

    pub async fn change_role(&self, id: i32, role_id: i32) -> Result<people::Model, ResourceError> {
        let role = self.check_role_id(role_id).await?;

        let mut person = self
            .store()
            .get_person(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        person.role_id = role.id;
        Ok(self.store().save_person(person).await?)
    }

    /// Applies only the fields present in the patch, each validated
    /// before assignment. A `role_id` of 0 means "not provided", so
    /// role id 0 can never be set through this path.
    pub async fn patch(
        &self,
        id: i32,
        patch: PersonPatchRequest,
    ) -> Result<people::Model, ResourceError> {
        let mut person = self
            .store()
            .get_person(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        if let Some(name) = patch.name {
            self.check_name(&name).await?;
            person.name = name;
        }
        if let Some(password) = patch.password {
            validate::password_length(&password)?;
            person.password = self.hash(password).await?;
        }
        if let Some(created) = patch.created {
            validate::past_only("created", created)?;
            person.created = created;
        }
        if patch.role_id != 0 {
            self.check_role_id(patch.role_id).await?;
            person.role_id = patch.role_id;
        }

        Ok(self.store().save_person(person).await?)
    }

    /// Deletes the person, cascading into every room they authored
    /// (which in turn cascades into messages). The cascade is
    /// best-effort: its failure never blocks the person's own
    /// deletion, so a reader can observe rooms whose author is gone
    /// until a later cleanup.
    pub async fn delete(&self, id: i32) -> Result<(), ResourceError> {
        if let Err(e) = self.ctx.rooms().delete_all_by_author(id).await {
            warn!("Cascade delete of rooms for person {id} failed: {e}");
        }

        self.store().delete_person(id).await?;
        Ok(())
    }

    async fn check_name(&self, name: &str) -> Result<(), ResourceError> {
        validate::non_empty("person's name", name)?;
        if self.store().get_person_by_name(name).await?.is_some() {
            return Err(ResourceError::duplicate(RESOURCE, name));
        }
        Ok(())
    }

    async fn check_role_id(&self, role_id: i32) -> Result<crate::entities::roles::Model, ResourceError> {
        match self.ctx.roles().get(role_id).await {
            Ok(role) => Ok(role),
            Err(ResourceError::NotFound { .. }) => {
                Err(ResourceError::reference("Role", "roleId", role_id))
            }
            Err(other) => Err(other),
        }
    }

    /// Argon2 hashing is CPU-intensive, so it runs on a blocking task.
    async fn hash(&self, password: String) -> Result<String, ResourceError> {
        let security = self.ctx.security.clone();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .map_err(|e| ResourceError::Database(format!("hashing task panicked: {e}")))??;
        Ok(hash)
    }
}
