//! Role resource component. No foreign fields, so no cross-reference
//! validation; consumed by the person component (default role, role
//! changes) and by the auth gateway.

use super::{Resources, ResourceError, validate};
use crate::db::Store;
use crate::entities::roles;

const RESOURCE: &str = "Role";

pub struct RoleService {
    ctx: Resources,
}

impl RoleService {
    #[must_use]
    pub(crate) const fn new(ctx: Resources) -> Self {
        Self { ctx }
    }

    fn store(&self) -> &Store {
        &self.ctx.store
    }

    pub async fn list(&self) -> Result<Vec<roles::Model>, ResourceError> {
        Ok(self.store().list_roles().await?)
    }

    pub async fn get(&self, id: i32) -> Result<roles::Model, ResourceError> {
        self.store()
            .get_role(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))
    }

    /// Lookup by name fails with the dedicated
    /// [`ResourceError::RoleNameNotFound`] so the default-role
    /// bootstrap path in person-create stays diagnosable.
    pub async fn get_by_name(&self, name: &str) -> Result<roles::Model, ResourceError> {
        self.store()
            .get_role_by_name(name)
            .await?
            .ok_or_else(|| ResourceError::RoleNameNotFound(name.to_string()))
    }

    pub async fn create(&self, name: String) -> Result<roles::Model, ResourceError> {
        self.check_name(&name).await?;
        Ok(self.store().insert_role(name).await?)
    }

    pub async fn update(&self, id: i32, name: String) -> Result<roles::Model, ResourceError> {
        self.check_name(&name).await?;

        let mut role = self
            .store()
            .get_role(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        role.name = name;
        Ok(self.store().save_role(role).await?)
    }

    pub async fn patch(&self, id: i32, name: Option<String>) -> Result<roles::Model, ResourceError> {
        let mut role = self
            .store()
            .get_role(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        if let Some(name) = name {
            self.check_name(&name).await?;
            role.name = name;
        }

        Ok(self.store().save_role(role).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ResourceError> {
        self.store().delete_role(id).await?;
        Ok(())
    }

    async fn check_name(&self, name: &str) -> Result<(), ResourceError> {
        validate::non_empty("name of role", name)?;
        if self.store().get_role_by_name(name).await?.is_some() {
            return Err(ResourceError::duplicate(RESOURCE, name));
        }
        Ok(())
    }
}
