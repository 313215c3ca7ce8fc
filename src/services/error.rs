use thiserror::Error;

/// Shared error taxonomy for every resource component.
///
/// Validation and reference errors abort the enclosing write before
/// any row is touched; only cascade failures are ever swallowed (and
/// then logged) by the caller.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{resource} with id = {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("{field} = {value} does not reference an existing {resource}")]
    ReferenceNotFound {
        resource: &'static str,
        field: &'static str,
        value: i32,
    },

    #[error("{resource} with name {name} already exists")]
    DuplicateName {
        resource: &'static str,
        name: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("there is no role named {0}")]
    RoleNameNotFound(String),

    #[error("database error: {0}")]
    Database(String),
}

impl ResourceError {
    pub const fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub const fn reference(resource: &'static str, field: &'static str, value: i32) -> Self {
        Self::ReferenceNotFound {
            resource,
            field,
            value,
        }
    }

    pub fn duplicate(resource: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            resource,
            name: name.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Stable machine-readable discriminant for API responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::ReferenceNotFound { .. } => "reference_not_found",
            Self::DuplicateName { .. } => "duplicate_name",
            Self::Validation(_) => "validation",
            Self::RoleNameNotFound(_) => "role_name_not_found",
            Self::Database(_) => "database",
        }
    }
}

impl From<sea_orm::DbErr> for ResourceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ResourceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}
