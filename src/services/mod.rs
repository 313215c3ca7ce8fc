pub mod auth;
pub mod error;
pub mod message;
pub mod person;
pub mod role;
pub mod room;
pub mod validate;

pub use auth::{AuthError, AuthGateway, Principal};
pub use error::ResourceError;
pub use message::MessageService;
pub use person::PersonService;
pub use role::RoleService;
pub use room::RoomService;

use crate::config::SecurityConfig;
use crate::db::Store;

/// Shared handle the resource components are constructed from.
///
/// Each component owns the store access for its own entity kind and
/// reaches sibling components only through their public operations, so
/// the call graph stays identical if the components are ever split
/// across processes. A failed sibling lookup surfaces as a recoverable
/// [`ResourceError`], never as a crash.
#[derive(Clone)]
pub struct Resources {
    pub store: Store,
    pub security: SecurityConfig,
}

impl Resources {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    #[must_use]
    pub fn people(&self) -> PersonService {
        PersonService::new(self.clone())
    }

    #[must_use]
    pub fn rooms(&self) -> RoomService {
        RoomService::new(self.clone())
    }

    #[must_use]
    pub fn messages(&self) -> MessageService {
        MessageService::new(self.clone())
    }

    #[must_use]
    pub fn roles(&self) -> RoleService {
        RoleService::new(self.clone())
    }

    #[must_use]
    pub fn auth(&self) -> AuthGateway {
        AuthGateway::new(self.clone())
    }
}
