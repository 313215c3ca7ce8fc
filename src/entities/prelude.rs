pub use super::messages::Entity as Messages;
pub use super::people::Entity as People;
pub use super::roles::Entity as Roles;
pub use super::rooms::Entity as Rooms;
