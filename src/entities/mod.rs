pub mod prelude;

pub mod messages;
pub mod people;
pub mod roles;
pub mod rooms;
