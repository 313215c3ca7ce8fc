pub mod message;
pub mod person;
pub mod role;
pub mod room;
