//! Domain records shared by the repository, controllers and handlers.

pub mod user;

pub use user::{NewUser, UpdateUser, User};
