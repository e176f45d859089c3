//! Controllers sit between HTTP handlers and repositories.

pub mod user;

pub use user::{ControllerError, UserController};
