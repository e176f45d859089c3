//! User service library: remote configuration, user persistence and the
//! HTTP API that exposes it.

pub mod config;
pub mod controllers;
pub mod db;
pub mod domain;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod repository;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownOutcome};
