//! # Pomodoro Tasks Data Layer
//!
//! Persistence for users, task lists, todos, todo dependencies and
//! authentication rate limits, backed by PostgreSQL through sqlx.
//!
//! ## Module Organization
//!
//! - `config`: Connection settings loaded from the environment
//! - `db`: Connection pool and the owned [`db::Database`] handle
//! - `error`: The [`error::DataError`] type shared by every operation
//! - `models`: Entity types and their queries

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use db::Database;
pub use error::{DataError, DataResult};

/// Current version of the data layer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
