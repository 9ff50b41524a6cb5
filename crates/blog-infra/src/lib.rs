//! # Blog Infrastructure
//!
//! Concrete implementations of the post store defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//!
//! With default features off only the in-memory store is built.

pub mod database;
pub mod memory;
pub mod seed;

pub use database::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabasePool, PostgresPostRepository};
