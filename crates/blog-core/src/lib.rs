//! # Blog Core
//!
//! The domain layer of the blog API.
//! Blog post types and the store ports, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
