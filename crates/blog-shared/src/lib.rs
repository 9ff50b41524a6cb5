//! # Blog Shared
//!
//! Wire types for the blog API, shared by the server and any Rust client.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
