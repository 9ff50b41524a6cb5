//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author as clients send it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub first_name: String,
    pub last_name: String,
}

/// Request to create a post. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub author: AuthorDto,
    pub content: String,
}

/// Request to update a post.
///
/// Unknown keys are dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    /// Must equal the path id when present.
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorDto>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A post as the API returns it, with the author flattened to a display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created: String,
}
