//! Wire DTOs for the blog API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. Field
//! names follow the wire format (camelCase where the server uses it) and
//! timestamps are RFC 3339.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A registered user of the blog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Credentials for `auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful `auth/login` payload.
///
/// Also the session blob: the session record persists this value verbatim,
/// so restore sees exactly what login saw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub token: String,
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl UserResponse {
    /// The `User` carried by this payload.
    pub fn user(&self) -> User {
        User {
            id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Payload for `auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Result of a successful registration. Registration does not log the user
/// in; a separate login call follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// A single blog post returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Username of the post's author.
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Envelope for the listing endpoints: `{"posts": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<BlogPost>,
}

/// Request payload for creating a post. The author is derived server-side
/// from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreateRequest {
    pub title: String,
    pub content: String,
}

/// Request payload for updating an existing post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUpdateRequest {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

/// Request payload for deleting a post. The title doubles as a confirmation
/// guard: the server rejects the delete if it does not match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDeleteRequest {
    pub id: Uuid,
    pub title: String,
}

/// Error payload returned by the server on non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
