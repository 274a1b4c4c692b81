//! Synchronous client core for the blog service.
//!
//! # Overview
//! Authenticates users, restores sessions, and performs post CRUD against
//! the blog REST API, caching fetched post collections client-side. Builds
//! `HttpRequest` values and parses `HttpResponse` values without touching
//! the network (host-does-IO pattern); the caller executes the actual HTTP
//! round-trips, making the core fully deterministic and testable.
//!
//! # Design
//! - `BlogClient` is stateless — it holds only `base_url`, with each
//!   endpoint split into `build_*` / `parse_*` so the I/O boundary is
//!   explicit.
//! - `BlogStore` layers state on top: auth `{user, token}`, the persisted
//!   session record, and the tag-invalidated posts cache. State moves only
//!   on confirmed success responses.
//! - Session persistence goes through the `SessionStore` trait; the host
//!   decides where the record lives.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
pub mod types;

pub use auth::{AuthState, RestoreOutcome};
pub use cache::{PostsCache, PostsQuery};
pub use client::BlogClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{MemorySessionStore, SessionStore};
pub use store::{BlogStore, PostsPlan};
pub use types::{
    BlogPost, ErrorResponse, LoginRequest, PostCreateRequest, PostDeleteRequest,
    PostUpdateRequest, PostsResponse, RegisterRequest, RegisterResponse, User, UserResponse,
};
