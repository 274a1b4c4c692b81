//! Error types for the blog API client.
//!
//! # Design
//! `Transport` exists for the host's benefit: the core never constructs it
//! because the core never touches the network, but an executor needs a
//! variant for round-trips that fail before any status arrives. All non-2xx
//! responses land in `Http` with the status code and the server's error
//! payload for user display.

use thiserror::Error;

/// Errors returned by `BlogClient` and `BlogStore` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP round-trip failed before a status was received.
    /// Constructed by the host's executor, not by the core.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned a non-success status. `message` carries the
    /// server's `{"error": ...}` payload when parseable, the raw body
    /// otherwise.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
