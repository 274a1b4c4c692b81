//! Stateless HTTP request builder and response parser for the blog API.
//!
//! # Design
//! `BlogClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Authorization is explicit: authed builders take the bearer token as an
//! argument. The two listing endpoints are public reads and never carry an
//! Authorization header. A missing token is not an error at this layer —
//! the server enforces authorization.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    BlogPost, ErrorResponse, LoginRequest, PostCreateRequest, PostDeleteRequest,
    PostUpdateRequest, PostsResponse, RegisterRequest, RegisterResponse, UserResponse,
};

/// Stateless client for the blog REST API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // --- auth ---------------------------------------------------------

    pub fn build_login(&self, credentials: &LoginRequest) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(credentials).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/auth/login", self.base_url),
            headers: json_headers(None),
            body: Some(body),
        })
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<UserResponse, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn build_logout(&self, token: Option<&str>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/auth/logout", self.base_url),
            headers: bearer_headers(token),
            body: None,
        }
    }

    /// Logout is status-only; the body is ignored.
    pub fn parse_logout(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn build_register(&self, info: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(info).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/auth/register", self.base_url),
            headers: json_headers(None),
            body: Some(body),
        })
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<RegisterResponse, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    // --- post listings (public reads) ----------------------------------

    pub fn build_posts_all(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/posts/all", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_posts_by_user(&self, username: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/posts/user/{username}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Shared parser for both listing endpoints; unwraps the `{"posts"}`
    /// envelope.
    pub fn parse_posts(&self, response: HttpResponse) -> Result<Vec<BlogPost>, ApiError> {
        check_status(&response, 200)?;
        let envelope: PostsResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(envelope.posts)
    }

    // --- post mutations -------------------------------------------------

    pub fn build_create_post(
        &self,
        token: Option<&str>,
        input: &PostCreateRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/posts/post/create", self.base_url),
            headers: json_headers(token),
            body: Some(body),
        })
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<BlogPost, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn build_update_post(
        &self,
        token: Option<&str>,
        input: &PostUpdateRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/posts/post/update", self.base_url),
            headers: json_headers(token),
            body: Some(body),
        })
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<BlogPost, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn build_delete_post(
        &self,
        token: Option<&str>,
        input: &PostDeleteRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/posts/post/delete", self.base_url),
            headers: json_headers(token),
            body: Some(body),
        })
    }

    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

/// Content-type header plus the bearer header when a token is present.
fn json_headers(token: Option<&str>) -> Vec<(String, String)> {
    let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
    if let Some(token) = token {
        headers.push(("authorization".to_string(), format!("Bearer {token}")));
    }
    headers
}

/// Just the bearer header, for endpoints without a request body.
fn bearer_headers(token: Option<&str>) -> Vec<(String, String)> {
    match token {
        Some(token) => vec![("authorization".to_string(), format!("Bearer {token}"))],
        None => Vec::new(),
    }
}

/// Map non-success status codes to `ApiError::Http`, extracting the server's
/// `{"error": ...}` payload when the body carries one.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = match serde_json::from_str::<ErrorResponse>(&response.body) {
        Ok(payload) => payload.error,
        Err(_) => response.body.clone(),
    };
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:4040/api")
    }

    #[test]
    fn build_login_produces_correct_request() {
        let credentials = LoginRequest {
            username: "a".to_string(),
            password: "p".to_string(),
        };
        let req = client().build_login(&credentials).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:4040/api/auth/login");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), None);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "a");
        assert_eq!(body["password"], "p");
    }

    #[test]
    fn parse_login_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"token":"t1","userId":1,"username":"a","email":"a@x.com","role":"user"}"#
                .to_string(),
        };
        let payload = client().parse_login(response).unwrap();
        assert_eq!(payload.token, "t1");
        assert_eq!(payload.user_id, 1);
        assert_eq!(payload.user().email, "a@x.com");
    }

    #[test]
    fn parse_login_extracts_server_error_payload() {
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: r#"{"error":"invalid credentials"}"#.to_string(),
        };
        let err = client().parse_login(response).unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid credentials");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn parse_login_falls_back_to_raw_body() {
        let response = HttpResponse {
            status: 502,
            headers: Vec::new(),
            body: "bad gateway".to_string(),
        };
        let err = client().parse_login(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 502, ref message } if message == "bad gateway"));
    }

    #[test]
    fn build_logout_attaches_bearer_token() {
        let req = client().build_logout(Some("t1"));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:4040/api/auth/logout");
        assert_eq!(req.header("authorization"), Some("Bearer t1"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_posts_all_is_unauthenticated() {
        let req = client().build_posts_all();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:4040/api/posts/all");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_posts_by_user_is_unauthenticated() {
        let req = client().build_posts_by_user("a");
        assert_eq!(req.path, "http://localhost:4040/api/posts/user/a");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn parse_posts_unwraps_envelope() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"posts":[{"id":"00000000-0000-0000-0000-000000000001","title":"Hello","content":"First post","author":"a","createdAt":"2026-01-02T03:04:05Z","updatedAt":"2026-01-02T03:04:05Z"}]}"#.to_string(),
        };
        let posts = client().parse_posts(response).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello");
        assert_eq!(posts[0].author, "a");
    }

    #[test]
    fn parse_posts_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = client().parse_posts(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn build_create_post_with_token() {
        let input = PostCreateRequest {
            title: "Hello".to_string(),
            content: "First post".to_string(),
        };
        let req = client().build_create_post(Some("t1"), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:4040/api/posts/post/create");
        assert_eq!(req.header("authorization"), Some("Bearer t1"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Hello");
    }

    #[test]
    fn build_create_post_without_token_is_not_an_error() {
        let input = PostCreateRequest {
            title: "Hello".to_string(),
            content: "First post".to_string(),
        };
        let req = client().build_create_post(None, &input).unwrap();
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn build_delete_post_carries_id_and_title() {
        let input = PostDeleteRequest {
            id: uuid::Uuid::nil(),
            title: "Hello".to_string(),
        };
        let req = client().build_delete_post(Some("t1"), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(body["title"], "Hello");
    }

    #[test]
    fn parse_delete_post_success() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(client().parse_delete_post(response).is_ok());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BlogClient::new("http://localhost:4040/api/");
        let req = client.build_posts_all();
        assert_eq!(req.path, "http://localhost:4040/api/posts/all");
    }
}
