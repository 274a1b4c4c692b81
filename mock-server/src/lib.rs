use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub token: String,
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdatePost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct DeletePost {
    pub id: Uuid,
    pub title: String,
}

#[derive(Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<BlogPost>,
}

#[derive(Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone, Debug)]
struct Account {
    id: u64,
    username: String,
    email: String,
    role: String,
    password: String,
}

/// In-memory server state: registered accounts, live session tokens, and
/// posts. Tokens map to the username they were issued to.
#[derive(Default)]
pub struct AppState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    posts: HashMap<Uuid, BlogPost>,
    next_account_id: u64,
}

pub type Db = Arc<RwLock<AppState>>;

type Rejection = (StatusCode, Json<ErrorBody>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(AppState::default()));
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/auth/register", post(register))
                .route("/auth/login", post(login))
                .route("/auth/logout", post(logout))
                .route("/posts/all", get(posts_all))
                .route("/posts/user/{username}", get(posts_by_user))
                .route("/posts/post/create", post(create_post))
                .route("/posts/post/update", put(update_post))
                .route("/posts/post/delete", delete(delete_post)),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// The raw bearer token in `headers`, if the Authorization header is
/// well-formed.
fn bearer_token(headers: &HeaderMap) -> Result<&str, Rejection> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "missing bearer token"))
}

/// Resolve the bearer token in `headers` to the username it was issued to.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<String, Rejection> {
    let token = bearer_token(headers)?;
    state
        .tokens
        .get(token)
        .cloned()
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "invalid or expired token"))
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Message>), Rejection> {
    let mut state = db.write().await;
    if state.accounts.contains_key(&input.username) {
        return Err(reject(StatusCode::CONFLICT, "username already taken"));
    }
    state.next_account_id += 1;
    let account = Account {
        id: state.next_account_id,
        username: input.username.clone(),
        email: input.email,
        role: "user".to_string(),
        password: input.password,
    };
    tracing::debug!(username = %account.username, "registered account");
    state.accounts.insert(input.username, account);
    Ok((
        StatusCode::CREATED,
        Json(Message {
            message: "registered".to_string(),
        }),
    ))
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<UserResponse>, Rejection> {
    let mut state = db.write().await;
    let account = match state.accounts.get(&input.username) {
        Some(account) if account.password == input.password => account.clone(),
        _ => return Err(reject(StatusCode::UNAUTHORIZED, "invalid credentials")),
    };
    let token = Uuid::new_v4().to_string();
    state.tokens.insert(token.clone(), account.username.clone());
    tracing::debug!(username = %account.username, "issued session token");
    Ok(Json(UserResponse {
        token,
        user_id: account.id,
        username: account.username,
        email: account.email,
        role: account.role,
    }))
}

async fn logout(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Message>, Rejection> {
    let mut state = db.write().await;
    let token = bearer_token(&headers)?.to_string();
    if state.tokens.remove(&token).is_none() {
        return Err(reject(StatusCode::UNAUTHORIZED, "invalid or expired token"));
    }
    Ok(Json(Message {
        message: "logged out".to_string(),
    }))
}

async fn posts_all(State(db): State<Db>) -> Json<PostsResponse> {
    let state = db.read().await;
    let mut posts: Vec<BlogPost> = state.posts.values().cloned().collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(PostsResponse { posts })
}

async fn posts_by_user(
    State(db): State<Db>,
    Path(username): Path<String>,
) -> Json<PostsResponse> {
    let state = db.read().await;
    let mut posts: Vec<BlogPost> = state
        .posts
        .values()
        .filter(|post| post.author == username)
        .cloned()
        .collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(PostsResponse { posts })
}

async fn create_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<BlogPost>), Rejection> {
    let mut state = db.write().await;
    let author = authenticate(&state, &headers)?;
    let now = OffsetDateTime::now_utc();
    let post = BlogPost {
        id: Uuid::new_v4(),
        title: input.title,
        content: input.content,
        author,
        created_at: now,
        updated_at: now,
    };
    state.posts.insert(post.id, post.clone());
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UpdatePost>,
) -> Result<Json<BlogPost>, Rejection> {
    let mut state = db.write().await;
    let author = authenticate(&state, &headers)?;
    let post = state
        .posts
        .get_mut(&input.id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "post not found"))?;
    if post.author != author {
        return Err(reject(StatusCode::FORBIDDEN, "not the author of this post"));
    }
    post.title = input.title;
    post.content = input.content;
    post.updated_at = OffsetDateTime::now_utc();
    Ok(Json(post.clone()))
}

async fn delete_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<DeletePost>,
) -> Result<StatusCode, Rejection> {
    let mut state = db.write().await;
    let author = authenticate(&state, &headers)?;
    match state.posts.get(&input.id) {
        None => return Err(reject(StatusCode::NOT_FOUND, "post not found")),
        Some(post) if post.author != author => {
            return Err(reject(StatusCode::FORBIDDEN, "not the author of this post"));
        }
        // title acts as a confirmation guard against deleting the wrong post
        Some(post) if post.title != input.title => {
            return Err(reject(StatusCode::BAD_REQUEST, "title does not match"));
        }
        Some(_) => {}
    }
    state.posts.remove(&input.id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn blog_post_serializes_camel_case() {
        let post = BlogPost {
            id: Uuid::nil(),
            title: "Test".to_string(),
            content: "Body".to_string(),
            author: "a".to_string(),
            created_at: datetime!(2026-01-02 03:04:05 UTC),
            updated_at: datetime!(2026-01-02 03:04:05 UTC),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["author"], "a");
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn blog_post_roundtrips_through_json() {
        let post = BlogPost {
            id: Uuid::new_v4(),
            title: "Roundtrip".to_string(),
            content: "Body".to_string(),
            author: "a".to_string(),
            created_at: datetime!(2026-01-02 03:04:05 UTC),
            updated_at: datetime!(2026-01-03 03:04:05 UTC),
        };
        let json = serde_json::to_string(&post).unwrap();
        let back: BlogPost = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn user_response_uses_camel_case_user_id() {
        let response = UserResponse {
            token: "t1".to_string(),
            user_id: 1,
            username: "a".to_string(),
            email: "a@x.com".to_string(),
            role: "user".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn create_post_rejects_missing_title() {
        let result: Result<CreatePost, _> = serde_json::from_str(r#"{"content":"Body"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn delete_post_requires_id_and_title() {
        let result: Result<DeletePost, _> =
            serde_json::from_str(r#"{"id":"00000000-0000-0000-0000-000000000000"}"#);
        assert!(result.is_err());

        let input: DeletePost = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000000","title":"Test"}"#,
        )
        .unwrap();
        assert_eq!(input.title, "Test");
    }
}
