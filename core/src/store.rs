//! Stateful store coordinating auth state, session persistence, and the
//! posts cache.
//!
//! # Design
//! `BlogStore` is the explicit application-state object: a host constructs
//! one at startup and passes it by reference — there is no process-wide
//! singleton. Like `BlogClient`, it never performs I/O. Every operation is
//! split into a `*_request` method producing an `HttpRequest` and a
//! `complete_*` method consuming the `HttpResponse`; state transitions
//! apply only on confirmed success, in the completion order the host feeds
//! responses back.
//!
//! Queries go through `posts()`, which answers from cache when fresh and
//! otherwise hands back the request to execute. Successful mutations
//! invalidate every cached collection, so the next `posts()` call refetches.

use tracing::info;

use crate::auth::{AuthState, RestoreOutcome};
use crate::cache::{PostsCache, PostsQuery};
use crate::client::BlogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::session::{self, LoadedSession, SessionStore};
use crate::types::{
    BlogPost, LoginRequest, PostCreateRequest, PostDeleteRequest, PostUpdateRequest,
    RegisterRequest, RegisterResponse, User,
};

/// Answer to a posts query: cached data, or a request the host must execute
/// and feed back through `complete_posts`.
#[derive(Debug)]
pub enum PostsPlan {
    Cached(Vec<BlogPost>),
    Fetch(HttpRequest),
}

/// Application-state object owning the wire client, auth state, posts cache,
/// and the session store.
pub struct BlogStore<S: SessionStore> {
    client: BlogClient,
    auth: AuthState,
    cache: PostsCache,
    session: S,
}

impl<S: SessionStore> BlogStore<S> {
    /// Create a store against `base_url`, persisting sessions in `session`.
    pub fn new(base_url: &str, session: S) -> Self {
        Self {
            client: BlogClient::new(base_url),
            auth: AuthState::new(),
            cache: PostsCache::new(),
            session,
        }
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// The underlying session store, for hosts that surface its contents.
    pub fn session(&self) -> &S {
        &self.session
    }

    // --- session reconciliation ----------------------------------------

    /// Reconcile auth state with the persisted session record.
    ///
    /// Invoked once at host startup, replacing the original standing
    /// listener. Runs only when auth state is fully empty and the record
    /// reports an authenticated session. A malformed record fails closed:
    /// auth state stays unauthenticated and the record is cleared so it
    /// cannot re-trigger. Idempotent — repeated calls settle on the same
    /// state.
    pub fn reconcile_session(&mut self) -> RestoreOutcome {
        if !self.auth.is_empty() {
            return RestoreOutcome::AlreadyAuthenticated;
        }
        match session::load(&self.session) {
            LoadedSession::Missing => RestoreOutcome::NoSession,
            LoadedSession::Malformed => {
                session::clear(&mut self.session);
                RestoreOutcome::Malformed
            }
            LoadedSession::Valid(payload) => {
                info!(username = %payload.username, "restoring user session");
                self.auth.apply(&payload);
                RestoreOutcome::Restored
            }
        }
    }

    // --- auth ----------------------------------------------------------

    pub fn login_request(&self, credentials: &LoginRequest) -> Result<HttpRequest, ApiError> {
        self.client.build_login(credentials)
    }

    /// Apply a login response. On success the user and token land in auth
    /// state and the session record in the same step, so the two always
    /// agree.
    pub fn complete_login(&mut self, response: HttpResponse) -> Result<User, ApiError> {
        let payload = self.client.parse_login(response)?;
        session::persist(&mut self.session, &payload)?;
        self.auth.apply(&payload);
        Ok(payload.user())
    }

    pub fn logout_request(&self) -> HttpRequest {
        self.client.build_logout(self.auth.token())
    }

    /// Apply a logout response. Auth state and the session record are
    /// cleared together, and only on confirmed success; a failed logout
    /// leaves both in place for the caller to retry.
    pub fn complete_logout(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        self.client.parse_logout(response)?;
        session::clear(&mut self.session);
        self.auth.reset();
        Ok(())
    }

    pub fn register_request(&self, info: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        self.client.build_register(info)
    }

    /// Registration touches neither auth state nor the cache.
    pub fn complete_register(&self, response: HttpResponse) -> Result<RegisterResponse, ApiError> {
        self.client.parse_register(response)
    }

    // --- queries ---------------------------------------------------------

    /// Plan a posts query: cached data when fresh, otherwise the request to
    /// execute and feed back through `complete_posts`.
    pub fn posts(&self, query: &PostsQuery) -> PostsPlan {
        if let Some(posts) = self.cache.fresh(query) {
            return PostsPlan::Cached(posts.to_vec());
        }
        let request = match query {
            PostsQuery::All => self.client.build_posts_all(),
            PostsQuery::ByUser(username) => self.client.build_posts_by_user(username),
        };
        PostsPlan::Fetch(request)
    }

    /// Store a fetched collection under its query key and return it.
    pub fn complete_posts(
        &mut self,
        query: PostsQuery,
        response: HttpResponse,
    ) -> Result<Vec<BlogPost>, ApiError> {
        let posts = self.client.parse_posts(response)?;
        self.cache.insert(query, posts.clone());
        Ok(posts)
    }

    /// Mark all cached collections stale so the next `posts()` call
    /// refetches. Hosts call this on focus/reconnect style events; it is a
    /// staleness policy, not a correctness requirement.
    pub fn refresh_queries(&mut self) {
        self.cache.invalidate();
    }

    // --- mutations -------------------------------------------------------

    pub fn create_post_request(&self, input: &PostCreateRequest) -> Result<HttpRequest, ApiError> {
        self.client.build_create_post(self.auth.token(), input)
    }

    /// Apply a create response. Success invalidates every cached
    /// collection; failure leaves the cache untouched.
    pub fn complete_create_post(&mut self, response: HttpResponse) -> Result<BlogPost, ApiError> {
        let post = self.client.parse_create_post(response)?;
        self.cache.invalidate();
        Ok(post)
    }

    pub fn update_post_request(&self, input: &PostUpdateRequest) -> Result<HttpRequest, ApiError> {
        self.client.build_update_post(self.auth.token(), input)
    }

    /// Same invalidation contract as create.
    pub fn complete_update_post(&mut self, response: HttpResponse) -> Result<BlogPost, ApiError> {
        let post = self.client.parse_update_post(response)?;
        self.cache.invalidate();
        Ok(post)
    }

    pub fn delete_post_request(&self, input: &PostDeleteRequest) -> Result<HttpRequest, ApiError> {
        self.client.build_delete_post(self.auth.token(), input)
    }

    /// Same invalidation contract as create.
    pub fn complete_delete_post(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        self.client.parse_delete_post(response)?;
        self.cache.invalidate();
        Ok(())
    }
}
