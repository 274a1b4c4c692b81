//! Client-side cache of fetched post collections.
//!
//! # Design
//! Two query shapes (all posts, posts by author) are cached independently
//! but share a single invalidation tag: any successful mutation marks every
//! cached collection stale. Stale entries are kept, not dropped, so a host
//! can keep showing the old collection while its refetch is in flight; they
//! simply stop being served as fresh.

use std::collections::HashMap;

use tracing::debug;

use crate::types::BlogPost;

/// Identifies a cached post collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostsQuery {
    /// Every post on the server.
    All,
    /// Posts authored by one user.
    ByUser(String),
}

#[derive(Debug)]
struct Entry {
    posts: Vec<BlogPost>,
    stale: bool,
}

/// Tag-invalidated cache over post collections.
#[derive(Debug, Default)]
pub struct PostsCache {
    entries: HashMap<PostsQuery, Entry>,
}

impl PostsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached collection for `query`, if present and not stale.
    pub fn fresh(&self, query: &PostsQuery) -> Option<&[BlogPost]> {
        self.entries
            .get(query)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.posts.as_slice())
    }

    /// Store a freshly fetched collection, clearing any staleness mark.
    pub fn insert(&mut self, query: PostsQuery, posts: Vec<BlogPost>) {
        self.entries.insert(query, Entry { posts, stale: false });
    }

    /// Mark every cached collection stale. All collections share one tag:
    /// a mutation to any post invalidates them all.
    pub fn invalidate(&mut self) {
        debug!(collections = self.entries.len(), "invalidating cached post collections");
        for entry in self.entries.values_mut() {
            entry.stale = true;
        }
    }
}
