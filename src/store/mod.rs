//! Data-access seam for posts.
//!
//! The HTTP layer never owns post data. It talks to a [`PostStore`], injected
//! at assembly time, whose operations deliberately do not line up one-to-one
//! with REST: `insert` hands back only the new id, and `update`/`remove`
//! report a count rather than the affected row.
//!
//! [`MemoryStore`] is the bundled implementation.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A stored post.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub contents: String,
}

/// The writable fields of a post: what create and replace send to the store.
///
/// The values are exactly what the client sent under `title` and `contents`.
/// Type checks belong to the store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewPost {
    pub title: Value,
    pub contents: Value,
}

/// What [`PostStore::insert`] returns: the assigned id and nothing else.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Inserted {
    pub id: u64,
}

/// Failure inside the store. The HTTP layer answers every variant with a 500
/// carrying the display text.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),

    /// The store refused a write, e.g. a field of the wrong type.
    #[error("{0}")]
    Rejected(String),

    #[error("post store is unavailable")]
    Unavailable,
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for posts.
///
/// Ids arriving from a URL are opaque text; an implementation that cannot
/// interpret one treats it as absent rather than failing.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every post, in store order. Empty, not an error, when there are none.
    async fn find(&self) -> StoreResult<Vec<Post>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Post>>;

    async fn insert(&self, post: NewPost) -> StoreResult<Inserted>;

    /// Overwrites title and contents. Returns the number of posts changed;
    /// zero means no post has that id.
    async fn update(&self, id: &str, post: NewPost) -> StoreResult<u64>;

    /// Returns the number of posts removed; zero means nothing was removed.
    async fn remove(&self, id: &str) -> StoreResult<u64>;
}
