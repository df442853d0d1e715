use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Inserted, NewPost, Post, PostStore, StoreError, StoreResult};

/// In-process [`PostStore`] backed by an ordered map.
///
/// Ids are assigned sequentially from 1 and never reused, even after a
/// remove. `find` returns posts in ascending id order. Title and contents
/// must be JSON strings; any other value is rejected with
/// [`StoreError::Rejected`] and nothing is written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: BTreeMap<u64, Post>,
    last_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn parse_id(id: &str) -> Option<u64> {
    id.parse().ok()
}

fn text(field: &str, value: Value) -> StoreResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(StoreError::rejected(format!("{field} must be a string, got {other}"))),
    }
}

fn text_fields(post: NewPost) -> StoreResult<(String, String)> {
    Ok((text("title", post.title)?, text("contents", post.contents)?))
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn find(&self) -> StoreResult<Vec<Post>> {
        Ok(self.inner.read().await.posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Post>> {
        let Some(id) = parse_id(id) else { return Ok(None) };
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> StoreResult<Inserted> {
        let (title, contents) = text_fields(post)?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.posts.insert(id, Post { id, title, contents });
        Ok(Inserted { id })
    }

    async fn update(&self, id: &str, post: NewPost) -> StoreResult<u64> {
        let Some(id) = parse_id(id) else { return Ok(0) };
        let mut inner = self.inner.write().await;
        // A missing row matches nothing, whatever the payload.
        let Some(existing) = inner.posts.get_mut(&id) else { return Ok(0) };
        let (title, contents) = text_fields(post)?;
        existing.title = title;
        existing.contents = contents;
        Ok(1)
    }

    async fn remove(&self, id: &str) -> StoreResult<u64> {
        let Some(id) = parse_id(id) else { return Ok(0) };
        Ok(self.inner.write().await.posts.remove(&id).map_or(0, |_| 1))
    }
}
