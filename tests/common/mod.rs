#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use posts_api::{App, Inserted, MemoryStore, NewPost, Post, PostStore, StoreError, app};
use serde_json::Value;

pub const PREFIX: &str = "/api/posts";

/// Sends one request through `app`. `body` is sent as `application/json`.
pub async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = http::Request::builder().method(method).uri(uri);
    let raw = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            Bytes::from(serde_json::to_vec(&body).unwrap())
        }
        None => Bytes::new(),
    };
    let res = app.handle(builder.body(raw).unwrap()).await;
    let json = if res.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(res.body()).unwrap()
    };
    (res.status_code(), json)
}

/// A [`MemoryStore`] that records the name of every call, and the writes it
/// was handed.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub calls: Mutex<Vec<&'static str>>,
    pub writes: Mutex<Vec<NewPost>>,
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PostStore for RecordingStore {
    async fn find(&self) -> Result<Vec<Post>, StoreError> {
        self.record("find");
        self.inner.find().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.record("find_by_id");
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, post: NewPost) -> Result<Inserted, StoreError> {
        self.record("insert");
        self.writes.lock().unwrap().push(post.clone());
        self.inner.insert(post).await
    }

    async fn update(&self, id: &str, post: NewPost) -> Result<u64, StoreError> {
        self.record("update");
        self.writes.lock().unwrap().push(post.clone());
        self.inner.update(id, post).await
    }

    async fn remove(&self, id: &str) -> Result<u64, StoreError> {
        self.record("remove");
        self.inner.remove(id).await
    }
}

/// Every operation fails with the same backend error.
pub struct FailingStore(pub &'static str);

#[async_trait]
impl PostStore for FailingStore {
    async fn find(&self) -> Result<Vec<Post>, StoreError> {
        Err(StoreError::backend(self.0))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Post>, StoreError> {
        Err(StoreError::backend(self.0))
    }

    async fn insert(&self, _post: NewPost) -> Result<Inserted, StoreError> {
        Err(StoreError::backend(self.0))
    }

    async fn update(&self, _id: &str, _post: NewPost) -> Result<u64, StoreError> {
        Err(StoreError::backend(self.0))
    }

    async fn remove(&self, _id: &str) -> Result<u64, StoreError> {
        Err(StoreError::backend(self.0))
    }
}

/// Finds every post but never manages to remove one: the window between a
/// delete's existence check and its remove, forced open.
pub struct VanishingStore;

#[async_trait]
impl PostStore for VanishingStore {
    async fn find(&self) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(Some(Post { id: id.parse().unwrap_or(0), title: "ghost".into(), contents: "boo".into() }))
    }

    async fn insert(&self, _post: NewPost) -> Result<Inserted, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn update(&self, _id: &str, _post: NewPost) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn remove(&self, _id: &str) -> Result<u64, StoreError> {
        Ok(0)
    }
}

/// A [`MemoryStore`] holding post 1 whose `failing` operation errors with
/// `"{failing} down"`. Everything else succeeds, so a two-step route can get
/// through its first call and fail on the second.
pub struct FailsOn {
    inner: MemoryStore,
    failing: &'static str,
}

impl FailsOn {
    pub async fn seeded(failing: &'static str) -> Self {
        let inner = MemoryStore::new();
        let seed = NewPost { title: "seed".into(), contents: "seed body".into() };
        inner.insert(seed).await.unwrap();
        Self { inner, failing }
    }

    fn check(&self, call: &'static str) -> Result<(), StoreError> {
        if call == self.failing {
            Err(StoreError::backend(format!("{call} down")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostStore for FailsOn {
    async fn find(&self) -> Result<Vec<Post>, StoreError> {
        self.check("find")?;
        self.inner.find().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.check("find_by_id")?;
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, post: NewPost) -> Result<Inserted, StoreError> {
        self.check("insert")?;
        self.inner.insert(post).await
    }

    async fn update(&self, id: &str, post: NewPost) -> Result<u64, StoreError> {
        self.check("update")?;
        self.inner.update(id, post).await
    }

    async fn remove(&self, id: &str) -> Result<u64, StoreError> {
        self.check("remove")?;
        self.inner.remove(id).await
    }
}

/// Accepts inserts but can never read anything back.
pub struct WriteOnlyStore;

#[async_trait]
impl PostStore for WriteOnlyStore {
    async fn find(&self) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Post>, StoreError> {
        Ok(None)
    }

    async fn insert(&self, _post: NewPost) -> Result<Inserted, StoreError> {
        Ok(Inserted { id: 7 })
    }

    async fn update(&self, _id: &str, _post: NewPost) -> Result<u64, StoreError> {
        Ok(1)
    }

    async fn remove(&self, _id: &str) -> Result<u64, StoreError> {
        Ok(1)
    }
}

pub fn memory_app() -> App {
    app(Arc::new(MemoryStore::new()), PREFIX)
}

pub fn recording_app() -> (App, Arc<RecordingStore>) {
    let store = Arc::new(RecordingStore::default());
    (app(store.clone(), PREFIX), store)
}
