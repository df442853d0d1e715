//! posts-api server backed by the in-memory store.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:3000/api/posts
//!   curl -X POST http://localhost:3000/api/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"hello","contents":"first post"}'
//!   curl -X PUT http://localhost:3000/api/posts/1 \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"hello","contents":"edited"}'
//!   curl -X DELETE http://localhost:3000/api/posts/1

use std::sync::Arc;

use posts_api::{Config, MemoryStore, Server, app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), posts_api::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    tracing::info!(prefix = %config.prefix, "mounting posts");

    let app = app(Arc::new(MemoryStore::new()), &config.prefix);
    Server::bind(config.bind).serve(app).await
}
