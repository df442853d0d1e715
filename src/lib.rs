//! # posts-api
//!
//! A small REST service for blog posts. It owns the HTTP side only:
//! routing, presence checks on request bodies, status selection, and the
//! multi-step store calls that REST semantics need on top of a plain
//! find/insert/update/remove data layer. Storage sits behind [`PostStore`],
//! injected when the app is assembled.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use posts_api::{Config, MemoryStore, Server, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), posts_api::Error> {
//!     let config = Config::from_env()?;
//!     let app = app(Arc::new(MemoryStore::new()), &config.prefix);
//!     Server::bind(config.bind).serve(app).await
//! }
//! ```
//!
//! ## Calling the pipeline without a socket
//!
//! ```rust
//! # use std::sync::Arc;
//! # use posts_api::{MemoryStore, app};
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = app(Arc::new(MemoryStore::new()), "/api/posts");
//! let req = http::Request::get("/api/posts").body(bytes::Bytes::new()).unwrap();
//! let res = app.handle(req).await;
//! assert_eq!(res.status_code(), http::StatusCode::OK);
//! assert_eq!(res.body(), b"[]");
//! # }
//! ```

mod app;
mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod middleware;
pub mod posts;
pub mod store;

pub use app::{App, app};
pub use config::{Config, DEFAULT_BIND, DEFAULT_PREFIX};
pub use error::Error;
pub use handler::{BoxedHandler, HandlerFuture, with_state};
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::{Server, serve_listener};
pub use status::Status;
pub use store::{Inserted, MemoryStore, NewPost, Post, PostStore, StoreError};
