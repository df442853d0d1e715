//! Route handlers as shared boxed closures.
//!
//! Every route holds a [`BoxedHandler`]. Handlers that need a collaborator
//! (the post store) are built with [`with_state`], which clones the shared
//! `Arc` into each call:
//!
//! ```text
//! with_state(store, posts::list)
//!        ↓
//! Arc<dyn Fn(Request) -> HandlerFuture>     stored in the route table
//!        ↓ per request
//! posts::list(Arc::clone(&store), req)      rendered via IntoResponse
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The future a route produces: an already-rendered [`Response`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A route handler, shared across concurrent requests.
pub type BoxedHandler = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync + 'static>;

/// Boxes `f`, handing it a clone of `state` alongside every request.
///
/// `f` may return anything [`IntoResponse`], typically
/// `Result<Response, E>` so the body can use `?`.
pub fn with_state<S, F, Fut, R>(state: Arc<S>, f: F) -> BoxedHandler
where
    S: ?Sized + Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req| -> HandlerFuture {
        let fut = f(Arc::clone(&state), req);
        Box::pin(async move { fut.await.into_response() })
    })
}
