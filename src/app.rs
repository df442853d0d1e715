//! Application assembly.
//!
//! [`App`] is the complete request pipeline: JSON body parsing, then route
//! lookup, then the matched handler, all wrapped in per-request tracing. It
//! has no network dependency. [`Server`](crate::Server) feeds it requests
//! from a socket, and tests call [`App::handle`] directly.

use std::sync::Arc;

use bytes::Bytes;
use http::request::Parts;

use crate::method::Method;
use crate::middleware::{json, trace};
use crate::posts;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;
use crate::store::PostStore;

/// The posts service as served in production: JSON bodies, posts router
/// under `prefix`.
pub fn app(store: Arc<dyn PostStore>, prefix: &str) -> App {
    App::new().json_body().mount(prefix, posts::router(store))
}

/// An assembled request pipeline.
///
/// `HEAD` requests without a route of their own run the matching `GET`
/// handler and return its status and headers with the body removed.
pub struct App {
    router: Router,
    parse_json: bool,
}

impl App {
    /// An empty pipeline: no routes, bodies not parsed.
    pub fn new() -> Self {
        Self { router: Router::new(), parse_json: false }
    }

    /// Install the JSON body-parsing stage ahead of routing.
    pub fn json_body(mut self) -> Self {
        self.parse_json = true;
        self
    }

    /// Mount `router` under `prefix`.
    pub fn mount(mut self, prefix: &str, router: Router) -> Self {
        self.router = self.router.nest(prefix, router);
        self
    }

    /// Runs one request through the pipeline.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, raw) = req.into_parts();
        let method = parts.method.clone();
        let path = parts.uri.path().to_owned();
        trace::trace(&method, &path, self.dispatch(parts, raw)).await
    }

    async fn dispatch(&self, parts: Parts, raw: Bytes) -> Response {
        let Ok(method) = Method::try_from(&parts.method) else {
            return Response::status(Status::MethodNotAllowed);
        };

        let body = if self.parse_json {
            match json::parse_body(&parts.headers, &raw) {
                Ok(body) => body,
                Err(e) => return Response::message(Status::BadRequest, &e.to_string()),
            }
        } else {
            json::empty_body()
        };

        let path = parts.uri.path();
        let Some((handler, params)) = self.router.route(method, path) else {
            return Response::message(Status::NotFound, &format!("Cannot {method} {path}"));
        };

        let res = handler(Request::new(body, params)).await;
        match method {
            Method::Head => res.into_head(),
            _ => res,
        }
    }
}

impl Default for App {
    fn default() -> Self { Self::new() }
}
