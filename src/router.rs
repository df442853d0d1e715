//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. A router can be mounted
//! inside another under a path prefix with [`Router::nest`].

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::BoxedHandler;
use crate::method::Method;

/// The application router.
///
/// Build it once at startup. Each [`Router::on`] call returns `self` so
/// registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    // Registration order, kept so a router can be re-mounted under a prefix.
    table: Vec<(Method, String, BoxedHandler)>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), table: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read back with
    /// `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or conflicts with an existing route.
    pub fn on(self, method: Method, path: &str, handler: BoxedHandler) -> Self {
        self.add(method, path.to_owned(), handler)
    }

    /// Mount every route of `other` under `prefix`.
    ///
    /// A route registered as `/` in `other` answers on both `prefix` and
    /// `prefix/`, so `/api/posts` and `/api/posts/` address the same
    /// collection.
    pub fn nest(mut self, prefix: &str, other: Router) -> Self {
        let prefix = prefix.trim_end_matches('/');
        for (method, path, handler) in other.table {
            for mounted in mounted_paths(prefix, &path) {
                self = self.add(method, mounted, Arc::clone(&handler));
            }
        }
        self
    }

    fn add(mut self, method: Method, path: String, handler: BoxedHandler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.clone(), Arc::clone(&handler))
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self.table.push((method, path, handler));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Like [`lookup`](Router::lookup), but a `HEAD` with no route of its own
    /// is answered by the `GET` route for the same path.
    pub(crate) fn route(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        self.lookup(method, path).or_else(|| match method {
            Method::Head => self.lookup(Method::Get, path),
            _ => None,
        })
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn mounted_paths(prefix: &str, path: &str) -> Vec<String> {
    if prefix.is_empty() {
        return vec![path.to_owned()];
    }
    if path == "/" {
        vec![prefix.to_owned(), format!("{prefix}/")]
    } else {
        vec![format!("{prefix}{path}")]
    }
}
