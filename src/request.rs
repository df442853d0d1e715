//! Incoming HTTP request type, as seen by a handler.

use std::collections::HashMap;

use serde_json::Value;

/// What a handler gets: the parsed body and the path parameters.
///
/// The body is always a JSON value. When no parser handled the request (no
/// JSON content type, or the stage is not installed) it is an empty object,
/// so handlers never have to distinguish "no body" from "empty body".
pub struct Request {
    body: Value,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(body: Value, params: HashMap<String, String>) -> Self {
        Self { body, params }
    }

    pub fn body(&self) -> &Value { &self.body }

    /// Returns a named path parameter.
    ///
    /// For a route `/posts/{id}`, `req.param("id")` on `/posts/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
