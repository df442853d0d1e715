//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Every body this service sends is JSON. Success bodies are whatever the
//! handler serialises; error bodies are always `{"message": "..."}`.

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use serde::Serialize;

use crate::status::Status;

const APPLICATION_JSON: &str = "application/json";

/// Error body shape shared by every failure response.
#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use posts_api::{Response, Status};
///
/// Response::json(Status::Created, &serde_json::json!({"id": 1}));
/// Response::message(Status::BadRequest, "missing fields");
/// Response::status(Status::MethodNotAllowed);
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

impl Response {
    /// `application/json` response carrying `value`.
    ///
    /// A value that fails to serialise turns into a 500 with the serde error
    /// as its message.
    pub fn json<T: Serialize + ?Sized>(status: Status, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => Self::with_json_body(status.into(), bytes),
            Err(e) => Self::message(Status::InternalServerError, &e.to_string()),
        }
    }

    /// `{"message": msg}` with the given status.
    pub fn message(status: Status, msg: &str) -> Self {
        // A struct of one &str cannot fail to serialise.
        let bytes = serde_json::to_vec(&Message { message: msg }).unwrap_or_default();
        Self::with_json_body(status.into(), bytes)
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { status: code.into(), headers: HeaderMap::new(), body: Bytes::new() }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Converts into the hyper response written to the wire.
    pub fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }

    /// The same response for a `HEAD` request: headers kept, body dropped,
    /// `content-length` still describing the body a `GET` would carry.
    pub(crate) fn into_head(mut self) -> Self {
        self.headers.insert(CONTENT_LENGTH, HeaderValue::from(self.body.len()));
        self.body = Bytes::new();
        self
    }

    fn with_json_body(status: StatusCode, body: Vec<u8>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Self { status, headers, body: Bytes::from(body) }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Handlers may return anything implementing this trait.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`Status`] directly from a handler: `return Status::MethodNotAllowed`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

/// Handlers written with `?` return `Result<Response, SomeError>`; both arms
/// render through their own impl.
impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}
