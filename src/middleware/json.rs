//! JSON request-body parsing.
//!
//! Only requests that declare a JSON content type are parsed. Everything else
//! (and an empty JSON body) is presented to handlers as `{}`. Parsing is
//! strict: the top-level value must be an object or an array.

use http::HeaderMap;
use http::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a JSON-declared body was rejected. Answered with a 400.
#[derive(Debug, Error)]
pub enum JsonBodyError {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request body must be a JSON object or array")]
    NotStrict,
}

/// The body handlers see when nothing was parsed.
pub fn empty_body() -> Value {
    Value::Object(Map::new())
}

/// `true` for `application/json` and `application/*+json`, ignoring
/// parameters such as `charset`.
pub fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Parses `raw` if `headers` declare JSON; otherwise returns [`empty_body`].
pub fn parse_body(headers: &HeaderMap, raw: &[u8]) -> Result<Value, JsonBodyError> {
    if !is_json(headers) || raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(empty_body());
    }
    let value: Value = serde_json::from_slice(raw)?;
    match value {
        value @ (Value::Object(_) | Value::Array(_)) => Ok(value),
        _ => Err(JsonBodyError::NotStrict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde_json::json;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        h
    }

    #[test]
    fn recognises_json_content_types() {
        assert!(is_json(&headers("application/json")));
        assert!(is_json(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json(&headers("application/merge-patch+json")));
        assert!(!is_json(&headers("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn non_json_bodies_become_empty_objects() {
        let body = parse_body(&headers("text/plain"), br#"{"title":"A"}"#).unwrap();
        assert_eq!(body, json!({}));
        let body = parse_body(&headers("application/json"), b"  ").unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn parses_objects_and_arrays() {
        let h = headers("application/json");
        assert_eq!(parse_body(&h, br#"{"a":1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse_body(&h, b"[1,2]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn rejects_scalars_and_garbage() {
        let h = headers("application/json");
        assert!(matches!(parse_body(&h, b"\"title\""), Err(JsonBodyError::NotStrict)));
        assert!(matches!(parse_body(&h, b"{title:"), Err(JsonBodyError::Malformed(_))));
    }
}
