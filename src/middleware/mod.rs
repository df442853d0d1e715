//! Pipeline stages that run around every routed request.
//!
//! - [`json`] turns the raw request body into a JSON value before routing.
//! - [`trace`] wraps each request in a span and records method, path, status,
//!   and latency once the response is ready.

pub mod json;
pub mod trace;
