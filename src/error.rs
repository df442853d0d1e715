//! Infrastructure error type.

use thiserror::Error;

/// The error type returned by the crate's fallible setup and serving paths.
///
/// Request-level outcomes (400, 404, 500, ...) are expressed as
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// failures around the service: reading configuration, binding to a port,
/// accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
