//! Startup configuration from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `POSTS_BIND` | `0.0.0.0:3000` | listen address |
//! | `POSTS_PREFIX` | `/api/posts` | path the posts resource is mounted at |

use std::net::SocketAddr;

use crate::error::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_PREFIX: &str = "/api/posts";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub bind: SocketAddr,
    pub prefix: String,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let bind = lookup("POSTS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind: SocketAddr = bind
            .parse()
            .map_err(|e| Error::config(format!("POSTS_BIND `{bind}`: {e}")))?;

        let prefix = lookup("POSTS_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_owned());
        if !prefix.starts_with('/') {
            return Err(Error::config(format!("POSTS_PREFIX `{prefix}` must start with `/`")));
        }
        let prefix = prefix.trim_end_matches('/').to_owned();

        Ok(Self { bind, prefix })
    }
}
