//! Crate-level error type.

use axum::http::header::InvalidHeaderValue;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while building middleware or header values.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller handed over input of the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configured header value contains bytes not allowed in HTTP headers.
    #[error("Invalid {header} header value: {source}")]
    InvalidHeaderValue {
        header: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
