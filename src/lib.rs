//! Response-hardening middleware for axum/tower services.
//!
//! - **ssl_redirect**: `301` plaintext requests to `https://<host><path>`
//! - **hsts_support**: `Strict-Transport-Security` on secure responses
//! - **csp_coverage**: `Content-Security-Policy` built from config
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use secure_response::{SecureResponseConfig, SecureResponseLayers};
//!
//! # fn main() -> Result<(), secure_response::Error> {
//! let mut config = SecureResponseConfig::default();
//! config.proto_header = "X-Forwarded-Proto".into();
//! config.csp_coverage.default_src = "self".into();
//!
//! let app: Router = SecureResponseLayers::from_config(&config)?
//!     .apply(Router::new().route("/", get(|| async { "hello" })));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod security;

pub use config::SecureResponseConfig;
pub use error::{Error, Result};
pub use http::SecureResponseLayers;
