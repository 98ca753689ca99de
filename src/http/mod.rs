//! HTTP integration.
//!
//! # Data Flow
//! ```text
//! Request
//!     → request.rs (rebuild scheme + host + path)
//!     → middleware/ (redirect, HSTS, CSP policies as tower layers)
//!     → inner handler
//!     → middleware/ (decorate response headers)
//!     → Response
//! ```

pub mod middleware;
pub mod request;
pub mod stack;

pub use middleware::{
    CspCoverage, HardeningLayer, HardeningService, HstsSupport, ResponseHardening, SslRedirect, Verdict,
};
pub use request::{request_host, request_scheme, request_url};
pub use stack::SecureResponseLayers;
