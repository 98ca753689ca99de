//! Request classification and security header values.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → path_filter.rs (skip ignored prefixes)
//!     → criteria.rs (is the request secure?)
//! Outgoing response:
//!     → hsts.rs (Strict-Transport-Security value)
//!     → csp.rs (Content-Security-Policy value)
//! ```
//!
//! Everything here is a pure function of the request and the config.

pub mod criteria;
pub mod csp;
pub mod hsts;
pub mod path_filter;

pub use criteria::{secure_criteria, Criteria};
pub use csp::{build_csp_header, build_directive, csp_header_from_json};
pub use hsts::build_hsts_header;
pub use path_filter::is_ignored;
