//! Secure-request criteria shared by redirect and HSTS middleware.
//!
//! A request is secure only when every criterion holds:
//! 1. its URL starts with `https://`
//! 2. if a proto header is configured, that header equals `https`
//!    (absent means `http`)
//!
//! Behind a TLS-terminating proxy both checks must agree. A client that
//! reaches the server directly over plaintext fails the first check even
//! if it sends the proto header itself.

use axum::http::Request;

use crate::http::request::request_url;

const SECURE_URL_PREFIX: &str = "https://";
const SECURE_PROTO: &[u8] = b"https";

/// Ordered results of the individual security checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria(Vec<bool>);

impl Criteria {
    /// True if all criteria hold.
    pub fn is_secure(&self) -> bool {
        self.0.iter().all(|c| *c)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Evaluate the security criteria for `req`.
pub fn secure_criteria<B>(req: &Request<B>, proto_header: Option<&str>) -> Criteria {
    let mut criteria = vec![request_url(req).starts_with(SECURE_URL_PREFIX)];

    if let Some(name) = proto_header.filter(|name| !name.is_empty()) {
        let proto_is_https = req
            .headers()
            .get(name)
            .map(|value| value.as_bytes() == SECURE_PROTO)
            .unwrap_or(false);
        criteria.push(proto_is_https);
    }

    Criteria(criteria)
}
