//! Request URL reconstruction.
//!
//! Servers usually see origin-form URIs (`/path?query`) with no scheme or
//! host. The full URL is rebuilt from:
//! - scheme: the URI scheme, else a [`Scheme`] request extension inserted
//!   by a TLS-terminating acceptor, else `http`
//! - host: the URI authority (absolute-form targets override `Host`),
//!   else the `Host` header
//! - path and query: the URI

use axum::http::uri::Scheme;
use axum::http::{header, Request};

/// Scheme the request arrived with.
pub fn request_scheme<B>(req: &Request<B>) -> &str {
    req.uri()
        .scheme_str()
        .or_else(|| req.extensions().get::<Scheme>().map(Scheme::as_str))
        .unwrap_or("http")
}

/// Host (with port, if any) the request was addressed to.
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
    req.uri()
        .authority()
        .map(|authority| {
            let authority = authority.as_str();
            authority.rsplit_once('@').map_or(authority, |(_, host)| host)
        })
        .or_else(|| req.headers().get(header::HOST).and_then(|h| h.to_str().ok()))
}

/// Fully qualified request URL, e.g. `https://example.org:8443/a?b=c`.
pub fn request_url<B>(req: &Request<B>) -> String {
    let path_and_query = req.uri().path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!(
        "{}://{}{}",
        request_scheme(req),
        request_host(req).unwrap_or_default(),
        path_and_query
    )
}
