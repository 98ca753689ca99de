//! Redirect insecure requests to HTTPS.
//!
//! Requests failing the secure criteria never reach the inner service; they
//! get `301 Moved Permanently` to `https://<host><path>` (query dropped).
//! Without a host to redirect to they get `400 Bad Request`.

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::Span;

use crate::config::SecureResponseConfig;
use crate::http::request::{request_host, request_url};
use crate::http::middleware::{ResponseHardening, Verdict};
use crate::security::{is_ignored, secure_criteria};

/// HTTP → HTTPS redirect policy.
#[derive(Debug, Clone)]
pub struct SslRedirect {
    enabled: bool,
    proto_header: Option<String>,
    ignore_paths: Vec<String>,
    span: Span,
}

impl SslRedirect {
    /// Resolve the redirect settings, applying the shared fallbacks.
    pub fn from_config(config: &SecureResponseConfig) -> Self {
        let own = &config.ssl_redirect;
        Self {
            enabled: own.enabled,
            proto_header: config.resolve_proto_header(&own.proto_header).map(str::to_string),
            ignore_paths: config.resolve_ignore_paths(&own.ignore_paths).to_vec(),
            span: tracing::info_span!("ssl_redirect"),
        }
    }

    /// Use `span` as the parent of this middleware's log events.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn redirect<B>(&self, req: &Request<B>) -> Response {
        let Some(host) = request_host(req) else {
            tracing::warn!(parent: &self.span, path = req.uri().path(), "No host to redirect to");
            return StatusCode::BAD_REQUEST.into_response();
        };
        let location = format!("https://{host}{}", req.uri().path());
        match HeaderValue::try_from(location) {
            Ok(location) => (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response(),
            Err(e) => {
                tracing::warn!(parent: &self.span, error = %e, "Cannot build redirect location");
                StatusCode::BAD_REQUEST.into_response()
            }
        }
    }
}

impl ResponseHardening for SslRedirect {
    fn inspect<B>(&self, req: &Request<B>) -> Verdict {
        if !self.enabled {
            return Verdict::Pass;
        }

        let path = req.uri().path();
        if is_ignored(path, &self.ignore_paths) {
            tracing::info!(parent: &self.span, path, "Ignored path");
            return Verdict::Pass;
        }

        if secure_criteria(req, self.proto_header.as_deref()).is_secure() {
            return Verdict::Pass;
        }

        tracing::warn!(parent: &self.span, url = %request_url(req), "Insecure request");
        Verdict::Respond(self.redirect(req))
    }
}
