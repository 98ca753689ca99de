//! Strict-Transport-Security on secure responses.
//!
//! The header is only meaningful over HTTPS, so insecure requests are
//! logged and served without it. A header already set by the inner
//! service is kept.

use axum::http::header::STRICT_TRANSPORT_SECURITY;
use axum::http::{HeaderValue, Request};
use axum::response::Response;
use tracing::Span;

use crate::config::SecureResponseConfig;
use crate::error::{Error, Result};
use crate::http::middleware::{ResponseHardening, Verdict};
use crate::http::request::request_url;
use crate::security::{build_hsts_header, is_ignored, secure_criteria};

/// HSTS policy.
#[derive(Debug, Clone)]
pub struct HstsSupport {
    enabled: bool,
    proto_header: Option<String>,
    ignore_paths: Vec<String>,
    header: HeaderValue,
    span: Span,
}

impl HstsSupport {
    /// Resolve the HSTS settings and prebuild the header value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHeaderValue`] if `max_age` holds bytes not
    /// allowed in a header.
    pub fn from_config(config: &SecureResponseConfig) -> Result<Self> {
        let own = &config.hsts_support;
        let header = HeaderValue::try_from(build_hsts_header(own)).map_err(|source| Error::InvalidHeaderValue {
            header: "Strict-Transport-Security",
            source,
        })?;

        Ok(Self {
            enabled: own.enabled,
            proto_header: config.resolve_proto_header(&own.proto_header).map(str::to_string),
            ignore_paths: config.resolve_ignore_paths(&own.ignore_paths).to_vec(),
            header,
            span: tracing::info_span!("hsts_support"),
        })
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

impl ResponseHardening for HstsSupport {
    fn inspect<B>(&self, req: &Request<B>) -> Verdict {
        if !self.enabled {
            return Verdict::Pass;
        }

        let path = req.uri().path();
        if is_ignored(path, &self.ignore_paths) {
            tracing::info!(parent: &self.span, path, "Ignored path");
            return Verdict::Pass;
        }

        if !secure_criteria(req, self.proto_header.as_deref()).is_secure() {
            tracing::warn!(parent: &self.span, url = %request_url(req), "Insecure request");
            return Verdict::Pass;
        }

        Verdict::Decorate
    }

    fn decorate(&self, response: &mut Response) {
        if response.headers().contains_key(STRICT_TRANSPORT_SECURITY) {
            tracing::debug!(parent: &self.span, "Strict-Transport-Security already set");
            return;
        }
        response.headers_mut().insert(STRICT_TRANSPORT_SECURITY, self.header.clone());
    }
}
