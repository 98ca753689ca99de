//! Content-Security-Policy on every response.
//!
//! The header value is built once from the config. Nothing is added when
//! no directive is configured or the inner service already set one.

use axum::http::header::CONTENT_SECURITY_POLICY;
use axum::http::{HeaderValue, Request};
use axum::response::Response;
use tracing::Span;

use crate::config::SecureResponseConfig;
use crate::error::{Error, Result};
use crate::http::middleware::{ResponseHardening, Verdict};
use crate::security::{build_csp_header, is_ignored};

/// CSP policy.
#[derive(Debug, Clone)]
pub struct CspCoverage {
    enabled: bool,
    ignore_paths: Vec<String>,
    header: Option<HeaderValue>,
    span: Span,
}

impl CspCoverage {
    /// Resolve the CSP settings and prebuild the header value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHeaderValue`] if a directive holds bytes not
    /// allowed in a header.
    pub fn from_config(config: &SecureResponseConfig) -> Result<Self> {
        let own = &config.csp_coverage;
        let value = build_csp_header(own.directives());
        let header = if value.is_empty() {
            None
        } else {
            Some(HeaderValue::try_from(value).map_err(|source| Error::InvalidHeaderValue {
                header: "Content-Security-Policy",
                source,
            })?)
        };

        Ok(Self {
            enabled: own.enabled,
            ignore_paths: config.resolve_ignore_paths(&own.ignore_paths).to_vec(),
            header,
            span: tracing::info_span!("csp_coverage"),
        })
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The prebuilt header value, `None` if no directive is configured.
    pub fn header_value(&self) -> Option<&HeaderValue> {
        self.header.as_ref()
    }
}

impl ResponseHardening for CspCoverage {
    fn inspect<B>(&self, req: &Request<B>) -> Verdict {
        if !self.enabled {
            return Verdict::Pass;
        }

        let path = req.uri().path();
        if is_ignored(path, &self.ignore_paths) {
            tracing::info!(parent: &self.span, path, "Ignored path");
            return Verdict::Pass;
        }

        match self.header {
            Some(_) => Verdict::Decorate,
            None => Verdict::Pass,
        }
    }

    fn decorate(&self, response: &mut Response) {
        let Some(header) = &self.header else {
            return;
        };
        if response.headers().contains_key(CONTENT_SECURITY_POLICY) {
            tracing::debug!(parent: &self.span, "Content-Security-Policy already set");
            return;
        }
        response.headers_mut().insert(CONTENT_SECURITY_POLICY, header.clone());
    }
}
