//! Wiring all middleware onto an axum router.
//!
//! Order from the outside in:
//!
//! ```text
//! ssl_redirect → hsts_support → csp_coverage → handler
//! ```
//!
//! so insecure requests are redirected before any header work happens.

use axum::Router;

use crate::config::SecureResponseConfig;
use crate::error::Result;
use crate::http::middleware::{CspCoverage, HardeningLayer, HstsSupport, SslRedirect};

/// The three hardening layers built from one configuration.
#[derive(Clone)]
pub struct SecureResponseLayers {
    pub ssl_redirect: HardeningLayer<SslRedirect>,
    pub hsts_support: HardeningLayer<HstsSupport>,
    pub csp_coverage: HardeningLayer<CspCoverage>,
}

impl SecureResponseLayers {
    /// Build every layer from `config`.
    ///
    /// # Errors
    /// Fails if a configured header value is not a valid HTTP header value.
    pub fn from_config(config: &SecureResponseConfig) -> Result<Self> {
        let layers = Self {
            ssl_redirect: HardeningLayer::new(SslRedirect::from_config(config)),
            hsts_support: HardeningLayer::new(HstsSupport::from_config(config)?),
            csp_coverage: HardeningLayer::new(CspCoverage::from_config(config)?),
        };

        tracing::info!(
            ssl_redirect = config.ssl_redirect.enabled,
            hsts_support = config.hsts_support.enabled,
            csp_coverage = config.csp_coverage.enabled,
            "Secure response middleware configured"
        );
        Ok(layers)
    }

    /// Install the layers on `router`.
    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        // Last layer added is the outermost.
        router
            .layer(self.csp_coverage)
            .layer(self.hsts_support)
            .layer(self.ssl_redirect)
    }
}
