//! Strict-Transport-Security header value.

use crate::config::HstsSupportConfig;

/// Build the header value. `max_age` is passed through unvalidated.
pub fn build_hsts_header(config: &HstsSupportConfig) -> String {
    let mut value = format!("max-age={}", config.max_age);
    if config.include_subdomains {
        value.push_str("; includeSubDomains");
    }
    if config.preload {
        value.push_str("; preload");
    }
    value
}
