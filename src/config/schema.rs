//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! response-hardening middleware. All types derive Serde traits for
//! deserialization from config files.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration shared by all middleware.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SecureResponseConfig {
    /// Header carrying the original protocol when behind a proxy
    /// (e.g. "X-Forwarded-Proto"). Empty disables the check.
    pub proto_header: String,

    /// Path prefixes bypassing every middleware unless overridden.
    pub ignore_paths: Vec<String>,

    /// HTTP to HTTPS redirection.
    pub ssl_redirect: SslRedirectConfig,

    /// Strict-Transport-Security header.
    pub hsts_support: HstsSupportConfig,

    /// Content-Security-Policy header.
    pub csp_coverage: CspCoverageConfig,
}

impl SecureResponseConfig {
    /// Returns the feature-level proto header, falling back to the shared one.
    ///
    /// `None` means no header check is configured.
    pub fn resolve_proto_header<'a>(&'a self, own: &'a str) -> Option<&'a str> {
        let header = if own.is_empty() { self.proto_header.as_str() } else { own };
        (!header.is_empty()).then_some(header)
    }

    /// Returns the feature-level ignore list, falling back to the shared one.
    pub fn resolve_ignore_paths<'a>(&'a self, own: &'a [String]) -> &'a [String] {
        if own.is_empty() {
            &self.ignore_paths
        } else {
            own
        }
    }
}

/// Redirect configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SslRedirectConfig {
    /// Redirect insecure requests.
    pub enabled: bool,

    /// Overrides the shared `proto_header` when non-empty.
    pub proto_header: String,

    /// Overrides the shared `ignore_paths` when non-empty.
    pub ignore_paths: Vec<String>,
}

impl Default for SslRedirectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            proto_header: String::new(),
            ignore_paths: Vec::new(),
        }
    }
}

/// HTTP Strict Transport Security configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HstsSupportConfig {
    /// Add the header to responses of secure requests.
    pub enabled: bool,

    /// Overrides the shared `proto_header` when non-empty.
    pub proto_header: String,

    /// Overrides the shared `ignore_paths` when non-empty.
    pub ignore_paths: Vec<String>,

    /// Seconds, passed through to the header verbatim.
    #[serde(deserialize_with = "string_or_integer")]
    pub max_age: String,

    /// Append `includeSubDomains`.
    pub include_subdomains: bool,

    /// Append `preload` (HSTS preload list submission).
    pub preload: bool,
}

impl Default for HstsSupportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            proto_header: String::new(),
            ignore_paths: Vec::new(),
            max_age: "31536000".to_string(), // 1 year
            include_subdomains: true,
            preload: true,
        }
    }
}

/// Content Security Policy configuration.
///
/// One field per directive. Field order is the order fragments appear in
/// the header: fetch, document, navigation, reporting, then other
/// directives.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CspCoverageConfig {
    pub enabled: bool,
    pub ignore_paths: Vec<String>,

    // fetch
    /// Deprecated in favour of `frame_src`/`worker_src`.
    pub child_src: String,
    pub connect_src: String,
    pub default_src: String,
    pub font_src: String,
    pub frame_src: String,
    pub img_src: String,
    pub manifest_src: String,
    pub media_src: String,
    pub object_src: String,
    pub script_src: String,
    pub style_src: String,
    pub worker_src: String,

    // document
    pub base_uri: String,
    pub plugin_types: String,
    pub sandbox: String,

    // navigation
    pub form_action: String,
    pub frame_ancestors: String,

    // reporting
    /// Deprecated in favour of `report_to`.
    pub report_uri: String,
    pub report_to: String,

    // other
    pub block_all_mixed_content: bool,
    /// Obsolete.
    pub referrer: String,
    pub require_sri_for: String,
    pub upgrade_insecure_requests: bool,
}

impl Default for CspCoverageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore_paths: Vec::new(),
            child_src: String::new(),
            connect_src: String::new(),
            default_src: String::new(),
            font_src: String::new(),
            frame_src: String::new(),
            img_src: String::new(),
            manifest_src: String::new(),
            media_src: String::new(),
            object_src: String::new(),
            script_src: String::new(),
            style_src: String::new(),
            worker_src: String::new(),
            base_uri: String::new(),
            plugin_types: String::new(),
            sandbox: String::new(),
            form_action: String::new(),
            frame_ancestors: String::new(),
            report_uri: String::new(),
            report_to: String::new(),
            block_all_mixed_content: false,
            referrer: String::new(),
            require_sri_for: String::new(),
            upgrade_insecure_requests: false,
        }
    }
}

/// Directive keys in header order.
pub const CSP_DIRECTIVE_KEYS: [&str; 23] = [
    "child_src",
    "connect_src",
    "default_src",
    "font_src",
    "frame_src",
    "img_src",
    "manifest_src",
    "media_src",
    "object_src",
    "script_src",
    "style_src",
    "worker_src",
    "base_uri",
    "plugin_types",
    "sandbox",
    "form_action",
    "frame_ancestors",
    "report_uri",
    "report_to",
    "block_all_mixed_content",
    "referrer",
    "require_sri_for",
    "upgrade_insecure_requests",
];

impl CspCoverageConfig {
    /// Directive entries as `(config key, raw text)` in header order.
    pub fn directives(&self) -> [(&'static str, Cow<'_, str>); 23] {
        let flag = |value: bool| Cow::Borrowed(if value { "true" } else { "false" });
        [
            ("child_src", Cow::from(self.child_src.as_str())),
            ("connect_src", Cow::from(self.connect_src.as_str())),
            ("default_src", Cow::from(self.default_src.as_str())),
            ("font_src", Cow::from(self.font_src.as_str())),
            ("frame_src", Cow::from(self.frame_src.as_str())),
            ("img_src", Cow::from(self.img_src.as_str())),
            ("manifest_src", Cow::from(self.manifest_src.as_str())),
            ("media_src", Cow::from(self.media_src.as_str())),
            ("object_src", Cow::from(self.object_src.as_str())),
            ("script_src", Cow::from(self.script_src.as_str())),
            ("style_src", Cow::from(self.style_src.as_str())),
            ("worker_src", Cow::from(self.worker_src.as_str())),
            ("base_uri", Cow::from(self.base_uri.as_str())),
            ("plugin_types", Cow::from(self.plugin_types.as_str())),
            ("sandbox", Cow::from(self.sandbox.as_str())),
            ("form_action", Cow::from(self.form_action.as_str())),
            ("frame_ancestors", Cow::from(self.frame_ancestors.as_str())),
            ("report_uri", Cow::from(self.report_uri.as_str())),
            ("report_to", Cow::from(self.report_to.as_str())),
            ("block_all_mixed_content", flag(self.block_all_mixed_content)),
            ("referrer", Cow::from(self.referrer.as_str())),
            ("require_sri_for", Cow::from(self.require_sri_for.as_str())),
            ("upgrade_insecure_requests", flag(self.upgrade_insecure_requests)),
        ]
    }

    /// Mutable access to a text directive by config key.
    pub(crate) fn text_directive_mut(&mut self, key: &str) -> Option<&mut String> {
        let field = match key {
            "child_src" => &mut self.child_src,
            "connect_src" => &mut self.connect_src,
            "default_src" => &mut self.default_src,
            "font_src" => &mut self.font_src,
            "frame_src" => &mut self.frame_src,
            "img_src" => &mut self.img_src,
            "manifest_src" => &mut self.manifest_src,
            "media_src" => &mut self.media_src,
            "object_src" => &mut self.object_src,
            "script_src" => &mut self.script_src,
            "style_src" => &mut self.style_src,
            "worker_src" => &mut self.worker_src,
            "base_uri" => &mut self.base_uri,
            "plugin_types" => &mut self.plugin_types,
            "sandbox" => &mut self.sandbox,
            "form_action" => &mut self.form_action,
            "frame_ancestors" => &mut self.frame_ancestors,
            "report_uri" => &mut self.report_uri,
            "report_to" => &mut self.report_to,
            "referrer" => &mut self.referrer,
            "require_sri_for" => &mut self.require_sri_for,
            _ => return None,
        };
        Some(field)
    }

    /// Mutable access to a boolean directive by config key.
    pub(crate) fn flag_directive_mut(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "block_all_mixed_content" => Some(&mut self.block_all_mixed_content),
            "upgrade_insecure_requests" => Some(&mut self.upgrade_insecure_requests),
            _ => None,
        }
    }
}

/// Accepts `max_age = 900` as well as `max_age = "900"`.
fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SecureResponseConfig::default();
        assert!(config.proto_header.is_empty());
        assert!(config.ignore_paths.is_empty());
        assert!(config.ssl_redirect.enabled);
        assert!(config.hsts_support.enabled);
        assert_eq!(config.hsts_support.max_age, "31536000");
        assert!(config.hsts_support.include_subdomains);
        assert!(config.hsts_support.preload);
        assert!(config.csp_coverage.enabled);
        assert!(!config.csp_coverage.block_all_mixed_content);
        assert!(!config.csp_coverage.upgrade_insecure_requests);
    }

    #[test]
    fn test_fallback_to_shared_values() {
        let mut config = SecureResponseConfig {
            proto_header: "X-Forwarded-Proto".into(),
            ignore_paths: vec!["/static".into()],
            ..Default::default()
        };
        assert_eq!(config.resolve_proto_header(&config.ssl_redirect.proto_header), Some("X-Forwarded-Proto"));
        assert_eq!(config.resolve_ignore_paths(&config.csp_coverage.ignore_paths), ["/static".to_string()]);

        config.hsts_support.proto_header = "X-Scheme".into();
        config.hsts_support.ignore_paths = vec!["/health".into()];
        assert_eq!(config.resolve_proto_header(&config.hsts_support.proto_header), Some("X-Scheme"));
        assert_eq!(config.resolve_ignore_paths(&config.hsts_support.ignore_paths), ["/health".to_string()]);

        config.proto_header.clear();
        assert_eq!(config.resolve_proto_header(""), None);
    }

    #[test]
    fn test_directive_order() {
        let config = CspCoverageConfig {
            default_src: "self".into(),
            upgrade_insecure_requests: true,
            ..Default::default()
        };
        let entries = config.directives();
        assert_eq!(entries[0].0, "child_src");
        assert_eq!(entries[2], ("default_src", Cow::Borrowed("self")));
        assert_eq!(entries[19], ("block_all_mixed_content", Cow::Borrowed("false")));
        assert_eq!(entries[22], ("upgrade_insecure_requests", Cow::Borrowed("true")));
    }

    #[test]
    fn test_max_age_accepts_integer() {
        let config: HstsSupportConfig = toml::from_str("max_age = 900").unwrap();
        assert_eq!(config.max_age, "900");
        assert!(config.preload);

        let config: HstsSupportConfig = toml::from_str("max_age = \"600\"").unwrap();
        assert_eq!(config.max_age, "600");
    }
}
