//! Flat settings map to typed configuration.
//!
//! Host applications often keep their settings as a flat `key = value`
//! table (`secure_response.hsts_support.max_age = 900`). Every raw value is
//! coerced before it is assigned to a typed field:
//!
//! - `"true"` / `"false"` (any case) become booleans
//! - a value containing a newline becomes a whitespace-split list
//! - anything else stays text

use std::collections::HashMap;

use crate::config::schema::{SecureResponseConfig, CSP_DIRECTIVE_KEYS};
use crate::config::ConfigError;

/// Namespace used by [`SecureResponseConfig::from_settings`].
pub const DEFAULT_NAMESPACE: &str = "secure_response";

/// A coerced settings value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl SettingValue {
    /// Coerce a raw settings string.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            SettingValue::Bool(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            SettingValue::Bool(false)
        } else if raw.contains('\n') {
            SettingValue::List(raw.split_whitespace().map(str::to_string).collect())
        } else {
            SettingValue::Text(raw.to_string())
        }
    }
}

/// Read-only view over a flat settings map under one namespace.
struct Settings<'a> {
    map: &'a HashMap<String, String>,
    namespace: &'a str,
}

impl<'a> Settings<'a> {
    fn key(&self, section: &str, name: &str) -> String {
        [self.namespace, section, name]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).map(String::as_str)
    }

    fn flag(&self, section: &str, name: &str, target: &mut bool) -> Result<(), ConfigError> {
        let key = self.key(section, name);
        let Some(raw) = self.raw(&key) else {
            return Ok(());
        };
        match SettingValue::coerce(raw) {
            SettingValue::Bool(value) => {
                *target = value;
                Ok(())
            }
            _ => Err(ConfigError::InvalidValue {
                key,
                expected: "a boolean",
                found: raw.to_string(),
            }),
        }
    }

    fn text(&self, section: &str, name: &str, target: &mut String) {
        let key = self.key(section, name);
        if let Some(raw) = self.raw(&key) {
            *target = match SettingValue::coerce(raw) {
                SettingValue::List(items) => items.join(" "),
                _ => raw.to_string(),
            };
        }
    }

    fn list(&self, section: &str, name: &str, target: &mut Vec<String>) -> Result<(), ConfigError> {
        let key = self.key(section, name);
        let Some(raw) = self.raw(&key) else {
            return Ok(());
        };
        *target = match SettingValue::coerce(raw) {
            SettingValue::List(items) => items,
            SettingValue::Text(text) if text.trim().is_empty() => Vec::new(),
            SettingValue::Text(text) => vec![text.trim().to_string()],
            SettingValue::Bool(_) => {
                return Err(ConfigError::InvalidValue {
                    key,
                    expected: "a list of paths",
                    found: raw.to_string(),
                })
            }
        };
        Ok(())
    }
}

impl SecureResponseConfig {
    /// Build the configuration from flat settings under
    /// [`DEFAULT_NAMESPACE`]. Unset keys keep their defaults.
    pub fn from_settings<I, K, V>(settings: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_settings_in(settings, DEFAULT_NAMESPACE)
    }

    /// Build the configuration from flat settings under `namespace`.
    /// An empty namespace reads bare keys such as `ssl_redirect.enabled`.
    pub fn from_settings_in<I, K, V>(settings: I, namespace: &str) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = settings
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let s = Settings { map: &map, namespace };

        let mut config = SecureResponseConfig::default();

        s.text("", "proto_header", &mut config.proto_header);
        s.list("", "ignore_paths", &mut config.ignore_paths)?;

        let ssl = &mut config.ssl_redirect;
        s.flag("ssl_redirect", "enabled", &mut ssl.enabled)?;
        s.text("ssl_redirect", "proto_header", &mut ssl.proto_header);
        s.list("ssl_redirect", "ignore_paths", &mut ssl.ignore_paths)?;

        let hsts = &mut config.hsts_support;
        s.flag("hsts_support", "enabled", &mut hsts.enabled)?;
        s.text("hsts_support", "proto_header", &mut hsts.proto_header);
        s.list("hsts_support", "ignore_paths", &mut hsts.ignore_paths)?;
        s.text("hsts_support", "max_age", &mut hsts.max_age);
        s.flag("hsts_support", "include_subdomains", &mut hsts.include_subdomains)?;
        s.flag("hsts_support", "preload", &mut hsts.preload)?;

        let csp = &mut config.csp_coverage;
        s.flag("csp_coverage", "enabled", &mut csp.enabled)?;
        s.list("csp_coverage", "ignore_paths", &mut csp.ignore_paths)?;
        for name in CSP_DIRECTIVE_KEYS {
            if let Some(field) = csp.flag_directive_mut(name) {
                s.flag("csp_coverage", name, field)?;
                continue;
            }
            if let Some(field) = csp.text_directive_mut(name) {
                s.text("csp_coverage", name, field);
            }
        }

        tracing::debug!(namespace, keys = map.len(), "Configuration resolved from settings");
        Ok(config)
    }
}
