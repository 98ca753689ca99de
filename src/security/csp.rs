//! Content-Security-Policy header value.
//!
//! Each configured directive becomes one `name value...` fragment and the
//! fragments are joined with `"; "`. Source tokens are single-quoted
//! (`self` → `'self'`) unless they are scheme sources, sandbox flags,
//! MIME types, values of directives that never take keywords, or are
//! already quoted.
//!
//! See <https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Security-Policy>.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

/// `<type>/<subtype>` as used by `plugin-types`.
static MIME_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[-\w]+/[-\w]+\z").expect("MIME type pattern is valid"));

/// Scheme sources. The trailing colon is required.
const SCHEME_SOURCES: [&str; 6] = ["blob:", "data:", "filesystem:", "http:", "https:", "mediastream:"];

/// `sandbox` flags.
const SANDBOX_VALUES: [&str; 10] = [
    "allow-forms",
    "allow-modals",
    "allow-orientation-lock",
    "allow-pointer-lock",
    "allow-popups",
    "allow-popups-to-escape-sandbox",
    "allow-presentation",
    "allow-same-origin",
    "allow-scripts",
    "allow-top-navigation",
];

const NO_QUOTE_DIRECTIVES: [&str; 3] = ["report-uri", "report-to", "plugin-types"];

const BOOLEAN_DIRECTIVES: [&str; 2] = ["block-all-mixed-content", "upgrade-insecure-requests"];

/// Config keys that are not directives.
const RESERVED_KEYS: [&str; 2] = ["enabled", "ignore_paths"];

fn needs_quotes(directive: &str, token: &str) -> bool {
    !(SCHEME_SOURCES.iter().any(|scheme| token.starts_with(scheme))
        || SANDBOX_VALUES.contains(&token)
        || NO_QUOTE_DIRECTIVES.contains(&directive)
        || MIME_TYPE.is_match(token)
        || token.contains('\''))
}

/// Build one directive fragment from its hyphenated name and raw text.
///
/// Returns `None` when the directive contributes nothing: empty text, or a
/// boolean directive whose text is not `true`.
pub fn build_directive(directive: &str, raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    if BOOLEAN_DIRECTIVES.contains(&directive) {
        return raw.eq_ignore_ascii_case("true").then(|| directive.to_string());
    }

    let tokens: Vec<String> = raw
        .split(' ')
        .map(|token| {
            if needs_quotes(directive, token) {
                format!("'{token}'")
            } else {
                token.to_string()
            }
        })
        .collect();

    Some(format!("{directive} {}", tokens.join(" ")))
}

/// Build the full header value from `(config key, raw text)` entries.
///
/// Entries are emitted in iteration order; `enabled` and `ignore_paths`
/// are skipped. Returns an empty string if no directive produced output.
pub fn build_csp_header<I, K, V>(entries: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut policy = String::new();

    for (key, value) in entries {
        let key = key.as_ref();
        if RESERVED_KEYS.contains(&key) {
            continue;
        }
        if let Some(fragment) = build_directive(&key.replace('_', "-"), value.as_ref()) {
            policy.push_str("; ");
            policy.push_str(&fragment);
        }
    }

    policy.split_off(policy.len().min(2))
}

/// Build the header value from a JSON object of directives.
///
/// Key order of the object is kept. Anything other than an object, or an
/// object holding nested objects, is rejected.
pub fn csp_header_from_json(directives: &Value) -> Result<String> {
    let Value::Object(map) = directives else {
        return Err(Error::InvalidArgument(format!(
            "expected a directive mapping, got {}",
            kind(directives)
        )));
    };

    let entries = map
        .iter()
        .map(|(key, value)| directive_text(key, value).map(|text| (key.as_str(), text)))
        .collect::<Result<Vec<_>>>()?;

    Ok(build_csp_header(entries))
}

fn directive_text(key: &str, value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(_) => {
            return Err(Error::InvalidArgument(format!(
                "directive `{key}` must be text, a boolean or a list"
            )))
        }
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CspCoverageConfig;
    use serde_json::json;

    fn header(pairs: &[(&str, &str)]) -> String {
        let mut config = CspCoverageConfig::default();
        for (key, value) in pairs {
            match (*key, *value) {
                ("block_all_mixed_content", v) => config.block_all_mixed_content = v == "true",
                ("upgrade_insecure_requests", v) => config.upgrade_insecure_requests = v == "true",
                (key, v) => *config.text_directive_mut(key).unwrap() = v.to_string(),
            }
        }
        build_csp_header(config.directives())
    }

    #[test]
    fn test_fetch_directives() {
        assert_eq!(header(&[]), "");
        assert_eq!(
            header(&[("child_src", "self"), ("default_src", "none")]),
            "child-src 'self'; default-src 'none'"
        );
        assert_eq!(
            header(&[("default_src", "none"), ("connect_src", "self")]),
            "connect-src 'self'; default-src 'none'"
        );
        assert_eq!(header(&[("default_src", "")]), "");
        assert_eq!(header(&[("default_src", "https:")]), "default-src https:");
        assert_eq!(
            header(&[("default_src", "self https://example.org/")]),
            "default-src 'self' https://example.org/"
        );
        assert_eq!(header(&[("font_src", "unsafe-inline")]), "font-src 'unsafe-inline'");
        assert_eq!(header(&[("frame_src", "unsafe-eval")]), "frame-src 'unsafe-eval'");
        assert_eq!(header(&[("img_src", "strict-dynamic")]), "img-src 'strict-dynamic'");
        assert_eq!(header(&[("manifest_src", "nonce-2726c7f26c")]), "manifest-src 'nonce-2726c7f26c'");
        assert_eq!(header(&[("object_src", "*")]), "object-src '*'");
        assert_eq!(header(&[("script_src", "https://example.org/")]), "script-src https://example.org/");
        assert_eq!(
            header(&[("worker_src", "self https://example.org/ https://example.com/")]),
            "worker-src 'self' https://example.org/ https://example.com/"
        );
        assert_eq!(header(&[("img_src", "data: blob:")]), "img-src data: blob:");
    }

    #[test]
    fn test_document_directives() {
        assert_eq!(
            header(&[("base_uri", "self"), ("default_src", "none")]),
            "default-src 'none'; base-uri 'self'"
        );
        assert_eq!(
            header(&[("plugin_types", "application/x-schockwave-flash"), ("object_src", "")]),
            "plugin-types application/x-schockwave-flash"
        );
        assert_eq!(
            header(&[("plugin_types", "application/xhtml+xml"), ("object_src", "")]),
            "plugin-types application/xhtml+xml"
        );
        assert_eq!(
            header(&[("plugin_types", "application/vnd.mozilla.xul+xml")]),
            "plugin-types application/vnd.mozilla.xul+xml"
        );
        assert_eq!(header(&[("plugin_types", "video/3gpp2")]), "plugin-types video/3gpp2");
        assert_eq!(header(&[("sandbox", "allow-forms")]), "sandbox allow-forms");
        assert_eq!(
            header(&[("sandbox", "allow-scripts allow-same-origin")]),
            "sandbox allow-scripts allow-same-origin"
        );
    }

    #[test]
    fn test_navigation_and_reporting_directives() {
        assert_eq!(header(&[("form_action", "self")]), "form-action 'self'");
        assert_eq!(header(&[("frame_ancestors", "self")]), "frame-ancestors 'self'");
        assert_eq!(
            header(&[("default_src", "https:"), ("report_uri", "/csp-violation-report-endpoint/")]),
            "default-src https:; report-uri /csp-violation-report-endpoint/"
        );
        assert_eq!(
            header(&[("default_src", "https:"), ("report_to", "csp-endpoint")]),
            "default-src https:; report-to csp-endpoint"
        );
    }

    #[test]
    fn test_other_directives() {
        assert_eq!(header(&[("block_all_mixed_content", "true")]), "block-all-mixed-content");
        assert_eq!(header(&[("upgrade_insecure_requests", "true")]), "upgrade-insecure-requests");
        assert_eq!(header(&[("block_all_mixed_content", "false")]), "");
        assert_eq!(header(&[("referrer", "no-referrer")]), "referrer 'no-referrer'");
        assert_eq!(header(&[("require_sri_for", "script style")]), "require-sri-for 'script' 'style'");
        assert_eq!(
            header(&[
                ("default_src", "self"),
                ("upgrade_insecure_requests", "true"),
                ("block_all_mixed_content", "true"),
            ]),
            "default-src 'self'; block-all-mixed-content; upgrade-insecure-requests"
        );
    }

    #[test]
    fn test_build_directive() {
        assert_eq!(build_directive("upgrade-insecure-requests", "TRUE").as_deref(), Some("upgrade-insecure-requests"));
        for value in ["false", "", "yes", "1"] {
            assert_eq!(build_directive("block-all-mixed-content", value), None, "{value:?}");
        }
        assert_eq!(build_directive("script-src", "'nonce-abc' self").as_deref(), Some("script-src 'nonce-abc' 'self'"));
        assert_eq!(build_directive("report-uri", "/report").as_deref(), Some("report-uri /report"));
        assert_eq!(build_directive("object-src", "text/plain").as_deref(), Some("object-src text/plain"));
        assert_eq!(build_directive("img-src", "mediastream:").as_deref(), Some("img-src mediastream:"));
        assert_eq!(build_directive("img-src", "filesystem:x").as_deref(), Some("img-src filesystem:x"));
        assert_eq!(build_directive("img-src", "ftp:").as_deref(), Some("img-src 'ftp:'"));
    }

    #[test]
    fn test_reserved_keys_skipped() {
        let value = build_csp_header([("enabled", "true"), ("ignore_paths", "/static"), ("default_src", "self")]);
        assert_eq!(value, "default-src 'self'");
        assert_eq!(build_csp_header([("enabled", "true")]), "");
    }

    #[test]
    fn test_no_leading_separator() {
        let value = build_csp_header([("default_src", ""), ("img_src", ""), ("script_src", "self")]);
        assert_eq!(value, "script-src 'self'");
        assert!(!value.starts_with("; "));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(csp_header_from_json(&json!({})).unwrap(), "");
        assert_eq!(csp_header_from_json(&json!({"enabled": true})).unwrap(), "");
        assert_eq!(
            csp_header_from_json(&json!({
                "script_src": "self",
                "default_src": ["none"],
                "upgrade_insecure_requests": true,
                "img_src": null,
            }))
            .unwrap(),
            "script-src 'self'; default-src 'none'; upgrade-insecure-requests"
        );
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        for value in [json!("not a mapping"), json!([]), json!(1), json!(null), json!(true)] {
            assert!(matches!(csp_header_from_json(&value), Err(Error::InvalidArgument(_))), "{value}");
        }
        assert!(matches!(
            csp_header_from_json(&json!({"default_src": {"self": true}})),
            Err(Error::InvalidArgument(_))
        ));
    }
}
