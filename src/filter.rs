//! Decides which link targets are never checked: anchors, external references,
//! and templated text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Schemes that always point outside the documentation tree.
pub const DEFAULT_SKIP_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// `scheme:` prefix as URL parsers recognize it.
static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid regex");
});

/// Skip rules for a single check run. Scheme names are stored lowercase.
#[derive(Debug, Clone)]
pub struct TargetFilter {
    schemes: BTreeSet<String>,
}

impl Default for TargetFilter {
    fn default() -> Self {
        return Self {
            schemes: DEFAULT_SKIP_SCHEMES.iter().map(|s| return (*s).to_string()).collect(),
        };
    }
}

impl TargetFilter {
    /// Default filter extended with additional schemes from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidScheme` if an entry is not a syntactically valid scheme.
    pub fn with_extra_schemes(extra: &[String]) -> Result<Self, Error> {
        let mut filter = Self::default();
        for scheme in extra {
            let name = scheme.trim().trim_end_matches(':');
            let probe = format!("{name}:");
            let valid = SCHEME.captures(&probe).is_some_and(|c| return c[1].len() == name.len());
            if !valid {
                return Err(Error::InvalidScheme { scheme: scheme.clone() });
            }
            filter.schemes.insert(name.to_ascii_lowercase());
        }
        return Ok(filter);
    }

    /// True when `target` must not be checked against the filesystem.
    pub fn should_skip(&self, target: &str) -> bool {
        if target.trim().is_empty() {
            return true;
        }
        if target.starts_with('#') || target.starts_with("//") {
            return true;
        }
        if is_templated(target) {
            return true;
        }
        return url_scheme(target).is_some_and(|s| return self.schemes.contains(&s));
    }
}

/// Liquid/Jinja-style markers mean the target is generated at build time.
fn is_templated(text: &str) -> bool {
    return text.contains("{{") || text.contains("{%");
}

/// Lowercased URL scheme of `target`, if it has one.
pub fn url_scheme(target: &str) -> Option<String> {
    return SCHEME.captures(target).map(|c| return c[1].to_ascii_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_and_whitespace() {
        let filter = TargetFilter::default();
        assert!(filter.should_skip(""));
        assert!(filter.should_skip("   "));
    }

    #[test]
    fn skips_anchor_and_protocol_relative() {
        let filter = TargetFilter::default();
        assert!(filter.should_skip("#install"));
        assert!(filter.should_skip("//cdn.example.com/lib.js"));
        assert!(!filter.should_skip("/guide/"));
    }

    #[test]
    fn skips_templated_targets() {
        let filter = TargetFilter::default();
        assert!(filter.should_skip("{{ site.baseurl }}/guide"));
        assert!(filter.should_skip("{% link guide.md %}"));
    }

    #[test]
    fn skips_excluded_schemes_case_insensitively() {
        let filter = TargetFilter::default();
        assert!(filter.should_skip("https://example.com"));
        assert!(filter.should_skip("HTTP://example.com"));
        assert!(filter.should_skip("mailto:someone@example.com"));
        assert!(filter.should_skip("tel:+15551234"));
    }

    #[test]
    fn other_schemes_are_checked() {
        let filter = TargetFilter::default();
        assert!(!filter.should_skip("ftp://example.com/file"));
        assert!(!filter.should_skip("guide/setup.md"));
    }

    #[test]
    fn extra_schemes_extend_the_default() {
        let filter = TargetFilter::with_extra_schemes(&["FTP".to_string(), "irc:".to_string()]).unwrap();
        assert!(filter.should_skip("ftp://example.com/file"));
        assert!(filter.should_skip("irc://chat.example.com"));
        assert!(filter.should_skip("https://example.com"));
    }

    #[test]
    fn rejects_invalid_extra_scheme() {
        let err = TargetFilter::with_extra_schemes(&["1bad".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidScheme { .. }));
    }

    #[test]
    fn scheme_detection() {
        assert_eq!(url_scheme("Https://x"), Some("https".to_string()));
        assert_eq!(url_scheme("guide/setup.md"), None);
        assert_eq!(url_scheme("../a.md"), None);
    }
}
