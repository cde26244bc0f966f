//! `[site]` section configuration.
//!
//! Page-level metadata: what ends up in `<title>`, the description meta tag
//! and the canonical link.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in campus.toml - page metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "Training Institute – Math, English, GRE, STEP"
/// description = "Professional training in Riyadh"
/// url = "https://training-institute-sa.com"
/// canonical_path = "/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Document title.
    #[serde(default = "defaults::site::title")]
    #[educe(Default = defaults::site::title())]
    pub title: String,

    /// Content of `<meta name="description">`.
    #[serde(default = "defaults::site::description")]
    #[educe(Default = defaults::site::description())]
    pub description: String,

    /// Origin the page is published under (scheme + host, no trailing slash).
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: String,

    /// Path appended to `url` for the canonical link.
    #[serde(default = "defaults::site::canonical_path")]
    #[educe(Default = defaults::site::canonical_path())]
    pub canonical_path: String,

    /// Value of `<html lang>`.
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Brand shown in the header and footer.
    #[serde(default = "defaults::site::brand")]
    #[educe(Default = defaults::site::brand())]
    pub brand: String,
}

impl SiteSection {
    /// Origin without a trailing slash, so `origin + path` never doubles it.
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_site_section_full() {
        let config = r#"
            [site]
            title = "Institute"
            description = "Courses in Riyadh"
            url = "https://example.com/"
            canonical_path = "/courses"
            language = "ar"
            brand = "Inst."
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.title, "Institute");
        assert_eq!(config.site.description, "Courses in Riyadh");
        assert_eq!(config.site.origin(), "https://example.com");
        assert_eq!(config.site.canonical_path, "/courses");
        assert_eq!(config.site.language, "ar");
        assert_eq!(config.site.brand, "Inst.");
    }

    #[test]
    fn test_site_section_defaults() {
        let config: SiteConfig = toml::from_str("[site]").unwrap();

        assert_eq!(config.site.title, "Training Institute – Math, English, GRE, STEP");
        assert!(config.site.description.starts_with("Professional training in Riyadh"));
        assert_eq!(config.site.url, "https://training-institute-sa.com");
        assert_eq!(config.site.canonical_path, "/");
        assert_eq!(config.site.brand, "Training Institute");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [site]
            author = "nobody"
        "#,
        );
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }
}
