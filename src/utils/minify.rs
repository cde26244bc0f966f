//! Minification for the rendered page and the sitemap.
//!
//! Both outputs go through [`minify`], which is a no-op unless
//! `[build] minify = true`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    /// HTML content
    Html(&'a [u8]),
    /// XML content
    Xml(&'a [u8]),
}

/// Minify content based on type and config.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match (config.build.minify, content) {
        (false, MinifyType::Html(bytes) | MinifyType::Xml(bytes)) => Cow::Borrowed(bytes),
        (true, MinifyType::Html(html)) => Cow::Owned(minify_html_inner(html)),
        (true, MinifyType::Xml(xml)) => Cow::Owned(minify_xml_inner(xml)),
    }
}

/// Minify HTML using `minify_html`.
///
/// Head and html opening tags are kept so crawlers looking for
/// `<head>` still find the metadata block.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

/// Minify XML by dropping indentation and blank lines.
fn minify_xml_inner(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<String>()
        .into_bytes()
}
