//! Sitemap generation.
//!
//! The landing page is a single document, so the sitemap has one entry:
//! the canonical URL, stamped with the build date.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://training-institute-sa.com/</loc>
//!     <lastmod>2026-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::{fs, path::Path};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Write `sitemap.xml` into `output` if enabled in config.
pub fn build_sitemap(config: &SiteConfig, output: &Path, lastmod: NaiveDate) -> Result<()> {
    if !config.build.sitemap {
        return Ok(());
    }

    let sitemap = Sitemap {
        urls: vec![UrlEntry {
            loc: config.canonical_url(),
            lastmod: Some(lastmod.format("%Y-%m-%d").to_string()),
        }],
    };
    sitemap.write(config, &output.join(SITEMAP_FILE))
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    /// YYYY-MM-DD
    lastmod: Option<String>,
}

impl Sitemap {
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig, path: &Path) -> Result<()> {
        let xml = self.into_xml();
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

        fs::write(path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}", SITEMAP_FILE);
        Ok(())
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
