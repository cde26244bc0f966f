//! `[build]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in campus.toml - output settings.
///
/// # Example
/// ```toml
/// [build]
/// output = "public"
/// minify = true
/// sitemap = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Output directory, relative to root until normalized.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify `index.html` and `sitemap.xml`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Write `sitemap.xml` next to the page.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub sitemap: bool,

    /// Remove the output directory before writing.
    #[serde(default)]
    pub clean: bool,
}
