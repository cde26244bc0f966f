//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()   clean / create the output directory
//!     ├── render_page()      PageShell + head sync ──► HTML
//!     ├── minify()           ──► index.html
//!     └── build_sitemap()    ──► sitemap.xml (optional)
//! ```

use crate::{
    catalog::Catalog,
    config::SiteConfig,
    log,
    render::render_page,
    shell::PageShell,
    sitemap::build_sitemap,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

pub const INDEX_FILE: &str = "index.html";

/// Render the landing page into `config.build.output`.
///
/// If `config.build.clean` is true, the output directory is emptied first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let mut shell = PageShell::new(Catalog::builtin(), config);
    let html = render_page(&mut shell, config)?;
    let html = minify(MinifyType::Html(html.as_bytes()), config);

    let index = output.join(INDEX_FILE);
    fs::write(&index, &*html)
        .with_context(|| format!("Failed to write {}", index.display()))?;

    build_sitemap(config, output, chrono::Local::now().date_naive())?;

    log!(
        "build";
        "{} courses -> {}",
        shell.catalog().len(),
        index.display()
    );
    Ok(())
}

fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    Ok(())
}
