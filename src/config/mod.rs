//! Site configuration management for `campus.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[site]`         | Title, description, origin, canonical path     |
//! | `[organization]` | JSON-LD organization node                      |
//! | `[contact]`      | Form backend endpoint                          |
//! | `[head]`         | Extra trusted head elements                    |
//! | `[build]`        | Output directory, minify, sitemap              |
//! | `[serve]`        | Development server (port, interface, watch)    |
//!
//! Every field has a default, so a missing `campus.toml` still builds the
//! institute's page.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://training-institute-sa.com"
//!
//! [contact]
//! endpoint = "https://formspree.io/f/mdkdvkak"
//!
//! [serve]
//! port = 5277
//! ```

mod build;
mod contact;
pub mod defaults;
mod error;
mod handle;
mod organization;
mod serve;
mod site;

pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};
pub use organization::OrganizationSection;

use build::BuildSection;
use contact::{ContactSection, HeadSection};
use serve::ServeSection;
use site::SiteSection;

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing campus.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub organization: OrganizationSection,

    #[serde(default)]
    pub contact: ContactSection,

    #[serde(default)]
    pub head: HeadSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub serve: ServeSection,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load config for the given CLI invocation.
    ///
    /// Falls back to defaults when the config file does not exist.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            if !cli.is_init() {
                log!("config"; "{} not found, using defaults", cli.config.display());
            }
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Canonical URL of the page: `origin + canonical_path`.
    pub fn canonical_url(&self) -> String {
        format!("{}{}", self.site.origin(), self.site.canonical_path)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = Self::normalize_path(&root);
        self.set_root(&root);

        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.sitemap, args.sitemap.as_ref());
            Self::update_option(&mut self.site.url, args.base_url.as_ref());
        }

        match &cli.command {
            Commands::Serve {
                interface,
                port,
                watch,
                ..
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
            }
            Commands::Submit {
                endpoint: Some(endpoint),
                ..
            } => {
                self.contact.endpoint = endpoint.clone();
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !self.site.url.starts_with("http") {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if !self.site.canonical_path.starts_with('/') {
            bail!(ConfigError::Validation(
                "[site.canonical_path] must start with `/`".into()
            ));
        }

        if !self.contact.endpoint.starts_with("http") {
            bail!(ConfigError::Validation(
                "[contact.endpoint] must start with http:// or https://".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str(
            r#"
            [site]
            title = "My Institute"
        "#,
        )
        .unwrap();

        assert_eq!(config.site.title, "My Institute");
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site").is_err());
    }

    #[test]
    fn test_unknown_top_level_section_rejection() {
        let result = SiteConfig::from_str("[deploy]\nprovider = \"github\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.get_root(), Path::new("./"));
        assert!(config.validate().is_ok());
        assert_eq!(config.canonical_url(), "https://training-institute-sa.com/");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SiteConfig::default();
        config.site.url = "training-institute-sa.com".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.site.canonical_path = "courses".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.contact.endpoint = "mailto:info@example.com".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_canonical_url_strips_trailing_slash() {
        let mut config = SiteConfig::default();
        config.site.url = "https://example.com/".into();
        config.site.canonical_path = "/en/".into();
        assert_eq!(config.canonical_url(), "https://example.com/en/");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["campus", "--root", root, "build", "--minify", "false"]);

        let config = SiteConfig::load(cli).unwrap();

        assert!(!config.build.minify);
        assert!(config.build.output.ends_with("public"));
        assert!(config.build.output.is_absolute());
    }

    #[test]
    fn test_load_applies_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("campus.toml"),
            "[serve]\nport = 9000\n[build]\nsitemap = true\n",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&[
            "campus",
            "--root",
            root,
            "serve",
            "--port",
            "9100",
            "--sitemap",
            "false",
            "--base-url",
            "http://localhost:9100",
        ]);

        let config = SiteConfig::load(cli).unwrap();

        assert_eq!(config.serve.port, 9100);
        assert!(!config.build.sitemap);
        assert_eq!(config.site.url, "http://localhost:9100");
    }

    #[test]
    fn test_submit_endpoint_override() {
        let cli = leak_cli(&[
            "campus",
            "submit",
            "--name",
            "Sara",
            "--email",
            "sara@example.com",
            "--message",
            "hi",
            "--endpoint",
            "http://127.0.0.1:1/form",
        ]);
        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        assert_eq!(config.contact.endpoint, "http://127.0.0.1:1/form");
    }
}
