//! Project initialization.
//!
//! Writes a `campus.toml` holding every default, so the published values
//! can be edited in one place.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Create the config file (and ignore files) in the project root.
pub fn new_site(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let config_path = &config.config_path;

    if config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config_path.display()
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_default_config(config_path)?;
    init_ignored_files(root, &[relative_output(config)])?;

    log!("init"; "{}", config_path.display());
    Ok(())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn relative_output(config: &SiteConfig) -> String {
    let output = &config.build.output;
    output
        .strip_prefix(config.get_root())
        .unwrap_or(output)
        .to_string_lossy()
        .into_owned()
}

/// Write ignore files that don't exist yet.
fn init_ignored_files(root: &Path, paths: &[String]) -> Result<()> {
    let content = paths.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.config_path = root.join("campus.toml");
        config.build.output = root.join("public");
        config
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        new_site(&config).unwrap();

        let written = SiteConfig::from_path(&config.config_path).unwrap();
        assert_eq!(written.site.title, config.site.title);
        assert_eq!(written.contact.endpoint, "https://formspree.io/f/mdkdvkak");
        assert_eq!(written.organization.address.street, "123 Main St");
        assert!(written.validate().is_ok());

        let ignore = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(ignore, "public");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.config_path, "[site]\n").unwrap();

        assert!(new_site(&config).is_err());
        assert_eq!(fs::read_to_string(&config.config_path).unwrap(), "[site]\n");
    }
}
