//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `campus.toml` while `campus serve` runs:
//! the request loop reads through [`cfg`], the watcher thread writes
//! through [`reload_config`].
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! build_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage with atomic replacement support.
///
/// Initialized with default config, then replaced with loaded config in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Get current config as `Arc<SiteConfig>`.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Initialize global config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    CONFIG.store(Arc::new(config));
}

/// Re-read campus.toml and replace the global config atomically.
///
/// The old config remains valid for any readers that loaded it before
/// this call. An invalid file leaves the current config in place.
pub fn reload_config() -> Result<()> {
    let current = cfg();
    let cli = current
        .cli
        .context("config was initialized without CLI arguments")?;

    let config = SiteConfig::load(cli)?;
    config.validate()?;

    CONFIG.store(Arc::new(config));
    Ok(())
}
