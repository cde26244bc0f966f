//! Config watcher for the development server.
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► reload_config() ──► build_site()
//! ```
//!
//! Only `campus.toml` feeds the page, so that is the only file watched.
//! The parent directory is watched rather than the file itself, since
//! editors often save by replacing the file.

use crate::{
    build::build_site,
    config::{cfg, reload_config},
    log,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: HashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: HashSet::new(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.pending.extend(paths);
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Paths in `event` that are the config file.
fn config_paths(event: Event, config_path: &Path) -> Vec<PathBuf> {
    event
        .paths
        .into_iter()
        .filter(|path| path == config_path)
        .collect()
}

/// Reload the config and rebuild. Returns true on success.
fn rebuild() -> bool {
    log!("watch"; "config changed, rebuilding...");

    let result = reload_config().and_then(|()| build_site(&cfg()));
    match result {
        Ok(()) => true,
        Err(err) => {
            // keep serving the last good build
            log!("watch"; "build failed");
            log!("watch"; "{err}");
            false
        }
    }
}

/// Start blocking config watcher with debouncing and rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config_path = cfg().config_path.clone();
    let watch_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .context("config path has no parent directory")?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", watch_dir.display()))?;

    log!("watch"; "{}", config_path.display());

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                let paths = config_paths(event, &config_path);
                if !paths.is_empty() {
                    debouncer.add(paths);
                }
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                debouncer.take();
                if rebuild() {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_secs(60));

        debouncer.add([PathBuf::from("campus.toml")]);
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_millis(DEBOUNCE_MS));

        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS));
        assert!(debouncer.ready());

        // duplicates collapse
        debouncer.add([PathBuf::from("campus.toml")]);
        assert_eq!(debouncer.take().len(), 1);
        assert!(!debouncer.ready());
    }

    #[test]
    fn test_cooldown_after_rebuild() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.in_cooldown());
        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }

    #[test]
    fn test_only_config_path_is_collected() {
        let config_path = PathBuf::from("/site/campus.toml");
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/site/notes.md"))
            .add_path(config_path.clone());

        assert!(is_relevant(&event));
        assert_eq!(config_paths(event, &config_path), [config_path]);

        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/site/public/index.html"));
        assert!(config_paths(other, Path::new("/site/campus.toml")).is_empty());
    }
}
