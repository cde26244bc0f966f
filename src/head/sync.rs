//! Stateful wrapper around [`reconcile`] with mount/teardown semantics.

use super::{HeadMutation, HeadState, Location, PageMetadata, STRUCTURED_DATA, reconcile};

/// Keeps a [`HeadState`] in line with the latest [`PageMetadata`].
///
/// Teardown looks the structured-data script up in the live head at the
/// time of teardown rather than holding on to an element from an earlier
/// sync, so a script replaced between syncs is still the one removed.
#[derive(Debug, Default)]
pub struct MetadataSynchronizer {
    synced: bool,
}

impl MetadataSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile `head` against `metadata`. Safe to call repeatedly with the
    /// same or different values.
    pub fn sync(&mut self, head: &mut HeadState, metadata: &PageMetadata, location: Option<&Location>) {
        let mutations = reconcile(head, metadata, location);
        head.apply_all(mutations);
        self.synced = true;
    }

    /// Remove the structured-data script from the live head.
    ///
    /// No-op if this synchronizer never synced.
    #[allow(dead_code)] // Reached through PageShell::unmount only
    pub fn teardown(&mut self, head: &mut HeadState) {
        if !std::mem::take(&mut self.synced) {
            return;
        }
        head.apply(HeadMutation::Remove(STRUCTURED_DATA));
    }

    #[cfg(test)]
    pub fn is_synced(&self) -> bool {
        self.synced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::head::{CANONICAL, DESCRIPTION, HeadElement};
    use serde_json::json;

    fn metadata(title: &str, data: Option<serde_json::Value>) -> PageMetadata {
        PageMetadata {
            title: Some(title.into()),
            description: Some(format!("{title} description")),
            canonical_path: Some("/".into()),
            structured_data: data,
        }
    }

    #[test]
    fn test_title_is_set() {
        let mut head = HeadState::default();
        let mut sync = MetadataSynchronizer::new();

        for title in ["A", "Training Institute – Math, English, GRE, STEP", ""] {
            sync.sync(&mut head, &metadata(title, None), None);
            assert_eq!(head.title.as_deref(), Some(title));
        }
    }

    #[test]
    fn test_repeated_sync_never_duplicates() {
        let mut head = HeadState::default();
        let mut sync = MetadataSynchronizer::new();
        let location = Location::new("https://training-institute-sa.com", "/");

        for i in 0..10 {
            let data = (i % 3 != 0).then(|| json!({ "run": i }));
            sync.sync(&mut head, &metadata(&format!("t{i}"), data), Some(&location));

            assert_eq!(head.count(&DESCRIPTION), 1);
            assert_eq!(head.count(&CANONICAL), 1);
            assert!(head.count(&STRUCTURED_DATA) <= 1);
        }
    }

    #[test]
    fn test_structured_data_replaced_with_latest() {
        let mut head = HeadState::default();
        let mut sync = MetadataSynchronizer::new();

        sync.sync(&mut head, &metadata("t", Some(json!({ "v": 1 }))), None);
        sync.sync(&mut head, &metadata("t", Some(json!({ "v": 2 }))), None);

        let script = head.query(&STRUCTURED_DATA).unwrap();
        assert_eq!(script.text.as_deref(), Some(r#"{"v":2}"#));
    }

    #[test]
    fn test_teardown_removes_live_script() {
        let mut head = HeadState::default();
        let mut sync = MetadataSynchronizer::new();
        sync.sync(&mut head, &metadata("t", Some(json!({ "v": 1 }))), None);

        // Someone else swaps the script between syncs.
        head.apply(HeadMutation::Remove(STRUCTURED_DATA));
        head.apply(HeadMutation::Append(
            HeadElement::new("script")
                .with_attr("id", "structured-data")
                .with_text("{}"),
        ));

        sync.teardown(&mut head);
        assert_eq!(head.count(&STRUCTURED_DATA), 0);
        assert!(!sync.is_synced());
        // other tags stay
        assert_eq!(head.count(&DESCRIPTION), 1);
    }

    #[test]
    fn test_teardown_without_sync_is_noop() {
        let script = HeadElement::new("script").with_attr("id", "structured-data");
        let mut head = HeadState::new(vec![script]);

        MetadataSynchronizer::new().teardown(&mut head);
        assert_eq!(head.count(&STRUCTURED_DATA), 1);
    }
}
