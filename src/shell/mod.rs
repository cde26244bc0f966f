//! Page shell: the catalog, the search query and everything derived from
//! them.
//!
//! ```text
//! Catalog ──┬──► filtered(query)  ──► course cards
//!           ├──► structured_data  ──┐
//!           └──► pricing grid       ├──► PageMetadata ──► MetadataSynchronizer ──► HeadState
//! SiteConfig ───────────────────────┘
//! ```
//!
//! Derived values are memoized on their inputs, and the synchronizer only
//! runs when the metadata actually changed since the last sync.

pub mod contact;
mod memo;

use memo::Memo;

use crate::{
    catalog::{Catalog, Course, filter_courses},
    config::{OrganizationSection, SiteConfig},
    head::{HeadState, Location, MetadataSynchronizer, PageMetadata},
    structured::structured_data,
};
use serde_json::Value;

pub struct PageShell {
    catalog: Catalog,
    title: String,
    description: String,
    canonical_path: String,
    organization: OrganizationSection,
    query: String,
    filtered: Memo<String, Vec<Course>>,
    structured: Memo<Catalog, Value>,
    synchronizer: MetadataSynchronizer,
    last_synced: Option<(PageMetadata, Option<Location>)>,
}

impl PageShell {
    pub fn new(catalog: Catalog, config: &SiteConfig) -> Self {
        Self {
            catalog,
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            canonical_path: config.site.canonical_path.clone(),
            organization: config.organization.clone(),
            query: String::new(),
            filtered: Memo::new(),
            structured: Memo::new(),
            synchronizer: MetadataSynchronizer::new(),
            last_synced: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Bound to the search input.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Catalog entries matching the current query, in catalog order.
    pub fn filtered(&mut self) -> &[Course] {
        let courses = self.catalog.courses();
        self.filtered.get_or_compute(self.query.clone(), |query| {
            filter_courses(courses, query).into_iter().cloned().collect()
        })
    }

    /// JSON-LD for the whole catalog.
    pub fn structured_data(&mut self) -> &Value {
        let organization = &self.organization;
        self.structured
            .get_or_compute(self.catalog.clone(), |catalog| {
                structured_data(organization, catalog.courses())
            })
    }

    pub fn metadata(&mut self) -> PageMetadata {
        PageMetadata {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            canonical_path: Some(self.canonical_path.clone()),
            structured_data: Some(self.structured_data().clone()),
        }
    }

    /// First sync into the head.
    pub fn mount(&mut self, head: &mut HeadState, location: Option<&Location>) {
        self.last_synced = None;
        self.update(head, location);
    }

    /// Sync if the metadata or location differs from the last sync.
    /// Returns whether a sync ran.
    pub fn update(&mut self, head: &mut HeadState, location: Option<&Location>) -> bool {
        let metadata = self.metadata();
        if let Some((last, last_location)) = &self.last_synced
            && *last == metadata
            && last_location.as_ref() == location
        {
            return false;
        }
        self.synchronizer.sync(head, &metadata, location);
        self.last_synced = Some((metadata, location.cloned()));
        true
    }

    #[allow(dead_code)] // Page lifecycle API; static builds never unmount
    pub fn unmount(&mut self, head: &mut HeadState) {
        self.synchronizer.teardown(head);
        self.last_synced = None;
    }
}
