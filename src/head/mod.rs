//! Document head model and the metadata synchronizer.
//!
//! The page head is an owned [`HeadState`]. Desired SEO metadata is a
//! [`PageMetadata`] value, and [`reconcile`] turns the difference between
//! the two into a list of [`HeadMutation`]s.
//!
//! ```text
//! PageMetadata ──┐
//!                ├──► reconcile() ──► Vec<HeadMutation> ──► HeadState::apply()
//! HeadState ─────┘
//! ```
//!
//! Elements are addressed by fixed selectors so that crawlers and tests
//! see the same tags every time:
//!
//! | Selector                      | Element                                  |
//! |-------------------------------|------------------------------------------|
//! | `meta[name="description"]`    | [`DESCRIPTION`]                          |
//! | `link[rel="canonical"]`       | [`CANONICAL`]                            |
//! | `#structured-data`            | [`STRUCTURED_DATA`] (`application/ld+json`) |

mod markup;
mod reconcile;
mod sync;

pub use markup::{parse_head_elements, write_head};
pub use reconcile::reconcile;
pub use sync::MetadataSynchronizer;

use serde_json::Value;

/// `meta[name="description"]`
pub const DESCRIPTION: Selector = Selector::MetaName("description");
/// `link[rel="canonical"]`
pub const CANONICAL: Selector = Selector::LinkRel("canonical");
/// `#structured-data`
pub const STRUCTURED_DATA: Selector = Selector::Id("structured-data");

/// MIME type of the structured-data script.
pub const JSON_LD_TYPE: &str = "application/ld+json";

/// Desired document-level metadata. Absent fields leave the head alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical_path: Option<String>,
    pub structured_data: Option<Value>,
}

/// Where the page is being viewed. `None` stands for a context without
/// a browser location (e.g. rendering ahead of time with no known origin).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme + host (+ port), no trailing slash.
    pub origin: String,
    pub pathname: String,
}

impl Location {
    pub fn new(origin: impl Into<String>, pathname: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            pathname: pathname.into(),
        }
    }
}

/// A CSS-like selector over head elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `meta[name="…"]`
    MetaName(&'static str),
    /// `link[rel="…"]`
    LinkRel(&'static str),
    /// `#…`
    Id(&'static str),
}

/// One element in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadElement {
    pub tag: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Text content (`<title>`, `<script>`, `<style>`).
    pub text: Option<String>,
}

impl HeadElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attrs
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_owned(),
            None => self.attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        match *selector {
            Selector::MetaName(name) => {
                self.tag.eq_ignore_ascii_case("meta") && self.attr("name") == Some(name)
            }
            Selector::LinkRel(rel) => {
                self.tag.eq_ignore_ascii_case("link") && self.attr("rel") == Some(rel)
            }
            Selector::Id(id) => self.attr("id") == Some(id),
        }
    }
}

/// A single change to the head.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadMutation {
    SetTitle(String),
    Append(HeadElement),
    /// Set an attribute on the first element matching `target`.
    SetAttribute {
        target: Selector,
        name: &'static str,
        value: String,
    },
    /// Remove every element matching the selector.
    Remove(Selector),
    /// Keep the first element matching the selector, drop the rest.
    Dedupe(Selector),
}

/// The document head: title plus elements in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadState {
    pub title: Option<String>,
    pub elements: Vec<HeadElement>,
}

impl HeadState {
    pub fn new(elements: Vec<HeadElement>) -> Self {
        Self {
            title: None,
            elements,
        }
    }

    /// First element matching the selector, in document order.
    pub fn query(&self, selector: &Selector) -> Option<&HeadElement> {
        self.elements.iter().find(|el| el.matches(selector))
    }

    fn query_mut(&mut self, selector: &Selector) -> Option<&mut HeadElement> {
        self.elements.iter_mut().find(|el| el.matches(selector))
    }

    pub fn count(&self, selector: &Selector) -> usize {
        self.elements.iter().filter(|el| el.matches(selector)).count()
    }

    pub fn apply(&mut self, mutation: HeadMutation) {
        match mutation {
            HeadMutation::SetTitle(title) => self.title = Some(title),
            HeadMutation::Append(element) => self.elements.push(element),
            HeadMutation::SetAttribute {
                target,
                name,
                value,
            } => {
                if let Some(element) = self.query_mut(&target) {
                    element.set_attr(name, &value);
                }
            }
            HeadMutation::Remove(selector) => self.elements.retain(|el| !el.matches(&selector)),
            HeadMutation::Dedupe(selector) => {
                let mut seen = false;
                self.elements.retain(|el| {
                    if !el.matches(&selector) {
                        return true;
                    }
                    !std::mem::replace(&mut seen, true)
                });
            }
        }
    }

    pub fn apply_all(&mut self, mutations: impl IntoIterator<Item = HeadMutation>) {
        for mutation in mutations {
            self.apply(mutation);
        }
    }
}
