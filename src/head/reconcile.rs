//! Pure diff between the current head and the desired metadata.

use super::{
    CANONICAL, DESCRIPTION, HeadElement, HeadMutation, HeadState, JSON_LD_TYPE, Location,
    PageMetadata, STRUCTURED_DATA,
};

/// Compute the mutations that bring `current` in line with `desired`.
///
/// Lookup-or-create per fixed selector, so applying the result any number
/// of times leaves exactly one description meta, one canonical link and at
/// most one structured-data script.
///
/// - `title`: set when present, otherwise untouched.
/// - description meta: created if missing; `content` set when present.
/// - canonical link: created if missing; `href = origin + path`.
/// - structured data: when present, the old script is replaced by a fresh
///   one. When absent, nothing is inserted or removed.
pub fn reconcile(
    current: &HeadState,
    desired: &PageMetadata,
    location: Option<&Location>,
) -> Vec<HeadMutation> {
    let mut mutations = Vec::new();

    if let Some(title) = &desired.title
        && current.title.as_deref() != Some(title.as_str())
    {
        mutations.push(HeadMutation::SetTitle(title.clone()));
    }

    match current.query(&DESCRIPTION) {
        None => {
            let mut meta = HeadElement::new("meta").with_attr("name", "description");
            if let Some(description) = &desired.description {
                meta.set_attr("content", description);
            }
            mutations.push(HeadMutation::Append(meta));
        }
        Some(meta) => {
            if current.count(&DESCRIPTION) > 1 {
                mutations.push(HeadMutation::Dedupe(DESCRIPTION));
            }
            if let Some(description) = &desired.description
                && meta.attr("content") != Some(description.as_str())
            {
                mutations.push(HeadMutation::SetAttribute {
                    target: DESCRIPTION,
                    name: "content",
                    value: description.clone(),
                });
            }
        }
    }

    let href = canonical_href(desired.canonical_path.as_deref(), location);
    match current.query(&CANONICAL) {
        None => {
            let link = HeadElement::new("link")
                .with_attr("rel", "canonical")
                .with_attr("href", &href);
            mutations.push(HeadMutation::Append(link));
        }
        Some(link) => {
            if current.count(&CANONICAL) > 1 {
                mutations.push(HeadMutation::Dedupe(CANONICAL));
            }
            if link.attr("href") != Some(href.as_str()) {
                mutations.push(HeadMutation::SetAttribute {
                    target: CANONICAL,
                    name: "href",
                    value: href,
                });
            }
        }
    }

    if let Some(data) = &desired.structured_data {
        if current.query(&STRUCTURED_DATA).is_some() {
            mutations.push(HeadMutation::Remove(STRUCTURED_DATA));
        }
        let script = HeadElement::new("script")
            .with_attr("type", JSON_LD_TYPE)
            .with_attr("id", "structured-data")
            .with_text(data.to_string());
        mutations.push(HeadMutation::Append(script));
    }

    mutations
}

/// `origin + path`, where path is `canonical_path` if given, else the
/// location's path. Without a location the origin is empty and the path
/// falls back to `/`.
pub fn canonical_href(canonical_path: Option<&str>, location: Option<&Location>) -> String {
    let origin = location.map_or("", |loc| loc.origin.as_str());
    let path = canonical_path
        .or_else(|| location.map(|loc| loc.pathname.as_str()))
        .unwrap_or("/");
    format!("{origin}{path}")
}
