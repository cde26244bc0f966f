//! Landing page rendering.
//!
//! ```text
//! SiteConfig ──► base HeadState ──► PageShell::mount ──► write_head ─┐
//!     │                                                               ├──► index.html
//!     └────────► PageShell::filtered / catalog ──► sections::* ──────┘
//! ```
//!
//! The head is assembled as data first (charset, viewport, styles, any
//! `[head] elements`) and then reconciled by the shell, so the written
//! document holds exactly one description, one canonical link and one
//! structured-data script no matter what the extra elements contain.

mod sections;

use crate::{
    config::SiteConfig,
    head::{HeadElement, HeadState, Location, parse_head_elements, write_head},
    log,
    shell::PageShell,
    utils::xml::{
        XmlWriter, create_xml_writer, into_string, write_end, write_raw_text_elem, write_start,
    },
};
use anyhow::Result;
use chrono::Datelike;
use quick_xml::events::{BytesText, Event};

const STYLE: &str = include_str!("../embed/style.css");
const SEARCH_SCRIPT: &str = include_str!("../embed/search.js");
const CONTACT_SCRIPT: &str = include_str!("../embed/contact.js");

/// Location the page is published under, as seen from inside the page.
pub fn published_location(config: &SiteConfig) -> Location {
    Location::new(config.site.origin(), config.site.canonical_path.as_str())
}

/// Head contents before metadata sync.
pub fn base_head(config: &SiteConfig) -> HeadState {
    let mut head = HeadState::new(vec![
        HeadElement::new("meta").with_attr("charset", "utf-8"),
        HeadElement::new("meta")
            .with_attr("name", "viewport")
            .with_attr("content", "width=device-width, initial-scale=1"),
        HeadElement::new("style").with_text(STYLE),
    ]);

    for snippet in &config.head.elements {
        match parse_head_elements(snippet) {
            Ok(parsed) => head.extend_parsed(parsed),
            Err(err) => log!("error"; "skipping [head] element `{snippet}`: {err}"),
        }
    }
    head
}

/// Render the full document for the current shell state.
pub fn render_page(shell: &mut PageShell, config: &SiteConfig) -> Result<String> {
    let year = chrono::Local::now().year();
    render_page_at(shell, config, Some(&published_location(config)), year)
}

/// Render with an explicit location and copyright year.
pub fn render_page_at(
    shell: &mut PageShell,
    config: &SiteConfig,
    location: Option<&Location>,
    year: i32,
) -> Result<String> {
    let mut head = base_head(config);
    shell.mount(&mut head, location);

    let mut writer = create_xml_writer();
    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    write_start(&mut writer, "html", &[("lang", config.site.language.as_str())])?;
    write_head(&mut writer, &head)?;
    write_body(&mut writer, shell, config, year)?;
    write_end(&mut writer, "html")?;

    Ok(into_string(writer))
}

fn write_body(
    writer: &mut XmlWriter,
    shell: &mut PageShell,
    config: &SiteConfig,
    year: i32,
) -> Result<()> {
    let brand = config.site.brand.as_str();
    let query = shell.query().to_owned();

    write_start(writer, "body", &[])?;
    sections::write_header(writer, brand)?;
    sections::write_hero(writer)?;
    sections::write_courses(writer, &query, shell.filtered())?;
    sections::write_pricing(writer, shell.catalog().courses())?;
    sections::write_contact(writer, &config.contact.endpoint)?;
    sections::write_footer(writer, brand, year)?;
    write_raw_text_elem(writer, "script", &[], SEARCH_SCRIPT)?;
    write_raw_text_elem(writer, "script", &[], CONTACT_SCRIPT)?;
    write_end(writer, "body")
}
