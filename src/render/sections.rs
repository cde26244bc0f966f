//! Body sections of the landing page.

use crate::{
    catalog::Course,
    shell::contact::{FAILED_MESSAGE, SENT_MESSAGE},
    utils::xml::{XmlWriter, write_end, write_start, write_text, write_text_elem, write_void_elem},
};
use anyhow::Result;

const NAV: &[(&str, &str)] = &[
    ("#courses", "Courses"),
    ("#pricing", "Pricing"),
    ("#contact", "Contact"),
];

pub fn write_header(writer: &mut XmlWriter, brand: &str) -> Result<()> {
    write_start(writer, "header", &[("class", "site-header")])?;
    write_start(writer, "div", &[("class", "container")])?;
    write_text_elem(writer, "h1", &[], brand)?;

    write_start(writer, "nav", &[])?;
    for &(href, label) in NAV {
        write_text_elem(writer, "a", &[("href", href)], label)?;
    }
    write_end(writer, "nav")?;

    write_end(writer, "div")?;
    write_end(writer, "header")
}

pub fn write_hero(writer: &mut XmlWriter) -> Result<()> {
    write_start(writer, "section", &[("class", "hero")])?;
    write_text_elem(writer, "h2", &[], "Achieve Success with Expert Training")?;
    write_text_elem(writer, "p", &[], "Math • English • GRE • STEP Certification Prep")?;
    write_end(writer, "section")
}

/// Search box plus one card per matching course.
///
/// Cards carry `data-title` so the page script can re-filter without a
/// round trip. The empty-state paragraph is always present and only
/// hidden while something matches.
pub fn write_courses(writer: &mut XmlWriter, query: &str, courses: &[Course]) -> Result<()> {
    write_start(writer, "section", &[("id", "courses"), ("class", "block container")])?;

    write_start(writer, "div", &[("class", "section-head")])?;
    write_text_elem(writer, "h3", &[], "Our Courses")?;
    write_void_elem(
        writer,
        "input",
        &[
            ("type", "search"),
            ("id", "course-search"),
            ("placeholder", "Search courses..."),
            ("aria-label", "Search courses"),
            ("value", query),
        ],
    )?;
    write_end(writer, "div")?;

    write_start(writer, "div", &[("id", "course-list"), ("class", "grid")])?;
    for course in courses {
        write_course_card(writer, course)?;
    }
    write_end(writer, "div")?;

    let mut empty: Vec<(&str, &str)> = vec![("id", "no-results")];
    if !courses.is_empty() {
        empty.push(("hidden", ""));
    }
    write_text_elem(writer, "p", &empty, "No courses match your search.")?;

    write_end(writer, "section")
}

fn write_course_card(writer: &mut XmlWriter, course: &Course) -> Result<()> {
    write_start(
        writer,
        "article",
        &[("class", "card course"), ("data-title", course.title.as_str())],
    )?;
    write_text_elem(writer, "h4", &[], &course.title)?;
    write_text_elem(writer, "p", &[], &course.description)?;

    write_start(writer, "ul", &[])?;
    for outcome in &course.outcomes {
        write_text_elem(writer, "li", &[], outcome)?;
    }
    write_end(writer, "ul")?;

    write_labeled(writer, "Delivery:", &course.delivery)?;
    write_labeled(writer, "Duration:", &course.duration)?;
    write_text_elem(writer, "p", &[("class", "price")], &course.price)?;
    write_end(writer, "article")
}

/// `<p class="meta"><strong>label</strong> value</p>`
fn write_labeled(writer: &mut XmlWriter, label: &str, value: &str) -> Result<()> {
    write_start(writer, "p", &[("class", "meta")])?;
    write_text_elem(writer, "strong", &[], label)?;
    write_text(writer, &format!(" {value}"))?;
    write_end(writer, "p")
}

/// Pricing grid over the full catalog, independent of the search query.
pub fn write_pricing(writer: &mut XmlWriter, courses: &[Course]) -> Result<()> {
    write_start(writer, "section", &[("id", "pricing"), ("class", "block alt")])?;
    write_start(writer, "div", &[("class", "container")])?;
    write_text_elem(writer, "h3", &[], "Pricing")?;

    write_start(writer, "div", &[("class", "grid")])?;
    for course in courses {
        write_start(writer, "div", &[("class", "card")])?;
        write_text_elem(writer, "h4", &[], &course.title)?;
        write_text_elem(writer, "p", &[("class", "price")], &course.price)?;
        write_text_elem(
            writer,
            "a",
            &[("class", "button"), ("href", "#contact")],
            "Enroll Now",
        )?;
        write_end(writer, "div")?;
    }
    write_end(writer, "div")?;

    write_end(writer, "div")?;
    write_end(writer, "section")
}

/// Contact form. It posts straight to the endpoint when scripts are off;
/// otherwise the page script submits it and shows the acknowledgment text
/// stored on the form.
pub fn write_contact(writer: &mut XmlWriter, endpoint: &str) -> Result<()> {
    write_start(writer, "section", &[("id", "contact"), ("class", "block container")])?;
    write_text_elem(writer, "h3", &[], "Contact Us")?;

    write_start(
        writer,
        "form",
        &[
            ("id", "contact-form"),
            ("action", endpoint),
            ("method", "POST"),
            ("data-sent", SENT_MESSAGE),
            ("data-failed", FAILED_MESSAGE),
        ],
    )?;
    write_void_elem(
        writer,
        "input",
        &[("type", "text"), ("name", "name"), ("placeholder", "Your Name"), ("required", "")],
    )?;
    write_void_elem(
        writer,
        "input",
        &[("type", "email"), ("name", "email"), ("placeholder", "Your Email"), ("required", "")],
    )?;
    write_text_elem(
        writer,
        "textarea",
        &[("name", "message"), ("placeholder", "Your Message"), ("rows", "4"), ("required", "")],
        "",
    )?;
    write_text_elem(
        writer,
        "button",
        &[("type", "submit"), ("class", "button send")],
        "Send Message",
    )?;
    write_end(writer, "form")?;

    write_end(writer, "section")
}

pub fn write_footer(writer: &mut XmlWriter, brand: &str, year: i32) -> Result<()> {
    write_start(writer, "footer", &[("class", "site-footer")])?;
    write_text_elem(writer, "p", &[], &format!("© {year} {brand}. All rights reserved."))?;
    write_end(writer, "footer")
}
