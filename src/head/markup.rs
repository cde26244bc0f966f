//! Reading head snippets into [`HeadElement`]s and writing a [`HeadState`]
//! out as HTML.

use super::{HeadElement, HeadState};
use crate::utils::xml::{
    XmlWriter, create_xml_reader, is_raw_text, is_void, write_end, write_raw_text_elem,
    write_start, write_text_elem, write_void_elem,
};
use anyhow::Result;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

/// Parse trusted head markup (e.g. `[head] elements`) into elements.
///
/// Accepts both `<meta …>` and `<meta …/>`. Text inside `<title>` is
/// entity-decoded; `<script>`/`<style>` bodies are kept verbatim up to
/// their closing tag, never tokenized as markup.
pub fn parse_head_elements(html: &str) -> Result<Vec<HeadElement>> {
    let mut elements = Vec::new();
    let mut rest = html;
    while !rest.is_empty() {
        rest = parse_until_raw_text(rest, &mut elements)?;
    }
    Ok(elements)
}

/// Parse markup into `elements` until a `<script>`/`<style>` element has
/// been taken whole. Returns the input left after it.
fn parse_until_raw_text<'a>(html: &'a str, elements: &mut Vec<HeadElement>) -> Result<&'a str> {
    let mut reader = create_xml_reader(html.as_bytes());
    let mut open: Option<(HeadElement, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Empty(start) => elements.push(element_from(&start)),
            Event::Start(start) => {
                let mut element = element_from(&start);
                if is_void(&element.tag) {
                    elements.push(element);
                    continue;
                }
                if let Some(unclosed) = open.take() {
                    elements.push(finish(unclosed));
                }
                if is_raw_text(&element.tag) {
                    let body_start = usize::try_from(reader.buffer_position())?;
                    let (body, rest) = split_raw_text(&html[body_start..], &element.tag);
                    if !body.is_empty() {
                        element.text = Some(body.to_owned());
                    }
                    elements.push(element);
                    return Ok(rest);
                }
                open = Some((element, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, body)) = open.as_mut() {
                    body.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Event::GeneralRef(entity) => {
                if let Some((_, body)) = open.as_mut() {
                    body.push('&');
                    body.push_str(&String::from_utf8_lossy(&entity));
                    body.push(';');
                }
            }
            Event::End(_) => {
                if let Some(closed) = open.take() {
                    elements.push(finish(closed));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.take() {
        elements.push(finish(unclosed));
    }
    Ok("")
}

/// Split a raw-text body from what follows its `</tag>`. The tag name is
/// matched case-insensitively and must end at `>`, `/` or whitespace. An
/// unclosed element takes the rest of the input.
fn split_raw_text<'a>(html: &'a str, tag: &str) -> (&'a str, &'a str) {
    let lower = html.to_ascii_lowercase();
    let needle = format!("</{}", tag.to_ascii_lowercase());
    let mut from = 0;

    while let Some(found) = lower[from..].find(&needle) {
        let close = from + found;
        let after = close + needle.len();
        match lower[after..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => {
                let end = lower[after..].find('>').map_or(html.len(), |gt| after + gt + 1);
                return (&html[..close], &html[end..]);
            }
            None => return (&html[..close], ""),
            Some(_) => from = after,
        }
    }
    (html, "")
}

fn element_from(start: &BytesStart<'_>) -> HeadElement {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut element = HeadElement::new(tag);
    for attr in start.html_attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = unescape(&String::from_utf8_lossy(&attr.value)).into_owned();
        element.set_attr(&key, &value);
    }
    element
}

fn finish((mut element, body): (HeadElement, String)) -> HeadElement {
    if !body.is_empty() {
        element.text = Some(unescape(&body).into_owned());
    }
    element
}

fn unescape(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Write `<head>…</head>`.
///
/// Charset declarations go first so they stay within the first bytes of
/// the document, then the title, then everything else in order.
pub fn write_head(writer: &mut XmlWriter, head: &HeadState) -> Result<()> {
    write_start(writer, "head", &[])?;

    let (charset, rest): (Vec<_>, Vec<_>) = head
        .elements
        .iter()
        .partition(|el| el.tag == "meta" && el.attr("charset").is_some());

    for element in charset {
        write_element(writer, element)?;
    }
    if let Some(title) = &head.title {
        write_text_elem(writer, "title", &[], title)?;
    }
    for element in rest {
        write_element(writer, element)?;
    }

    write_end(writer, "head")
}

fn write_element(writer: &mut XmlWriter, element: &HeadElement) -> Result<()> {
    let attrs: Vec<(&str, &str)> = element
        .attrs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let text = element.text.as_deref().unwrap_or_default();

    if is_void(&element.tag) {
        write_void_elem(writer, &element.tag, &attrs)
    } else if is_raw_text(&element.tag) {
        write_raw_text_elem(writer, &element.tag, &attrs, text)
    } else {
        write_text_elem(writer, &element.tag, &attrs, text)
    }
}

impl HeadState {
    /// Add parsed elements, lifting a `<title>` into [`HeadState::title`].
    pub fn extend_parsed(&mut self, parsed: Vec<HeadElement>) {
        for element in parsed {
            if element.tag == "title" {
                self.title = element.text;
            } else {
                self.elements.push(element);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        head::{CANONICAL, DESCRIPTION},
        utils::xml::{create_xml_writer, into_string},
    };

    #[test]
    fn test_parse_unclosed_and_self_closed() {
        let parsed = parse_head_elements(
            r##"<meta name="theme-color" content="#4f46e5"><link rel="canonical" href="/old"/>"##,
        )
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].attr("content"), Some("#4f46e5"));
        assert!(parsed[1].matches(&CANONICAL));
        assert_eq!(parsed[1].attr("href"), Some("/old"));
    }

    #[test]
    fn test_parse_entities_in_attrs_and_title() {
        let parsed = parse_head_elements(
            r#"<title>Math &amp; English</title><meta name="description" content="GRE &amp; STEP">"#,
        )
        .unwrap();

        assert_eq!(parsed[0].text.as_deref(), Some("Math & English"));
        assert!(parsed[1].matches(&DESCRIPTION));
        assert_eq!(parsed[1].attr("content"), Some("GRE & STEP"));
    }

    #[test]
    fn test_parse_valueless_attribute() {
        let parsed =
            parse_head_elements(r#"<script src="/analytics.js" defer></script>"#).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].tag, "script");
        assert_eq!(parsed[0].attr("src"), Some("/analytics.js"));
        assert!(parsed[0].attr("defer").is_some());
    }

    #[test]
    fn test_parse_script_body_verbatim() {
        let parsed = parse_head_elements(concat!(
            r#"<script>if (a < b && c) { el.innerHTML = "</b>"; }</script>"#,
            r#"<meta name="theme-color" content="navy">"#,
        ))
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].tag, "script");
        assert_eq!(
            parsed[0].text.as_deref(),
            Some(r#"if (a < b && c) { el.innerHTML = "</b>"; }"#)
        );
        assert_eq!(parsed[1].attr("content"), Some("navy"));
    }

    #[test]
    fn test_parse_style_and_uppercase_close() {
        let parsed = parse_head_elements(
            "<style>a > b { color: red }</STYLE ><script>x &amp;&& y</script>",
        )
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].text.as_deref(), Some("a > b { color: red }"));
        // entities inside scripts are not decoded
        assert_eq!(parsed[1].text.as_deref(), Some("x &amp;&& y"));
    }

    #[test]
    fn test_parse_unclosed_script_takes_rest() {
        let parsed = parse_head_elements("<script>let tag = '</scripts>';").unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text.as_deref(), Some("let tag = '</scripts>';"));
    }

    #[test]
    fn test_parsed_script_written_back() {
        let mut head = HeadState::default();
        head.extend_parsed(
            parse_head_elements(r#"<script>if (a < b && c) { go("</b>"); }</script>"#).unwrap(),
        );

        let mut writer = create_xml_writer();
        write_head(&mut writer, &head).unwrap();

        assert_eq!(
            into_string(writer),
            r#"<head><script>if (a < b && c) { go("<\/b>"); }</script></head>"#
        );
    }

    #[test]
    fn test_extend_parsed_lifts_title() {
        let mut head = HeadState::default();
        head.extend_parsed(parse_head_elements("<title>Welcome</title><meta charset=\"utf-8\">").unwrap());

        assert_eq!(head.title.as_deref(), Some("Welcome"));
        assert_eq!(head.elements.len(), 1);
    }

    #[test]
    fn test_write_head_orders_charset_then_title() {
        let mut head = HeadState::new(vec![
            HeadElement::new("meta")
                .with_attr("name", "description")
                .with_attr("content", "Courses"),
            HeadElement::new("meta").with_attr("charset", "utf-8"),
            HeadElement::new("script")
                .with_attr("type", "application/ld+json")
                .with_text(r#"{"name":"A & B"}"#),
        ]);
        head.title = Some("Institute".into());

        let mut writer = create_xml_writer();
        write_head(&mut writer, &head).unwrap();

        assert_eq!(
            into_string(writer),
            concat!(
                r#"<head><meta charset="utf-8"/><title>Institute</title>"#,
                r#"<meta name="description" content="Courses"/>"#,
                r#"<script type="application/ld+json">{"name":"A & B"}</script></head>"#
            )
        );
    }
}
