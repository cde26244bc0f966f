//! Thin helpers over the quick-xml writer and reader for HTML output.
//!
//! HTML is not XML: void elements (`meta`, `link`, `input`, …) are written
//! self-closing, every other element always gets an explicit end tag, and
//! `<script>`/`<style>` bodies are written raw.

use anyhow::Result;
use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &["base", "br", "hr", "img", "input", "link", "meta"];

/// Elements whose text is raw (not entity-escaped) in HTML.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[inline]
pub fn create_xml_writer() -> XmlWriter {
    Writer::new(Cursor::new(Vec::new()))
}

/// Reader tolerant of HTML-style unclosed tags.
#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader
}

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

/// Keep a raw script/style body from closing its element early.
pub fn escape_raw_text(text: &str) -> String {
    text.replace("</", "<\\/")
}

fn start_elem<'a>(tag: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    elem
}

/// Write an opening tag with attributes: `<tag attr="val">`.
#[inline]
pub fn write_start(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    writer.write_event(Event::Start(start_elem(tag, attrs)))?;
    Ok(())
}

#[inline]
pub fn write_end(writer: &mut XmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write a void element: `<tag attr="val"/>`.
#[inline]
pub fn write_void_elem(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    writer.write_event(Event::Empty(start_elem(tag, attrs)))?;
    Ok(())
}

/// Write escaped text between tags.
#[inline]
pub fn write_text(writer: &mut XmlWriter, text: &str) -> Result<()> {
    writer.write_event(Event::Text(BytesText::new(text)))?;
    Ok(())
}

/// Write an element with escaped text content: `<tag ...>text</tag>`.
#[inline]
pub fn write_text_elem(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    write_start(writer, tag, attrs)?;
    if !text.is_empty() {
        write_text(writer, text)?;
    }
    write_end(writer, tag)
}

/// Write a `<script>`/`<style>` element with an unescaped body.
pub fn write_raw_text_elem(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
    body: &str,
) -> Result<()> {
    write_start(writer, tag, attrs)?;
    writer.write_event(Event::Text(BytesText::from_escaped(escape_raw_text(body))))?;
    write_end(writer, tag)
}

/// Take the written bytes as a string.
pub fn into_string(writer: XmlWriter) -> String {
    String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_elem_escapes() {
        let mut writer = create_xml_writer();
        write_text_elem(&mut writer, "p", &[("class", "price")], "Math & <English>").unwrap();

        assert_eq!(
            into_string(writer),
            r#"<p class="price">Math &amp; &lt;English&gt;</p>"#
        );
    }

    #[test]
    fn test_empty_text_elem_keeps_end_tag() {
        let mut writer = create_xml_writer();
        write_text_elem(&mut writer, "textarea", &[("name", "message")], "").unwrap();
        assert_eq!(into_string(writer), r#"<textarea name="message"></textarea>"#);
    }

    #[test]
    fn test_void_elem() {
        let mut writer = create_xml_writer();
        write_void_elem(&mut writer, "meta", &[("charset", "utf-8")]).unwrap();
        assert_eq!(into_string(writer), r#"<meta charset="utf-8"/>"#);
    }

    #[test]
    fn test_raw_text_elem_is_not_entity_escaped() {
        let mut writer = create_xml_writer();
        write_raw_text_elem(&mut writer, "script", &[], r#"{"a":"x</script>"}"#).unwrap();

        assert_eq!(
            into_string(writer),
            r#"<script>{"a":"x<\/script>"}</script>"#
        );
    }

    #[test]
    fn test_element_kinds() {
        assert!(is_void("META"));
        assert!(!is_void("script"));
        assert!(is_raw_text("style"));
        assert!(!is_raw_text("title"));
    }
}
