//! Shared XML writing primitives.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;

/// Indentation width used for every rendered fragment.
pub const INDENT_SIZE: usize = 2;

/// Capability shared by every project element: writing its XML fragment.
///
/// Child order inside a fragment is fixed by the target schema; callers embed
/// a child's fragment by passing their own writer, so indentation carries
/// through the whole tree.
pub trait ToXml {
    /// Write this element's fragment to `writer`.
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;

    /// Render this element's fragment as an indented string.
    fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
        self.write_xml(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

/// Write `<name>text</name>`. Empty text still yields an open/close pair.
///
/// Only `<`, `>` and `&` are escaped; quotes and apostrophes stay literal.
pub(crate) fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub(crate) fn write_display_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: impl std::fmt::Display,
) -> io::Result<()> {
    write_text_element(writer, name, &value.to_string())
}

pub(crate) fn start<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> io::Result<()> {
    writer.write_event(Event::Start(element))
}

pub(crate) fn start_plain<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))
}

pub(crate) fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

pub(crate) fn empty<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::Empty(BytesStart::new(name)))
}

/// Write a group of blank text elements, e.g. the per-clip logging fields.
pub(crate) fn write_blank_group<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    fields: &[&str],
) -> io::Result<()> {
    start_plain(writer, name)?;
    for field in fields {
        write_text_element(writer, field, "")?;
    }
    end(writer, name)
}

/// Render a boolean the way the schema spells flags: `TRUE` / `FALSE`.
pub(crate) const fn schema_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}
