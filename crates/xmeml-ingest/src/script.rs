//! Plain-text extraction from a `.docx` script.

use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Archive member holding the document body.
const DOCUMENT_PART: &str = "word/document.xml";

/// Read the text of every paragraph in a `.docx` file, joined with newlines.
///
/// Tabs and line breaks inside a paragraph are kept as `\t` and `\n`.
///
/// # Errors
///
/// [`IngestError::ScriptRead`] if the file cannot be opened,
/// [`IngestError::Archive`] if it is not a zip archive with a document body,
/// and [`IngestError::ScriptXml`] if the body is malformed.
pub fn extract_script_text(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| IngestError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let mut body = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|source| IngestError::Archive {
            path: path.to_path_buf(),
            source,
        })?
        .read_to_string(&mut body)
        .map_err(|source| IngestError::ScriptRead {
            path: path.to_path_buf(),
            source,
        })?;

    let text = document_text(&body).map_err(|source| IngestError::ScriptXml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), chars = text.len(), "script text extracted");
    Ok(text)
}

/// Collect paragraph text from a WordprocessingML body.
fn document_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&String::from_utf8_lossy(&t)),
            Event::GeneralRef(r) if in_text => {
                if let Ok(Some(ch)) = r.resolve_char_ref() {
                    current.push(ch);
                } else if let Some(resolved) =
                    resolve_predefined_entity(&String::from_utf8_lossy(&r))
                {
                    current.push_str(resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    #[test]
    fn test_paragraphs_are_joined() {
        let xml = format!(
            "<w:document {W}><w:body>\
             <w:p><w:r><w:t>Scene one.</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">Close </w:t></w:r><w:r><w:t>up</w:t></w:r></w:p>\
             </w:body></w:document>"
        );
        assert_eq!(document_text(&xml).unwrap(), "Scene one.\nClose up");
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let xml = format!(
            "<w:document {W}><w:body><w:p><w:r>\
             <w:t>A</w:t><w:tab/><w:t>B &amp; C</w:t><w:br/><w:t>&#68;</w:t>\
             </w:r></w:p></w:body></w:document>"
        );
        assert_eq!(document_text(&xml).unwrap(), "A\tB & C\nD");
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = format!(
            "<w:document {W}><w:body><w:p><w:pPr><w:pStyle w:val=\"Heading\"/></w:pPr>\
             <w:r><w:t>Title</w:t></w:r></w:p><w:sectPr>ignored</w:sectPr></w:body></w:document>"
        );
        assert_eq!(document_text(&xml).unwrap(), "Title");
    }
}
