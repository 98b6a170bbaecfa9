//! Root document and persistence.

use std::io::{self, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};
use tracing::info;

use crate::error::{ModelError, Result};
use crate::sequence::Sequence;
use crate::xml::{ToXml, end, start};

/// Literal declaration line written ahead of the document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const DEFAULT_DOCTYPE: &str = "<!DOCTYPE xmeml>";
pub const DEFAULT_VERSION: &str = "4";

/// An `<xmeml>` document holding sequences in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub version: String,
    pub doctype: String,
    sequences: Vec<Sequence>,
}

impl Project {
    pub fn new() -> Self {
        Self::with_version(DEFAULT_VERSION, DEFAULT_DOCTYPE)
    }

    pub fn with_version(version: impl Into<String>, doctype: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            doctype: doctype.into(),
            sequences: Vec::new(),
        }
    }

    /// Append a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if a sequence with the same id was
    /// already added; the project is left unchanged.
    pub fn add_sequence(&mut self, sequence: Sequence) -> Result<()> {
        if self.sequences.iter().any(|existing| existing.id == sequence.id) {
            return Err(ModelError::DuplicateId { id: sequence.id });
        }
        self.sequences.push(sequence);
        Ok(())
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// The complete file contents: declaration, doctype, then the indented
    /// tree, each line newline-terminated.
    pub fn to_document_string(&self) -> Result<String> {
        let tree = self.to_xml_string()?;
        let mut document =
            String::with_capacity(XML_DECLARATION.len() + self.doctype.len() + tree.len() + 3);
        document.push_str(XML_DECLARATION);
        document.push('\n');
        document.push_str(&self.doctype);
        document.push('\n');
        document.push_str(&tree);
        document.push('\n');
        Ok(document)
    }

    /// Serialize and write the document as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Write`] if the file cannot be written.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let document = self.to_document_string()?;
        std::fs::write(path, document.as_bytes()).map_err(|source| ModelError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            sequences = self.sequences.len(),
            "project file written"
        );
        Ok(())
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl ToXml for Project {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut element = BytesStart::new("xmeml");
        element.push_attribute(("version", self.version.as_str()));
        if self.sequences.is_empty() {
            return writer.write_event(Event::Empty(element));
        }
        start(writer, element)?;
        for sequence in &self.sequences {
            sequence.write_xml(writer)?;
        }
        end(writer, "xmeml")
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::config::SequenceConfig;

    fn sequence(id: &str) -> Sequence {
        Sequence::new(&SequenceConfig::default(), id, Uuid::nil(), "Sequence 01", 0)
    }

    #[test]
    fn test_duplicate_sequence_id_is_rejected() {
        let mut project = Project::new();
        project.add_sequence(sequence("sequence-1")).unwrap();
        let err = project.add_sequence(sequence("sequence-1")).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateId { ref id } if id == "sequence-1"));
        assert_eq!(project.sequences().len(), 1);
    }

    #[test]
    fn test_sequences_keep_insertion_order() {
        let mut project = Project::new();
        project.add_sequence(sequence("sequence-b")).unwrap();
        project.add_sequence(sequence("sequence-a")).unwrap();
        let xml = project.to_xml_string().unwrap();
        assert!(xml.find("sequence-b").unwrap() < xml.find("sequence-a").unwrap());
    }

    #[test]
    fn test_empty_project_document() {
        let document = Project::new().to_document_string().unwrap();
        assert_eq!(
            document,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE xmeml>\n<xmeml version=\"4\"/>\n"
        );
    }

    #[test]
    fn test_unwritable_path() {
        let err = Project::new()
            .save_to_file(Path::new("/nonexistent-dir/out.xml"))
            .unwrap_err();
        assert!(matches!(err, ModelError::Write { .. }));
    }
}
