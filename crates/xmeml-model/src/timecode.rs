use std::io::{self, Write};

use quick_xml::Writer;

use crate::types::{DisplayFormat, Rate};
use crate::xml::{ToXml, end, start_plain, write_display_element, write_text_element};

/// Starting timecode of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timecode {
    pub rate: Rate,
    pub string: String,
    pub frame: u64,
    pub display_format: DisplayFormat,
}

impl Timecode {
    /// Zero timecode at `rate`, drop-frame display.
    #[must_use]
    pub fn new(rate: Rate) -> Self {
        Self {
            rate,
            string: "00;00;00;00".to_string(),
            frame: 0,
            display_format: DisplayFormat::DropFrame,
        }
    }
}

impl Default for Timecode {
    fn default() -> Self {
        Self::new(Rate::default())
    }
}

impl ToXml for Timecode {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "timecode")?;
        self.rate.write_xml(writer)?;
        write_text_element(writer, "string", &self.string)?;
        write_display_element(writer, "frame", self.frame)?;
        write_text_element(writer, "displayformat", self.display_format.as_str())?;
        end(writer, "timecode")
    }
}
