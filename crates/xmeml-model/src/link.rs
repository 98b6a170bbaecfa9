use std::io::{self, Write};

use quick_xml::Writer;

use crate::types::MediaType;
use crate::xml::{ToXml, end, start_plain, write_display_element, write_text_element};

/// A descriptive cross-reference from a clip to a related clip, e.g. the
/// audio half of a linked audio/video pair.
///
/// Plain data: `linkclipref` is the id of the other clip and is not resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub linkclipref: String,
    pub mediatype: MediaType,
    pub trackindex: u32,
    pub clipindex: u32,
    pub groupindex: u32,
}

impl ToXml for Link {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "link")?;
        write_text_element(writer, "linkclipref", &self.linkclipref)?;
        write_text_element(writer, "mediatype", self.mediatype.as_str())?;
        write_display_element(writer, "trackindex", self.trackindex)?;
        write_display_element(writer, "clipindex", self.clipindex)?;
        write_display_element(writer, "groupindex", self.groupindex)?;
        end(writer, "link")
    }
}
