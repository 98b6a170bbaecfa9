use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesStart;

use crate::types::{Dimensions, MediaType, Rate};
use crate::xml::{ToXml, end, start, start_plain, write_display_element, write_text_element};

/// Bit depth written for audio files.
const AUDIO_FILE_DEPTH: u32 = 16;

/// A source media file referenced by a clip.
///
/// The media type is fixed at construction and decides which sample
/// characteristics block the fragment carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id: String,
    pub name: String,
    pub pathurl: String,
    pub samplerate: u32,
    pub channelcount: u32,
    mediatype: MediaType,
    dimensions: Option<Dimensions>,
    rate: Rate,
}

impl File {
    pub fn audio(
        id: impl Into<String>,
        name: impl Into<String>,
        pathurl: impl Into<String>,
        samplerate: u32,
        channelcount: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pathurl: pathurl.into(),
            samplerate,
            channelcount,
            mediatype: MediaType::Audio,
            dimensions: None,
            rate: Rate::new(30, false),
        }
    }

    /// A video (or still image) file. Unknown dimensions render as
    /// [`Dimensions::FALLBACK`].
    pub fn video(
        id: impl Into<String>,
        name: impl Into<String>,
        pathurl: impl Into<String>,
        samplerate: u32,
        channelcount: u32,
        dimensions: Option<Dimensions>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pathurl: pathurl.into(),
            samplerate,
            channelcount,
            mediatype: MediaType::Video,
            dimensions,
            rate: Rate::new(30, false),
        }
    }

    pub fn mediatype(&self) -> MediaType {
        self.mediatype
    }

    /// Dimensions as written, with the fallback applied. `None` for audio.
    pub fn dimensions(&self) -> Option<Dimensions> {
        match self.mediatype {
            MediaType::Audio => None,
            MediaType::Video => Some(self.dimensions.unwrap_or(Dimensions::FALLBACK)),
        }
    }

    fn write_audio_media<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "audio")?;
        start_plain(writer, "samplecharacteristics")?;
        write_display_element(writer, "depth", AUDIO_FILE_DEPTH)?;
        write_display_element(writer, "samplerate", self.samplerate)?;
        end(writer, "samplecharacteristics")?;
        write_display_element(writer, "channelcount", self.channelcount)?;
        end(writer, "audio")
    }

    fn write_video_media<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let dimensions = self.dimensions.unwrap_or(Dimensions::FALLBACK);
        start_plain(writer, "video")?;
        start_plain(writer, "samplecharacteristics")?;
        self.rate.write_xml(writer)?;
        write_display_element(writer, "width", dimensions.width)?;
        write_display_element(writer, "height", dimensions.height)?;
        write_text_element(writer, "anamorphic", "FALSE")?;
        write_text_element(writer, "pixelaspectratio", "square")?;
        write_text_element(writer, "fielddominance", "none")?;
        write_text_element(writer, "colordepth", "24")?;
        end(writer, "samplecharacteristics")?;
        end(writer, "video")
    }
}

impl ToXml for File {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut element = BytesStart::new("file");
        element.push_attribute(("id", self.id.as_str()));
        start(writer, element)?;
        write_text_element(writer, "name", &self.name)?;
        write_text_element(writer, "pathurl", &self.pathurl)?;
        start_plain(writer, "media")?;
        match self.mediatype {
            MediaType::Audio => self.write_audio_media(writer)?,
            MediaType::Video => self.write_video_media(writer)?,
        }
        end(writer, "media")?;
        end(writer, "file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_file_has_no_dimensions() {
        let file = File::audio("file-1", "voice.mp3", "file://localhost/voice.mp3", 44100, 2);
        let xml = file.to_xml_string().unwrap();
        assert!(!xml.contains("<width>"));
        assert!(!xml.contains("<height>"));
        assert!(xml.contains("<depth>16</depth>"));
        assert!(xml.contains("<samplerate>44100</samplerate>"));
        assert!(xml.contains("<channelcount>2</channelcount>"));
        assert_eq!(file.dimensions(), None);
    }

    #[test]
    fn test_video_file_defaults_dimensions() {
        let file = File::video("file-2", "shot.mp4", "file://localhost/shot.mp4", 48000, 2, None);
        let xml = file.to_xml_string().unwrap();
        assert!(xml.contains("<width>1280</width>"));
        assert!(xml.contains("<height>720</height>"));
        assert!(xml.contains("<ntsc>FALSE</ntsc>"));
        assert!(!xml.contains("<channelcount>"));
        assert_eq!(file.dimensions(), Some(Dimensions::FALLBACK));
    }

    #[test]
    fn test_video_file_uses_probed_dimensions() {
        let file = File::video(
            "file-3",
            "wide.mov",
            "file://localhost/wide.mov",
            48000,
            2,
            Some(Dimensions::new(1920, 1080)),
        );
        let xml = file.to_xml_string().unwrap();
        let width = xml.find("<width>1920</width>").unwrap();
        let height = xml.find("<height>1080</height>").unwrap();
        let anamorphic = xml.find("<anamorphic>").unwrap();
        assert!(width < height && height < anamorphic);
    }

    #[test]
    fn test_name_is_escaped() {
        let file = File::audio("file-4", "a&b.mp3", "file://localhost/a%26b.mp3", 44100, 2);
        let xml = file.to_xml_string().unwrap();
        assert!(xml.contains("<name>a&amp;b.mp3</name>"));
    }
}
