use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesStart;
use uuid::Uuid;

use crate::audio::Audio;
use crate::config::SequenceConfig;
use crate::logging_info::LoggingInfo;
use crate::media::Media;
use crate::timecode::Timecode;
use crate::types::{Attributes, Rate};
use crate::video::Video;
use crate::xml::{ToXml, end, start, write_display_element, write_text_element};

/// One editable timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub id: String,
    pub uuid: Uuid,
    pub name: String,
    /// Length in frames at `rate`.
    pub duration: u64,
    pub rate: Rate,
    pub media: Media,
    pub timecode: Timecode,
    pub logginginfo: LoggingInfo,
    /// Written after `id`, in order.
    pub attributes: Attributes,
}

impl Sequence {
    /// Rate and attributes come from `config`; the timecode starts at zero
    /// at that rate.
    pub fn new(
        config: &SequenceConfig,
        id: impl Into<String>,
        uuid: Uuid,
        name: impl Into<String>,
        duration: u64,
    ) -> Self {
        let rate = Rate::new(config.timebase, config.ntsc);
        Self {
            id: id.into(),
            uuid,
            name: name.into(),
            duration,
            rate,
            media: Media::default(),
            timecode: Timecode::new(rate),
            logginginfo: LoggingInfo::default(),
            attributes: config.attributes.clone(),
        }
    }

    pub fn add_video(&mut self, video: Video) {
        self.media.add_video(video);
    }

    pub fn add_audio(&mut self, audio: Audio) {
        self.media.add_audio(audio);
    }
}

impl ToXml for Sequence {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut element = BytesStart::new("sequence");
        element.push_attribute(("id", self.id.as_str()));
        for (key, value) in &self.attributes {
            if key != "id" {
                element.push_attribute((key.as_str(), value.as_str()));
            }
        }
        start(writer, element)?;
        write_display_element(writer, "uuid", self.uuid)?;
        write_display_element(writer, "duration", self.duration)?;
        self.rate.write_xml(writer)?;
        write_text_element(writer, "name", &self.name)?;
        self.media.write_xml(writer)?;
        self.timecode.write_xml(writer)?;
        self.logginginfo.write_xml(writer)?;
        end(writer, "sequence")
    }
}
