use std::io::{self, Write};

use quick_xml::Writer;

use crate::audio::Audio;
use crate::video::Video;
use crate::xml::{ToXml, empty, end, start_plain};

/// At most one video and one audio container; video is written first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Media {
    pub video: Option<Video>,
    pub audio: Option<Audio>,
}

impl Media {
    /// Set the video container, replacing any previous one.
    pub fn add_video(&mut self, video: Video) {
        self.video = Some(video);
    }

    /// Set the audio container, replacing any previous one.
    pub fn add_audio(&mut self, audio: Audio) {
        self.audio = Some(audio);
    }

    pub fn is_empty(&self) -> bool {
        self.video.is_none() && self.audio.is_none()
    }
}

impl ToXml for Media {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        if self.is_empty() {
            return empty(writer, "media");
        }
        start_plain(writer, "media")?;
        if let Some(video) = &self.video {
            video.write_xml(writer)?;
        }
        if let Some(audio) = &self.audio {
            audio.write_xml(writer)?;
        }
        end(writer, "media")
    }
}
