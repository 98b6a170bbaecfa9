use std::io::{self, Write};

use quick_xml::Writer;

use crate::config::AudioConfig;
use crate::track::Track;
use crate::xml::{ToXml, empty, end, start_plain, write_display_element};

/// One `<group>` of the audio outputs section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputGroup {
    pub index: u32,
    pub numchannels: u32,
    pub downmix: u32,
    pub channel_index: u32,
}

impl ToXml for OutputGroup {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "group")?;
        write_display_element(writer, "index", self.index)?;
        write_display_element(writer, "numchannels", self.numchannels)?;
        write_display_element(writer, "downmix", self.downmix)?;
        start_plain(writer, "channel")?;
        write_display_element(writer, "index", self.channel_index)?;
        end(writer, "channel")?;
        end(writer, "group")
    }
}

/// Audio container of a sequence: format, output routing and tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub num_output_channels: u32,
    pub depth: u32,
    pub samplerate: u32,
    pub outputs: Vec<OutputGroup>,
    pub tracks: Vec<Track>,
}

impl Audio {
    pub fn new(num_output_channels: u32, depth: u32, samplerate: u32) -> Self {
        Self {
            num_output_channels,
            depth,
            samplerate,
            outputs: Vec::new(),
            tracks: Vec::new(),
        }
    }

    /// Format and output groups taken from configuration.
    pub fn from_config(config: &AudioConfig) -> Self {
        let mut audio = Self::new(config.output_channels, config.depth, config.samplerate);
        for group in &config.output_groups {
            audio.add_output_group(group.index, group.numchannels, group.downmix, group.channel);
        }
        audio
    }

    pub fn add_output_group(
        &mut self,
        index: u32,
        numchannels: u32,
        downmix: u32,
        channel_index: u32,
    ) {
        self.outputs.push(OutputGroup {
            index,
            numchannels,
            downmix,
            channel_index,
        });
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self::from_config(&AudioConfig::default())
    }
}

impl ToXml for Audio {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "audio")?;
        write_display_element(writer, "numOutputChannels", self.num_output_channels)?;

        start_plain(writer, "format")?;
        start_plain(writer, "samplecharacteristics")?;
        write_display_element(writer, "depth", self.depth)?;
        write_display_element(writer, "samplerate", self.samplerate)?;
        end(writer, "samplecharacteristics")?;
        end(writer, "format")?;

        if self.outputs.is_empty() {
            empty(writer, "outputs")?;
        } else {
            start_plain(writer, "outputs")?;
            for group in &self.outputs {
                group.write_xml(writer)?;
            }
            end(writer, "outputs")?;
        }

        for track in &self.tracks {
            track.write_xml(writer)?;
        }
        end(writer, "audio")
    }
}
