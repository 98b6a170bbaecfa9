use std::io::{self, Write};

use quick_xml::Writer;

use crate::config::VideoConfig;
use crate::track::Track;
use crate::types::{Dimensions, Rate};
use crate::xml::{ToXml, end, start_plain, write_display_element, write_text_element};

/// Authoring application identity expected in the codec block.
const APP_NAME: &str = "Final Cut Pro";
const APP_MANUFACTURER: &str = "Apple Inc.";
const APP_VERSION: &str = "7.0";

/// QuickTime codec constants written with every video format.
const CODEC_TYPE_CODE: &str = "apcn";
const CODEC_VENDOR_CODE: &str = "appl";
const SPATIAL_QUALITY: &str = "1024";

/// Video container of a sequence: frame format and tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    /// Codec name; mirrored into the QuickTime codec block.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rate: Rate,
    pub tracks: Vec<Track>,
}

impl Video {
    /// A container using the configured format at the sequence's rate.
    pub fn new(config: &VideoConfig, rate: Rate) -> Self {
        Self {
            name: config.name.clone(),
            width: config.width,
            height: config.height,
            rate,
            tracks: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    fn write_codec<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "codec")?;
        write_text_element(writer, "name", &self.name)?;
        start_plain(writer, "appspecificdata")?;
        write_text_element(writer, "appname", APP_NAME)?;
        write_text_element(writer, "appmanufacturer", APP_MANUFACTURER)?;
        write_text_element(writer, "appversion", APP_VERSION)?;
        start_plain(writer, "data")?;
        start_plain(writer, "qtcodec")?;
        write_text_element(writer, "codecname", &self.name)?;
        write_text_element(writer, "codectypename", &self.name)?;
        write_text_element(writer, "codectypecode", CODEC_TYPE_CODE)?;
        write_text_element(writer, "codecvendorcode", CODEC_VENDOR_CODE)?;
        write_text_element(writer, "spatialquality", SPATIAL_QUALITY)?;
        write_text_element(writer, "temporalquality", "0")?;
        write_text_element(writer, "keyframerate", "0")?;
        write_text_element(writer, "datarate", "0")?;
        end(writer, "qtcodec")?;
        end(writer, "data")?;
        end(writer, "appspecificdata")?;
        end(writer, "codec")
    }
}

impl ToXml for Video {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "video")?;
        start_plain(writer, "format")?;
        start_plain(writer, "samplecharacteristics")?;
        self.rate.write_xml(writer)?;
        self.write_codec(writer)?;
        write_display_element(writer, "width", self.width)?;
        write_display_element(writer, "height", self.height)?;
        write_text_element(writer, "anamorphic", "FALSE")?;
        write_text_element(writer, "pixelaspectratio", "square")?;
        write_text_element(writer, "fielddominance", "none")?;
        write_text_element(writer, "colordepth", "24")?;
        end(writer, "samplecharacteristics")?;
        end(writer, "format")?;
        for track in &self.tracks {
            track.write_xml(writer)?;
        }
        end(writer, "video")
    }
}
