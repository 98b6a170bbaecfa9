use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesStart;

use crate::clipitem::ClipItem;
use crate::config::TrackConfig;
use crate::types::Attributes;
use crate::xml::{ToXml, end, start, write_display_element, write_text_element};

pub const TARGETED_ATTRIBUTE: &str = "MZ.TrackTargeted";
pub const TRACK_TYPE_ATTRIBUTE: &str = "premiereTrackType";

/// One timeline lane holding clips in placement order.
///
/// Clips are appended as given; overlap is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub attributes: Attributes,
    pub outputchannelindex: u32,
    pub clipitems: Vec<ClipItem>,
}

impl Track {
    /// Build a lane from the configured base attributes.
    ///
    /// `targeted` and `track_type` are merged into the configured map: an
    /// existing key keeps its position, a new key is appended.
    pub fn new(
        config: &TrackConfig,
        targeted: bool,
        track_type: impl Into<String>,
        outputchannelindex: u32,
    ) -> Self {
        let mut attributes = config.attributes.clone();
        attributes.insert(
            TARGETED_ATTRIBUTE.to_string(),
            if targeted { "1" } else { "0" }.to_string(),
        );
        attributes.insert(TRACK_TYPE_ATTRIBUTE.to_string(), track_type.into());
        Self {
            attributes,
            outputchannelindex,
            clipitems: Vec::new(),
        }
    }

    pub fn add_clipitem(&mut self, clipitem: ClipItem) {
        self.clipitems.push(clipitem);
    }

    pub fn is_targeted(&self) -> bool {
        self.attributes
            .get(TARGETED_ATTRIBUTE)
            .is_some_and(|value| value == "1")
    }

    pub fn track_type(&self) -> Option<&str> {
        self.attributes.get(TRACK_TYPE_ATTRIBUTE).map(String::as_str)
    }

    /// Last timeline frame covered by any clip, or 0 for an empty lane.
    pub fn end_frame(&self) -> i64 {
        self.clipitems.iter().map(|clip| clip.end).max().unwrap_or(0)
    }
}

impl ToXml for Track {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut element = BytesStart::new("track");
        for (key, value) in &self.attributes {
            element.push_attribute((key.as_str(), value.as_str()));
        }
        start(writer, element)?;
        for clipitem in &self.clipitems {
            clipitem.write_xml(writer)?;
        }
        write_text_element(writer, "enabled", "TRUE")?;
        write_text_element(writer, "locked", "FALSE")?;
        write_display_element(writer, "outputchannelindex", self.outputchannelindex)?;
        end(writer, "track")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::File;
    use crate::types::Rate;

    #[test]
    fn test_config_attributes_merge_in_place() {
        let track = Track::new(&TrackConfig::default(), false, "Stereo", 1);
        let keys: Vec<&str> = track.attributes.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "TL.SQTrackShy",
                "TL.SQTrackExpandedHeight",
                "TL.SQTrackExpanded",
                "MZ.TrackTargeted",
                "premiereTrackType",
            ]
        );
        assert!(!track.is_targeted());
        assert_eq!(track.track_type(), Some("Stereo"));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let mut config = TrackConfig::default();
        config
            .attributes
            .insert("PannerName".to_string(), "Balance".to_string());
        let track = Track::new(&config, true, "Mono", 2);
        let xml = track.to_xml_string().unwrap();
        assert!(xml.contains(r#"PannerName="Balance""#));
        assert!(xml.contains(r#"MZ.TrackTargeted="1""#));
    }

    #[test]
    fn test_end_frame_is_latest_clip_end() {
        let mut track = Track::new(&TrackConfig::default(), true, "Mono", 1);
        assert_eq!(track.end_frame(), 0);
        for (index, (start, end)) in [(0, 150), (150, 300)].into_iter().enumerate() {
            let file = File::audio(format!("file-{index}"), "a.mp3", "file://localhost/a.mp3", 48000, 2);
            let clip = ClipItem::builder(format!("clipitem-{index}"), file)
                .masterclipid(format!("masterclip-file-{index}"))
                .name("a.mp3")
                .rate(Rate::new(30, true))
                .duration(150)
                .timeline(start, end)
                .source_range(0, 150)
                .build()
                .unwrap();
            track.add_clipitem(clip);
        }
        assert_eq!(track.end_frame(), 300);
    }

    #[test]
    fn test_empty_track_trailer() {
        let mut config = TrackConfig::default();
        config.attributes.clear();
        let xml = Track::new(&config, true, "Stereo", 1)
            .to_xml_string()
            .unwrap();
        assert_eq!(
            xml,
            "<track MZ.TrackTargeted=\"1\" premiereTrackType=\"Stereo\">\n  \
             <enabled>TRUE</enabled>\n  \
             <locked>FALSE</locked>\n  \
             <outputchannelindex>1</outputchannelindex>\n\
             </track>"
        );
    }
}
