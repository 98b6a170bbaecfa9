//! Timeline clips.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesStart;

use crate::effect::Filter;
use crate::error::{ModelError, Result};
use crate::file::File;
use crate::link::Link;
use crate::logging_info::LOGGING_FIELDS;
use crate::types::{AlphaType, MediaType, Rate};
use crate::xml::{
    ToXml, end, schema_bool, start, start_plain, write_blank_group, write_display_element,
    write_text_element,
};

const ENTITY: &str = "clipitem";

/// Per-clip color fields. Always written blank.
const COLOR_FIELDS: [&str; 5] = ["lut", "lut1", "asc_sop", "asc_sat", "lut2"];

/// Track of the source media a clip was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTrack {
    pub mediatype: MediaType,
    pub trackindex: u32,
}

/// One placed instance of a [`File`] on a track.
///
/// `start`/`end` are the clip's position on the timeline, `in_point`/
/// `out_point` the trim inside the source, all in frames. Ids are supplied by
/// the caller; clips cut from the same file share a `masterclipid`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipItem {
    pub id: String,
    pub premiere_channel_type: Option<String>,
    pub masterclipid: String,
    pub name: String,
    pub enabled: bool,
    pub duration: u64,
    pub rate: Rate,
    pub start: i64,
    pub end: i64,
    pub in_point: i64,
    pub out_point: i64,
    pub ppro_ticks_in: u64,
    pub ppro_ticks_out: u64,
    pub file: File,
    pub sourcetrack: SourceTrack,
    pub label: String,
    pub alphatype: AlphaType,
    pub filters: Vec<Filter>,
    pub links: Vec<Link>,
}

impl ClipItem {
    pub fn builder(id: impl Into<String>, file: File) -> ClipItemBuilder {
        ClipItemBuilder::new(id, file)
    }

    pub fn add_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
    }
}

impl ToXml for ClipItem {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut element = BytesStart::new("clipitem");
        element.push_attribute(("id", self.id.as_str()));
        if let Some(channel_type) = &self.premiere_channel_type {
            element.push_attribute(("premiereChannelType", channel_type.as_str()));
        }
        start(writer, element)?;

        write_text_element(writer, "masterclipid", &self.masterclipid)?;
        write_text_element(writer, "name", &self.name)?;
        write_text_element(writer, "enabled", schema_bool(self.enabled))?;
        write_display_element(writer, "duration", self.duration)?;
        self.rate.write_xml(writer)?;
        write_display_element(writer, "start", self.start)?;
        write_display_element(writer, "end", self.end)?;
        write_display_element(writer, "in", self.in_point)?;
        write_display_element(writer, "out", self.out_point)?;
        write_display_element(writer, "pproTicksIn", self.ppro_ticks_in)?;
        write_display_element(writer, "pproTicksOut", self.ppro_ticks_out)?;

        self.file.write_xml(writer)?;

        start_plain(writer, "sourcetrack")?;
        write_text_element(writer, "mediatype", self.sourcetrack.mediatype.as_str())?;
        write_display_element(writer, "trackindex", self.sourcetrack.trackindex)?;
        end(writer, "sourcetrack")?;

        write_text_element(writer, "alphatype", self.alphatype.as_str())?;
        write_blank_group(writer, "logginginfo", &LOGGING_FIELDS)?;
        write_blank_group(writer, "colorinfo", &COLOR_FIELDS)?;

        start_plain(writer, "labels")?;
        write_text_element(writer, "label2", &self.label)?;
        end(writer, "labels")?;

        for filter in &self.filters {
            filter.write_xml(writer)?;
        }
        for link in &self.links {
            link.write_xml(writer)?;
        }
        end(writer, "clipitem")
    }
}

/// Builder for [`ClipItem`].
///
/// `masterclipid`, `name`, `rate`, `duration`, the timeline range and the
/// source range are required. Tick positions default to the source range
/// converted at the clip rate; the source track defaults to track 1 of the
/// file's media type.
#[derive(Debug, Clone)]
pub struct ClipItemBuilder {
    id: String,
    file: File,
    premiere_channel_type: Option<String>,
    masterclipid: Option<String>,
    name: Option<String>,
    enabled: bool,
    duration: Option<u64>,
    rate: Option<Rate>,
    timeline: Option<(i64, i64)>,
    source: Option<(i64, i64)>,
    ppro_ticks: Option<(u64, u64)>,
    sourcetrack: Option<SourceTrack>,
    label: String,
    alphatype: AlphaType,
    filters: Vec<Filter>,
    links: Vec<Link>,
}

impl ClipItemBuilder {
    fn new(id: impl Into<String>, file: File) -> Self {
        Self {
            id: id.into(),
            file,
            premiere_channel_type: None,
            masterclipid: None,
            name: None,
            enabled: true,
            duration: None,
            rate: None,
            timeline: None,
            source: None,
            ppro_ticks: None,
            sourcetrack: None,
            label: String::new(),
            alphatype: AlphaType::None,
            filters: Vec::new(),
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn premiere_channel_type(mut self, channel_type: impl Into<String>) -> Self {
        self.premiere_channel_type = Some(channel_type.into());
        self
    }

    #[must_use]
    pub fn masterclipid(mut self, masterclipid: impl Into<String>) -> Self {
        self.masterclipid = Some(masterclipid.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn duration(mut self, frames: u64) -> Self {
        self.duration = Some(frames);
        self
    }

    #[must_use]
    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Position on the timeline.
    #[must_use]
    pub fn timeline(mut self, start: i64, end: i64) -> Self {
        self.timeline = Some((start, end));
        self
    }

    /// Trim inside the source media.
    #[must_use]
    pub fn source_range(mut self, in_point: i64, out_point: i64) -> Self {
        self.source = Some((in_point, out_point));
        self
    }

    #[must_use]
    pub fn ppro_ticks(mut self, ticks_in: u64, ticks_out: u64) -> Self {
        self.ppro_ticks = Some((ticks_in, ticks_out));
        self
    }

    #[must_use]
    pub fn source_track(mut self, mediatype: MediaType, trackindex: u32) -> Self {
        self.sourcetrack = Some(SourceTrack {
            mediatype,
            trackindex,
        });
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn alphatype(mut self, alphatype: AlphaType) -> Self {
        self.alphatype = alphatype;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Validate and assemble the clip.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingField`] when a required field was not set and
    /// [`ModelError::InvalidRange`] when `start > end` or `in > out`.
    pub fn build(self) -> Result<ClipItem> {
        if self.id.trim().is_empty() {
            return Err(missing("id"));
        }
        let masterclipid = self
            .masterclipid
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| missing("masterclipid"))?;
        let name = self.name.ok_or_else(|| missing("name"))?;
        let rate = self.rate.ok_or_else(|| missing("rate"))?;
        let duration = self.duration.ok_or_else(|| missing("duration"))?;
        let (start, end) = self.timeline.ok_or_else(|| missing("start"))?;
        let (in_point, out_point) = self.source.ok_or_else(|| missing("in"))?;
        check_range("start/end", start, end)?;
        check_range("in/out", in_point, out_point)?;

        let (ppro_ticks_in, ppro_ticks_out) = self.ppro_ticks.unwrap_or_else(|| {
            (
                rate.frames_to_ppro_ticks(non_negative(in_point)),
                rate.frames_to_ppro_ticks(non_negative(out_point)),
            )
        });
        let sourcetrack = self.sourcetrack.unwrap_or(SourceTrack {
            mediatype: self.file.mediatype(),
            trackindex: 1,
        });

        Ok(ClipItem {
            id: self.id,
            premiere_channel_type: self.premiere_channel_type,
            masterclipid,
            name,
            enabled: self.enabled,
            duration,
            rate,
            start,
            end,
            in_point,
            out_point,
            ppro_ticks_in,
            ppro_ticks_out,
            file: self.file,
            sourcetrack,
            label: self.label,
            alphatype: self.alphatype,
            filters: self.filters,
            links: self.links,
        })
    }
}

fn missing(field: &'static str) -> ModelError {
    ModelError::MissingField {
        entity: ENTITY,
        field,
    }
}

fn check_range(field: &'static str, lower: i64, upper: i64) -> Result<()> {
    if lower > upper {
        return Err(ModelError::InvalidRange {
            entity: ENTITY,
            field,
            lower,
            upper,
        });
    }
    Ok(())
}

fn non_negative(frames: i64) -> u64 {
    u64::try_from(frames).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice_file() -> File {
        File::audio("file-1", "voice.mp3", "file://localhost/voice.mp3", 44100, 2)
    }

    fn voice_builder() -> ClipItemBuilder {
        ClipItem::builder("clipitem-1", voice_file())
            .masterclipid("masterclip-file-1")
            .name("voice.mp3")
            .rate(Rate::new(30, true))
            .duration(4526)
            .timeline(0, 4526)
            .source_range(0, 4526)
    }

    #[test]
    fn test_build_defaults() {
        let clip = voice_builder().build().unwrap();
        assert!(clip.enabled);
        assert_eq!(clip.ppro_ticks_in, 0);
        assert_eq!(clip.ppro_ticks_out, 38_360_869_747_200);
        assert_eq!(
            clip.sourcetrack,
            SourceTrack {
                mediatype: MediaType::Audio,
                trackindex: 1
            }
        );
        assert_eq!(clip.alphatype, AlphaType::None);
    }

    #[test]
    fn test_explicit_ticks_win() {
        let clip = voice_builder().ppro_ticks(5, 10).build().unwrap();
        assert_eq!((clip.ppro_ticks_in, clip.ppro_ticks_out), (5, 10));
    }

    #[test]
    fn test_missing_fields() {
        let err = ClipItem::builder("clipitem-1", voice_file())
            .name("voice.mp3")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::MissingField {
                field: "masterclipid",
                ..
            }
        ));

        let err = ClipItem::builder("  ", voice_file()).build().unwrap_err();
        assert!(matches!(err, ModelError::MissingField { field: "id", .. }));
    }

    #[test]
    fn test_inverted_ranges_are_rejected() {
        let err = voice_builder().timeline(10, 2).build().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidRange {
                field: "start/end",
                lower: 10,
                upper: 2,
                ..
            }
        ));
        let err = voice_builder().source_range(5, 4).build().unwrap_err();
        assert!(matches!(err, ModelError::InvalidRange { field: "in/out", .. }));
    }

    #[test]
    fn test_attributes() {
        let clip = voice_builder().premiere_channel_type("stereo").build().unwrap();
        let xml = clip.to_xml_string().unwrap();
        assert!(xml.starts_with(r#"<clipitem id="clipitem-1" premiereChannelType="stereo">"#));

        let clip = voice_builder().build().unwrap();
        let xml = clip.to_xml_string().unwrap();
        assert!(xml.starts_with(r#"<clipitem id="clipitem-1">"#));
    }

    #[test]
    fn test_blank_logging_and_color() {
        let xml = voice_builder().build().unwrap().to_xml_string().unwrap();
        assert!(xml.contains("<lognote></lognote>"));
        assert!(xml.contains("<asc_sop></asc_sop>"));
        assert!(xml.contains("<labels>\n    <label2></label2>\n  </labels>"));
    }
}
