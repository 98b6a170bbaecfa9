//! Scalar value types shared across the model.

use std::fmt;
use std::io::{self, Write};

use indexmap::IndexMap;
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::xml::{ToXml, end, schema_bool, start_plain, write_display_element, write_text_element};

/// Free-form XML attributes, emitted verbatim in insertion order.
pub type Attributes = IndexMap<String, String>;

/// Premiere ticks per second of media time.
pub const PPRO_TICKS_PER_SECOND: u64 = 254_016_000_000;

/// Media kind of a file, source track, filter or link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
}

impl MediaType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nominal frame rate: integer timebase plus the NTSC (1000/1001) flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rate {
    pub timebase: u32,
    pub ntsc: bool,
}

impl Rate {
    #[must_use]
    pub const fn new(timebase: u32, ntsc: bool) -> Self {
        Self { timebase, ntsc }
    }

    /// Actual frames per second, accounting for the NTSC pulldown.
    #[must_use]
    pub fn frames_per_second(&self) -> f64 {
        let base = f64::from(self.timebase);
        if self.ntsc { base * 1000.0 / 1001.0 } else { base }
    }

    /// Convert a frame count to Premiere ticks.
    ///
    /// Integer arithmetic keeps the result exact for whole frames.
    #[must_use]
    pub fn frames_to_ppro_ticks(&self, frames: u64) -> u64 {
        if self.timebase == 0 {
            return 0;
        }
        let ticks_per_frame_num = u128::from(PPRO_TICKS_PER_SECOND)
            * if self.ntsc { 1001 } else { 1000 };
        let denom = u128::from(self.timebase) * 1000;
        let ticks = u128::from(frames) * ticks_per_frame_num / denom;
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }

    /// Convert seconds of media to a whole number of frames (rounded).
    #[must_use]
    pub fn seconds_to_frames(&self, seconds: f64) -> u64 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        (seconds * self.frames_per_second()).round() as u64
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self::new(30, true)
    }
}

impl ToXml for Rate {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "rate")?;
        write_display_element(writer, "timebase", self.timebase)?;
        write_text_element(writer, "ntsc", schema_bool(self.ntsc))?;
        end(writer, "rate")
    }
}

/// How a clip's alpha channel is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaType {
    #[default]
    None,
    Straight,
    Black,
    White,
}

impl AlphaType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Straight => "straight",
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// Timecode display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFormat {
    #[default]
    DropFrame,
    NonDropFrame,
}

impl DisplayFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DropFrame => "DF",
            Self::NonDropFrame => "NDF",
        }
    }
}

/// Pixel dimensions of a video frame or still image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Used for video files whose dimensions are not known.
    pub const FALLBACK: Self = Self::new(1280, 720);

    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppro_ticks_ntsc() {
        let rate = Rate::new(30, true);
        assert_eq!(rate.frames_to_ppro_ticks(4526), 38_360_869_747_200);
        assert_eq!(rate.frames_to_ppro_ticks(0), 0);
    }

    #[test]
    fn test_ppro_ticks_integer_rate() {
        let rate = Rate::new(25, false);
        assert_eq!(rate.frames_to_ppro_ticks(25), PPRO_TICKS_PER_SECOND);
    }

    #[test]
    fn test_seconds_to_frames() {
        let rate = Rate::new(30, true);
        assert_eq!(rate.seconds_to_frames(151.0177), 4526);
        assert_eq!(rate.seconds_to_frames(-1.0), 0);
        assert_eq!(rate.seconds_to_frames(f64::NAN), 0);
        assert_eq!(Rate::new(24, false).seconds_to_frames(2.0), 48);
    }

    #[test]
    fn test_rate_fragment() {
        let xml = Rate::new(30, true).to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<rate>\n  <timebase>30</timebase>\n  <ntsc>TRUE</ntsc>\n</rate>"
        );
    }
}
