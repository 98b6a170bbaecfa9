//! Generator configuration.
//!
//! A [`ProjectConfig`] is loaded once at start-up and handed by reference to
//! every constructor that needs defaults, so values are resolved at call
//! time. Every section and field is optional in the TOML file; missing ones
//! take the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::types::{Attributes, Rate};

/// Frames used when a media duration cannot be probed.
pub const DEFAULT_FALLBACK_DURATION: u64 = 4526;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub sequence: SequenceConfig,
    pub track: TrackConfig,
    pub video: VideoConfig,
    pub audio: AudioConfig,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
}

impl ProjectConfig {
    /// Load a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ConfigRead`] if the file cannot be read and
    /// [`ModelError::ConfigParse`] if it is not a valid configuration.
    /// A zero timebase or frame size is [`ModelError::ConfigInvalid`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|source| ModelError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        match config.zero_field() {
            Some(field) => Err(ModelError::ConfigInvalid {
                path: path.to_path_buf(),
                field,
            }),
            None => Ok(config),
        }
    }

    /// First setting that must be positive but is zero.
    pub fn zero_field(&self) -> Option<&'static str> {
        [
            ("sequence.timebase", self.sequence.timebase),
            ("video.width", self.video.width),
            ("video.height", self.video.height),
        ]
        .into_iter()
        .find_map(|(field, value)| (value == 0).then_some(field))
    }

    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Frame rate of generated sequences.
    pub fn sequence_rate(&self) -> Rate {
        Rate::new(self.sequence.timebase, self.sequence.ntsc)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    pub timebase: u32,
    pub ntsc: bool,
    /// Extra `<sequence>` attributes, written after `id` in this order.
    pub attributes: Attributes,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            timebase: 30,
            ntsc: true,
            attributes: attributes(&[
                ("TL.SQAudioVisibleBase", "0"),
                ("TL.SQVideoVisibleBase", "0"),
                ("TL.SQVisibleBaseTime", "0"),
                ("TL.SQAVDividerPosition", "0.5"),
                ("TL.SQHideShyTracks", "0"),
                ("TL.SQHeaderWidth", "236"),
                ("Monitor.ProgramZoomOut", "0"),
                ("Monitor.ProgramZoomIn", "0"),
                ("TL.SQTimePerPixel", "0.2"),
                ("MZ.EditLine", "0"),
                ("MZ.Sequence.PreviewFrameSizeHeight", "720"),
                ("MZ.Sequence.PreviewFrameSizeWidth", "1280"),
                ("MZ.Sequence.AudioTimeDisplayFormat", "200"),
                ("MZ.Sequence.PreviewUseMaxRenderQuality", "false"),
                ("MZ.Sequence.PreviewUseMaxBitDepth", "false"),
                ("MZ.Sequence.VideoTimeDisplayFormat", "110"),
                ("MZ.WorkInPoint", "0"),
                ("explodedTracks", "true"),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackConfig {
    /// Base `<track>` attributes; targeting and track type are merged in.
    pub attributes: Attributes,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            attributes: attributes(&[
                ("TL.SQTrackShy", "0"),
                ("TL.SQTrackExpandedHeight", "25"),
                ("TL.SQTrackExpanded", "0"),
                ("MZ.TrackTargeted", "1"),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoConfig {
    /// Codec name written into the video format block.
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            name: "Apple ProRes 422".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub output_channels: u32,
    pub depth: u32,
    pub samplerate: u32,
    pub output_groups: Vec<OutputGroupConfig>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            output_channels: 2,
            depth: 16,
            samplerate: 48000,
            output_groups: Vec::new(),
        }
    }
}

/// One `<outputs><group>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputGroupConfig {
    pub index: u32,
    pub numchannels: u32,
    pub downmix: u32,
    pub channel: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Frames used when a file's duration cannot be probed.
    pub fallback_duration: u64,
    /// Frames a still image is held on the timeline.
    pub still_duration: u64,
    /// Probe executable.
    pub ffprobe: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            fallback_duration: DEFAULT_FALLBACK_DURATION,
            still_duration: 150,
            ffprobe: "ffprobe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: Option<String>,
}

fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ProjectConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.sequence_rate(), Rate::new(30, true));
        assert_eq!(config.media.fallback_duration, 4526);
    }

    #[test]
    fn test_attribute_order_follows_file() {
        let config = ProjectConfig::from_toml_str(
            r#"
            [track.attributes]
            "Z.Last" = "1"
            "A.First" = "2"
            "M.Middle" = "3"
            "#,
        )
        .unwrap();
        let keys: Vec<&str> = config.track.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Z.Last", "A.First", "M.Middle"]);
    }

    #[test]
    fn test_partial_sections() {
        let config = ProjectConfig::from_toml_str(
            r#"
            [sequence]
            timebase = 25
            ntsc = false

            [video]
            width = 1920
            height = 1080

            [[audio.output_groups]]
            index = 1
            numchannels = 1
            downmix = 0
            channel = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.sequence_rate(), Rate::new(25, false));
        assert_eq!(config.video.name, "Apple ProRes 422");
        assert_eq!(config.video.width, 1920);
        assert_eq!(config.audio.output_groups.len(), 1);
        assert_eq!(
            config.sequence.attributes,
            SequenceConfig::default().attributes
        );
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(ProjectConfig::from_toml_str("[colour]\nlut = 1\n").is_err());
    }

    #[test]
    fn test_load_rejects_zero_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xmeml.toml");

        std::fs::write(&path, "[sequence]\ntimebase = 0\n").unwrap();
        let err = ProjectConfig::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ConfigInvalid { field: "sequence.timebase", .. }
        ));

        std::fs::write(&path, "[video]\nwidth = 1920\nheight = 0\n").unwrap();
        let err = ProjectConfig::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::ConfigInvalid { field: "video.height", .. }));

        std::fs::write(&path, "[video]\nwidth = 1920\nheight = 1080\n").unwrap();
        assert_eq!(ProjectConfig::load(&path).unwrap().video.height, 1080);
    }

    #[test]
    fn test_load_reports_path() {
        let err = ProjectConfig::load(Path::new("/nonexistent/xmeml.toml")).unwrap_err();
        assert!(matches!(err, ModelError::ConfigRead { .. }));
    }
}
