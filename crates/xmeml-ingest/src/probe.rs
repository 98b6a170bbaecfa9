//! Media metadata probing.
//!
//! [`MediaProbe`] is the seam between the pipeline and the external probe;
//! [`FfprobeProbe`] is the production implementation.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::error::ProbeError;

/// Metadata reported for one media file. Every field is optional because
/// probes report only what the container carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaInfo {
    pub duration_seconds: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
    pub has_video: bool,
}

/// Source of per-file media metadata.
pub trait MediaProbe {
    /// Read the metadata of `path`.
    ///
    /// # Errors
    ///
    /// Any [`ProbeError`] the implementation hits reading the file.
    fn probe(&self, path: &Path) -> Result<MediaInfo, ProbeError>;

    /// Playback length in seconds.
    fn duration_seconds(&self, path: &Path) -> Result<f64, ProbeError> {
        self.probe(path)?
            .duration_seconds
            .ok_or_else(|| ProbeError::MissingDuration {
                path: path.to_path_buf(),
            })
    }

    /// Width and height of the first video stream.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        let info = self.probe(path)?;
        if !info.has_video {
            return Err(ProbeError::NoVideoStream {
                path: path.to_path_buf(),
            });
        }
        match (info.width, info.height) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(ProbeError::MissingDimensions {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Probes files by running `ffprobe` and reading its JSON report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfprobeProbe {
    binary: PathBuf,
}

impl FfprobeProbe {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl MediaProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<MediaInfo, ProbeError> {
        debug!(binary = %self.binary.display(), path = %path.display(), "probing media");
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .map_err(|source| ProbeError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout)).map_err(|source| {
            ProbeError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProbeReport {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    #[serde(default)]
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Parse an `ffprobe -print_format json -show_format -show_streams` report.
///
/// The container duration wins over stream durations. Dimensions come from
/// the first video stream, sample rate and channels from the first audio
/// stream.
pub fn parse_probe_output(json: &str) -> Result<MediaInfo, serde_json::Error> {
    let report: ProbeReport = serde_json::from_str(json)?;

    let video = report
        .streams
        .iter()
        .find(|stream| stream.codec_type.as_deref() == Some("video"));
    let audio = report
        .streams
        .iter()
        .find(|stream| stream.codec_type.as_deref() == Some("audio"));

    let duration_seconds = report
        .format
        .as_ref()
        .and_then(|format| parse_seconds(format.duration.as_deref()))
        .or_else(|| {
            report
                .streams
                .iter()
                .find_map(|stream| parse_seconds(stream.duration.as_deref()))
        });

    Ok(MediaInfo {
        duration_seconds,
        width: video.and_then(|stream| stream.width),
        height: video.and_then(|stream| stream.height),
        sample_rate: audio
            .and_then(|stream| stream.sample_rate.as_deref())
            .and_then(|rate| rate.trim().parse().ok()),
        channels: audio.and_then(|stream| stream.channels),
        has_video: video.is_some(),
    })
}

/// ffprobe reports durations as decimal strings; `N/A` and garbage are absent.
fn parse_seconds(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MP4_REPORT: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "video", "width": 1920, "height": 1080, "duration": "12.480000"},
            {"index": 1, "codec_type": "audio", "sample_rate": "48000", "channels": 2, "duration": "12.500000"}
        ],
        "format": {"filename": "shot.mp4", "duration": "12.512000"}
    }"#;

    #[test]
    fn test_parse_video_report() {
        let info = parse_probe_output(MP4_REPORT).unwrap();
        assert_eq!(info.duration_seconds, Some(12.512));
        assert_eq!((info.width, info.height), (Some(1920), Some(1080)));
        assert_eq!(info.sample_rate, Some(48000));
        assert_eq!(info.channels, Some(2));
        assert!(info.has_video);
    }

    #[test]
    fn test_stream_duration_when_format_has_none() {
        let json = r#"{"streams": [{"codec_type": "audio", "duration": "3.5"}], "format": {"duration": "N/A"}}"#;
        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.duration_seconds, Some(3.5));
        assert!(!info.has_video);
    }

    #[test]
    fn test_empty_report() {
        let info = parse_probe_output("{}").unwrap();
        assert_eq!(info, MediaInfo::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse_probe_output("not json").is_err());
    }

    #[test]
    fn test_missing_binary() {
        let probe = FfprobeProbe::new("/nonexistent/ffprobe-binary");
        let err = probe.probe(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, ProbeError::Spawn { .. }));
    }

    struct Fixed(MediaInfo);

    impl MediaProbe for Fixed {
        fn probe(&self, _path: &Path) -> Result<MediaInfo, ProbeError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_default_dimension_lookup() {
        let audio_only = Fixed(MediaInfo {
            duration_seconds: Some(1.0),
            ..MediaInfo::default()
        });
        assert!(matches!(
            audio_only.dimensions(Path::new("a.mp3")),
            Err(ProbeError::NoVideoStream { .. })
        ));
        assert_eq!(audio_only.duration_seconds(Path::new("a.mp3")).unwrap(), 1.0);

        let no_size = Fixed(MediaInfo {
            has_video: true,
            ..MediaInfo::default()
        });
        assert!(matches!(
            no_size.dimensions(Path::new("b.mp4")),
            Err(ProbeError::MissingDimensions { .. })
        ));
        assert!(matches!(
            no_size.duration_seconds(Path::new("b.mp4")),
            Err(ProbeError::MissingDuration { .. })
        ));
    }
}
