//! Project directory to xmeml document.
//!
//! One run validates the layout, logs the script text, builds a single
//! sequence from the voiceover and the footage, and writes the document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use xmeml_ingest::{
    AssetKind, FootageAsset, MediaProbe, ProjectLayout, extract_script_text, file_url,
};
use xmeml_model::{
    AlphaType, Audio, ClipItem, Dimensions, File, Filter, Project, ProjectConfig, Rate, Sequence,
    Track, Video, generate_id,
};

pub const DEFAULT_OUTPUT: &str = "sequence_with_video_image_audio.xml";
pub const SEQUENCE_NAME: &str = "Sequence 01";

/// Used when the probe does not report them for the voiceover.
const FALLBACK_SAMPLE_RATE: u32 = 44100;
const FALLBACK_CHANNELS: u32 = 2;

/// Sample format recorded on video files.
const VIDEO_FILE_SAMPLE_RATE: u32 = 48000;
const VIDEO_FILE_CHANNELS: u32 = 2;

const VOICEOVER_LEVEL: &str = "1";
const AUDIO_TRACK_TYPE: &str = "Stereo";
const VIDEO_TRACK_TYPE: &str = "Mono";
const CHANNEL_TYPE: &str = "stereo";

const AUDIO_LABEL: &str = "Caribbean";
const VIDEO_LABEL: &str = "Iris";
const IMAGE_LABEL: &str = "Lavender";

/// What a placed clip was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    Voiceover,
    Video,
    Image,
}

impl ClipKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Voiceover => "voiceover",
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

/// Where a clip's length came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSource {
    Probed,
    Fallback,
    Still,
}

impl DurationSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Probed => "probed",
            Self::Fallback => "fallback",
            Self::Still => "still",
        }
    }
}

/// One clip as placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedClip {
    pub name: String,
    pub kind: ClipKind,
    pub start: i64,
    pub end: i64,
    pub duration_source: DurationSource,
    /// Basic Motion scale in percent; `None` for audio.
    pub scale: Option<f64>,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub sequence_name: String,
    pub sequence_duration: u64,
    pub clips: Vec<PlacedClip>,
    /// Characters of script text, `None` when the script could not be read.
    pub script_chars: Option<usize>,
    pub output: Option<PathBuf>,
}

/// Validate `project_path`, build the project and write it to `output`.
///
/// # Errors
///
/// Fails on missing inputs, unreadable directories, footage whose dimensions
/// cannot be probed, and when the output cannot be written. No file is
/// written on failure.
pub fn run<P: MediaProbe + ?Sized>(
    project_path: &Path,
    output: &Path,
    config: &ProjectConfig,
    probe: &P,
) -> Result<GenerationReport> {
    let layout = ProjectLayout::discover(project_path)
        .with_context(|| format!("invalid project directory {}", project_path.display()))?;
    let span = info_span!("project", root = %layout.root.display());
    let _guard = span.enter();

    let script_chars = log_script(&layout.script_path);
    let (project, mut report) = build_project(&layout, config, probe)?;
    report.script_chars = script_chars;

    project
        .save_to_file(output)
        .with_context(|| format!("failed to save project to {}", output.display()))?;
    report.output = Some(output.to_path_buf());
    info!(output = %output.display(), "video project generation completed");
    Ok(report)
}

/// Build the single-sequence project for a validated layout.
///
/// # Errors
///
/// Fails when a directory cannot be listed, when a footage file's
/// dimensions cannot be probed, or when the model rejects a clip.
pub fn build_project<P: MediaProbe + ?Sized>(
    layout: &ProjectLayout,
    config: &ProjectConfig,
    probe: &P,
) -> Result<(Project, GenerationReport)> {
    let rate = config.sequence_rate();
    let mut clips = Vec::new();

    let video = match layout.footage().context("failed to list footage")? {
        footage if footage.is_empty() => None,
        footage => Some(build_video(&footage, config, rate, probe, &mut clips)?),
    };
    let audio = match layout.voiceover().context("failed to list audio")? {
        Some(path) => Some(build_audio(&path, config, rate, probe, &mut clips)?),
        None => None,
    };

    let tracks = video
        .iter()
        .flat_map(|video| &video.tracks)
        .chain(audio.iter().flat_map(|audio| &audio.tracks));
    let placed_end = tracks
        .filter(|track| !track.clipitems.is_empty())
        .map(Track::end_frame)
        .max();
    let sequence_duration = match placed_end {
        Some(end) => u64::try_from(end).unwrap_or(0),
        None => config.media.fallback_duration,
    };

    let mut sequence = Sequence::new(
        &config.sequence,
        generate_id("sequence")?,
        Uuid::new_v4(),
        SEQUENCE_NAME,
        sequence_duration,
    );
    if let Some(video) = video {
        sequence.add_video(video);
    }
    if let Some(audio) = audio {
        sequence.add_audio(audio);
    }
    info!(
        name = SEQUENCE_NAME,
        duration = sequence_duration,
        clips = clips.len(),
        "sequence assembled"
    );

    let mut project = Project::new();
    project.add_sequence(sequence)?;

    let report = GenerationReport {
        sequence_name: SEQUENCE_NAME.to_string(),
        sequence_duration,
        clips,
        script_chars: None,
        output: None,
    };
    Ok((project, report))
}

fn build_audio<P: MediaProbe + ?Sized>(
    path: &Path,
    config: &ProjectConfig,
    rate: Rate,
    probe: &P,
    placed: &mut Vec<PlacedClip>,
) -> Result<Audio> {
    let name = file_name(path);
    info!(file = %name, "using mp3 as voiceover");

    let info = probe.probe(path);
    let (sample_rate, channels, seconds) = match &info {
        Ok(info) => (info.sample_rate, info.channels, info.duration_seconds),
        Err(error) => {
            warn!(file = %name, %error, "failed to probe voiceover");
            (None, None, None)
        }
    };
    let (frames, duration_source) = frames_or_fallback(&name, seconds, rate, config);

    let file_id = generate_id("file")?;
    let file = File::audio(
        file_id.clone(),
        name.clone(),
        file_url(path),
        sample_rate.unwrap_or(FALLBACK_SAMPLE_RATE),
        channels.unwrap_or(FALLBACK_CHANNELS),
    );
    let end = frame_position(frames);
    let clip = ClipItem::builder(generate_id("clipitem")?, file)
        .premiere_channel_type(CHANNEL_TYPE)
        .masterclipid(format!("masterclip-{file_id}"))
        .name(name.clone())
        .rate(rate)
        .duration(frames)
        .timeline(0, end)
        .source_range(0, end)
        .label(AUDIO_LABEL)
        .filter(Filter::audio_levels(VOICEOVER_LEVEL))
        .build()
        .with_context(|| format!("invalid voiceover clip for {name}"))?;
    debug!(id = %clip.id, frames, "voiceover clip created");

    let mut track = Track::new(&config.track, true, AUDIO_TRACK_TYPE, 1);
    track.add_clipitem(clip);
    let mut audio = Audio::from_config(&config.audio);
    audio.add_track(track);

    placed.push(PlacedClip {
        name,
        kind: ClipKind::Voiceover,
        start: 0,
        end,
        duration_source,
        scale: None,
    });
    Ok(audio)
}

fn build_video<P: MediaProbe + ?Sized>(
    footage: &[FootageAsset],
    config: &ProjectConfig,
    rate: Rate,
    probe: &P,
    placed: &mut Vec<PlacedClip>,
) -> Result<Video> {
    let mut video = Video::new(&config.video, rate);
    let frame = video.dimensions();
    let mut track = Track::new(&config.track, true, VIDEO_TRACK_TYPE, 1);
    let mut cursor: i64 = 0;

    for asset in footage {
        let name = file_name(&asset.path);
        let (width, height) = probe
            .dimensions(&asset.path)
            .with_context(|| format!("failed to read dimensions of {name}"))?;
        let source = Dimensions::new(width, height);

        let (frames, duration_source, label, alphatype, kind) = match asset.kind {
            AssetKind::Video => {
                let seconds = match probe.duration_seconds(&asset.path) {
                    Ok(seconds) => Some(seconds),
                    Err(error) => {
                        warn!(file = %name, %error, "failed to probe duration");
                        None
                    }
                };
                let (frames, source) = frames_or_fallback(&name, seconds, rate, config);
                (frames, source, VIDEO_LABEL, AlphaType::None, ClipKind::Video)
            }
            AssetKind::Image => (
                config.media.still_duration,
                DurationSource::Still,
                IMAGE_LABEL,
                AlphaType::Straight,
                ClipKind::Image,
            ),
        };

        let scale = fit_scale(source, frame);
        let length = frame_position(frames);
        let start = cursor;
        let end = start.saturating_add(length);

        let file_id = generate_id("file")?;
        let file = File::video(
            file_id.clone(),
            name.clone(),
            file_url(&asset.path),
            VIDEO_FILE_SAMPLE_RATE,
            VIDEO_FILE_CHANNELS,
            Some(source),
        );
        let clip = ClipItem::builder(generate_id("clipitem")?, file)
            .premiere_channel_type(CHANNEL_TYPE)
            .masterclipid(format!("masterclip-{file_id}"))
            .name(name.clone())
            .rate(rate)
            .duration(frames)
            .timeline(start, end)
            .source_range(0, length)
            .label(label)
            .alphatype(alphatype)
            .filter(Filter::basic_motion(scale))
            .build()
            .with_context(|| format!("invalid clip for {name}"))?;
        debug!(id = %clip.id, start, end, scale, "footage clip created");
        track.add_clipitem(clip);

        placed.push(PlacedClip {
            name,
            kind,
            start,
            end,
            duration_source,
            scale: Some(scale),
        });
        cursor = end;
    }

    video.add_track(track);
    Ok(video)
}

/// Convert probed seconds to frames, or fall back to the configured length.
fn frames_or_fallback(
    name: &str,
    seconds: Option<f64>,
    rate: Rate,
    config: &ProjectConfig,
) -> (u64, DurationSource) {
    match seconds.map(|seconds| rate.seconds_to_frames(seconds)) {
        Some(frames) if frames > 0 => {
            debug!(file = %name, frames, "duration probed");
            (frames, DurationSource::Probed)
        }
        _ => {
            warn!(
                file = %name,
                frames = config.media.fallback_duration,
                "no usable duration, using fallback"
            );
            (config.media.fallback_duration, DurationSource::Fallback)
        }
    }
}

/// Uniform scale (percent) that fits `source` inside `frame`.
pub fn fit_scale(source: Dimensions, frame: Dimensions) -> f64 {
    if source.width == 0 || source.height == 0 {
        return 100.0;
    }
    let horizontal = f64::from(frame.width) / f64::from(source.width);
    let vertical = f64::from(frame.height) / f64::from(source.height);
    horizontal.min(vertical) * 100.0
}

/// Read the script and log it; failures only warn.
fn log_script(path: &Path) -> Option<usize> {
    match extract_script_text(path) {
        Ok(text) => {
            let chars = text.chars().count();
            info!(file = %path.display(), chars, "extracted script");
            debug!(script = %text, "script text");
            Some(chars)
        }
        Err(error) => {
            warn!(%error, "failed to process script file");
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn frame_position(frames: u64) -> i64 {
    i64::try_from(frames).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale() {
        let frame = Dimensions::new(1280, 720);
        let scale = fit_scale(Dimensions::new(1920, 1080), frame);
        assert!((scale - 66.666_666).abs() < 1e-4);
        assert_eq!(fit_scale(Dimensions::new(640, 480), frame), 150.0);
        assert_eq!(fit_scale(Dimensions::new(1280, 720), frame), 100.0);
        assert_eq!(fit_scale(Dimensions::new(0, 720), frame), 100.0);
    }

    #[test]
    fn test_frames_or_fallback() {
        let config = ProjectConfig::default();
        let rate = Rate::new(30, true);
        assert_eq!(
            frames_or_fallback("a.mp3", Some(10.0), rate, &config),
            (300, DurationSource::Probed)
        );
        assert_eq!(
            frames_or_fallback("a.mp3", None, rate, &config),
            (4526, DurationSource::Fallback)
        );
        assert_eq!(
            frames_or_fallback("a.mp3", Some(0.0), rate, &config),
            (4526, DurationSource::Fallback)
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/a/b/voice.mp3")), "voice.mp3");
        assert_eq!(file_name(Path::new("/")), "");
    }
}
