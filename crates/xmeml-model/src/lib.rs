//! XMEML (Final Cut Pro XML interchange) project model.
//!
//! The model is a single-owner tree:
//!
//! ```text
//! Project → Sequence → Media → Video / Audio → Track → ClipItem → File / Filter / Link
//! ```
//!
//! Every node implements [`ToXml`] and writes its own fragment in the exact
//! child order the target schema expects; parents embed children's fragments
//! at fixed positions. [`Project::save_to_file`] prepends the XML declaration
//! and doctype to the indented tree.
//!
//! # Example
//!
//! ```ignore
//! use xmeml_model::{Audio, ClipItem, File, Project, ProjectConfig, Sequence, Track, generate_id};
//!
//! let config = ProjectConfig::default();
//! let file = File::audio(generate_id("file")?, "voice.mp3", "file://localhost/voice.mp3", 44100, 2);
//! let clip = ClipItem::builder(generate_id("clipitem")?, file)
//!     .masterclipid("masterclip-1")
//!     .name("voice.mp3")
//!     .rate(config.sequence_rate())
//!     .duration(300)
//!     .timeline(0, 300)
//!     .source_range(0, 300)
//!     .build()?;
//! let mut track = Track::new(&config.track, true, "Stereo", 1);
//! track.add_clipitem(clip);
//! ```

#![deny(unsafe_code)]

mod audio;
mod clipitem;
pub mod config;
mod effect;
mod error;
mod file;
pub mod ids;
mod link;
mod logging_info;
mod media;
mod project;
mod sequence;
mod timecode;
mod track;
mod types;
mod video;
mod xml;

pub use audio::{Audio, OutputGroup};
pub use clipitem::{ClipItem, ClipItemBuilder, SourceTrack};
pub use config::{
    AudioConfig, LoggingConfig, MediaConfig, OutputGroupConfig, ProjectConfig, SequenceConfig,
    TrackConfig, VideoConfig,
};
pub use effect::{DEFAULT_AUTHORING_APP, Filter, Parameter};
pub use error::{ModelError, Result};
pub use file::File;
pub use ids::{ElementType, IdCounter, generate_id, generate_sequential_id};
pub use link::Link;
pub use logging_info::LoggingInfo;
pub use media::Media;
pub use project::{DEFAULT_DOCTYPE, DEFAULT_VERSION, Project, XML_DECLARATION};
pub use sequence::Sequence;
pub use timecode::Timecode;
pub use track::{TARGETED_ATTRIBUTE, TRACK_TYPE_ATTRIBUTE, Track};
pub use types::{
    AlphaType, Attributes, Dimensions, DisplayFormat, MediaType, PPRO_TICKS_PER_SECOND, Rate,
};
pub use video::Video;
pub use xml::{INDENT_SIZE, ToXml};
