//! Input boundary of the generator.
//!
//! A project directory holds `footage/`, `audio/` and `script.docx`. This
//! crate validates that layout, lists its assets, probes media metadata and
//! extracts the script's plain text. It knows nothing about the XML model.

pub mod discovery;
pub mod error;
pub mod path_url;
pub mod probe;
pub mod script;

pub use discovery::{
    AUDIO_DIR, AssetKind, FOOTAGE_DIR, FootageAsset, ProjectLayout, SCRIPT_FILE,
    list_files_with_extensions,
};
pub use error::{IngestError, ProbeError, Result};
pub use path_url::file_url;
pub use probe::{FfprobeProbe, MediaInfo, MediaProbe, parse_probe_output};
pub use script::extract_script_text;
