//! Error types for project ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a project directory.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Missing input ===
    /// The project root does not exist or is not a directory.
    #[error("project directory not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// A required subdirectory is missing.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A required file is missing.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    // === File system ===
    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Script document ===
    /// Failed to open or read the script document.
    #[error("failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script is not a readable zip archive or lacks its body part.
    #[error("invalid script archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The script body is not well-formed XML.
    #[error("malformed script body in {path}: {source}")]
    ScriptXml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },
}

/// Errors raised by a media probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probe executable could not be started.
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe ran but reported failure.
    #[error("probe failed for {path} ({status}): {stderr}")]
    Failed {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    /// The probe output was not the expected JSON.
    #[error("unreadable probe output for {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file has no video stream.
    #[error("no video stream in {path}")]
    NoVideoStream { path: PathBuf },

    /// The video stream does not report width and height.
    #[error("video stream in {path} has no dimensions")]
    MissingDimensions { path: PathBuf },

    /// Neither the container nor any stream reports a duration.
    #[error("no duration reported for {path}")]
    MissingDuration { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
