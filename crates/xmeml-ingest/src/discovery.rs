//! Project layout validation and asset discovery.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{IngestError, Result};

pub const FOOTAGE_DIR: &str = "footage";
pub const AUDIO_DIR: &str = "audio";
pub const SCRIPT_FILE: &str = "script.docx";

const AUDIO_EXTENSIONS: &[&str] = &["mp3"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff"];

/// What a footage file is placed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Video,
    Image,
}

impl AssetKind {
    /// Classify by extension (case-insensitive). `None` for unsupported files.
    pub fn from_path(path: &Path) -> Option<Self> {
        if has_extension(path, VIDEO_EXTENSIONS) {
            Some(Self::Video)
        } else if has_extension(path, IMAGE_EXTENSIONS) {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// A footage file and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootageAsset {
    pub path: PathBuf,
    pub kind: AssetKind,
}

/// A validated project directory.
///
/// All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub footage_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub script_path: PathBuf,
}

impl ProjectLayout {
    /// Check that `root` holds `footage/`, `audio/` and `script.docx`.
    ///
    /// # Errors
    ///
    /// Returns the first missing input as [`IngestError::ProjectNotFound`],
    /// [`IngestError::DirectoryNotFound`] or [`IngestError::FileNotFound`].
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(IngestError::ProjectNotFound {
                path: root.to_path_buf(),
            });
        }
        let root = std::path::absolute(root).map_err(|source| IngestError::DirectoryRead {
            path: root.to_path_buf(),
            source,
        })?;

        let footage_dir = root.join(FOOTAGE_DIR);
        if !footage_dir.is_dir() {
            return Err(IngestError::DirectoryNotFound { path: footage_dir });
        }
        let audio_dir = root.join(AUDIO_DIR);
        if !audio_dir.is_dir() {
            return Err(IngestError::DirectoryNotFound { path: audio_dir });
        }
        let script_path = root.join(SCRIPT_FILE);
        if !script_path.is_file() {
            return Err(IngestError::FileNotFound { path: script_path });
        }

        debug!(root = %root.display(), "project layout validated");
        Ok(Self {
            root,
            footage_dir,
            audio_dir,
            script_path,
        })
    }

    /// All `.mp3` files in the audio directory, sorted by file name.
    pub fn audio_files(&self) -> Result<Vec<PathBuf>> {
        list_files_with_extensions(&self.audio_dir, AUDIO_EXTENSIONS)
    }

    /// The voiceover: the first `.mp3` by file name, if any.
    pub fn voiceover(&self) -> Result<Option<PathBuf>> {
        let mut files = self.audio_files()?;
        if files.is_empty() {
            warn!(dir = %self.audio_dir.display(), "no mp3 files found");
            return Ok(None);
        }
        if files.len() > 1 {
            debug!(count = files.len(), "using the first mp3 as voiceover");
        }
        Ok(Some(files.swap_remove(0)))
    }

    /// Video and image files in the footage directory, sorted by file name.
    ///
    /// Unsupported files are skipped.
    pub fn footage(&self) -> Result<Vec<FootageAsset>> {
        let mut assets = Vec::new();
        for path in list_files(&self.footage_dir)? {
            match AssetKind::from_path(&path) {
                Some(kind) => assets.push(FootageAsset { path, kind }),
                None => debug!(path = %path.display(), "skipping unsupported footage file"),
            }
        }
        if assets.is_empty() {
            warn!(dir = %self.footage_dir.display(), "no footage files found");
        }
        Ok(assets)
    }
}

/// Lists files in `dir` whose extension is one of `extensions`
/// (case-insensitive), sorted by file name.
pub fn list_files_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = list_files(dir)?;
    files.retain(|path| has_extension(path, extensions));
    Ok(files)
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kind_from_extension() {
        assert_eq!(AssetKind::from_path(Path::new("a/clip.MOV")), Some(AssetKind::Video));
        assert_eq!(AssetKind::from_path(Path::new("still.jpeg")), Some(AssetKind::Image));
        assert_eq!(AssetKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(AssetKind::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_has_extension_is_case_insensitive() {
        assert!(has_extension(Path::new("VOICE.MP3"), AUDIO_EXTENSIONS));
        assert!(!has_extension(Path::new("voice.mp3.bak"), AUDIO_EXTENSIONS));
    }
}
