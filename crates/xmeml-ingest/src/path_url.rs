//! `file://localhost` URLs for media paths.

use std::path::Path;

const URL_PREFIX: &str = "file://localhost";

/// Build the `pathurl` of an absolute media path.
///
/// Separators become `/` and each segment is percent-encoded, leaving only
/// the unreserved set (`A-Z a-z 0-9 - . _ ~`) as is.
pub fn file_url(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    let encoded = text
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");
    if encoded.starts_with('/') {
        format!("{URL_PREFIX}{encoded}")
    } else {
        format!("{URL_PREFIX}/{encoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path() {
        assert_eq!(
            file_url(Path::new("/projects/demo/audio/voice.mp3")),
            "file://localhost/projects/demo/audio/voice.mp3"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        assert_eq!(
            file_url(Path::new("/my media/take #2 & more.mov")),
            "file://localhost/my%20media/take%20%232%20%26%20more.mov"
        );
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        assert_eq!(
            file_url(Path::new("/voix/é.mp3")),
            "file://localhost/voix/%C3%A9.mp3"
        );
    }

    #[test]
    fn test_percent_and_plus_are_encoded() {
        assert_eq!(
            file_url(Path::new("/clips/100% take+1.mp4")),
            "file://localhost/clips/100%25%20take%2B1.mp4"
        );
    }

    #[test]
    fn test_drive_paths_get_a_leading_slash() {
        assert_eq!(
            file_url(Path::new("C:\\media\\a.mp4")),
            "file://localhost/C%3A/media/a.mp4"
        );
    }
}
