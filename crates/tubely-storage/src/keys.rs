//! Shared key generation for storage backends.
//!
//! Names are drawn from the thread-local CSPRNG so they are unguessable and
//! never derived from user input.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

const THUMBNAIL_NAME_BYTES: usize = 32;
const VIDEO_NAME_BYTES: usize = 16;

/// `<base64url(32 random bytes)>.<extension>`, e.g. `Xb3...q0.png`
pub fn thumbnail_file_name(extension: &str) -> String {
    let bytes: [u8; THUMBNAIL_NAME_BYTES] = rand::random();
    format!("{}.{}", URL_SAFE_NO_PAD.encode(bytes), extension)
}

/// `<hex(16 random bytes)>.mp4`
pub fn video_file_name() -> String {
    let bytes: [u8; VIDEO_NAME_BYTES] = rand::random();
    format!("{}.mp4", hex::encode(bytes))
}

/// Object key for a video: `<category>/<file name>`
pub fn video_object_key(category: &str, file_name: &str) -> String {
    format!("{}/{}", category, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_file_name_shape() {
        let name = thumbnail_file_name("png");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "png");
        // 32 bytes -> 43 unpadded base64 characters
        assert_eq!(stem.len(), 43);
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_video_file_name_shape() {
        let name = video_file_name();
        assert_eq!(name.len(), 32 + ".mp4".len());
        assert!(name.ends_with(".mp4"));
        assert!(name[..32].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_names_are_unique() {
        assert_ne!(video_file_name(), video_file_name());
        assert_ne!(thumbnail_file_name("jpg"), thumbnail_file_name("jpg"));
    }

    #[test]
    fn test_video_object_key() {
        assert_eq!(
            video_object_key("landscape", "abc.mp4"),
            "landscape/abc.mp4"
        );
    }
}
