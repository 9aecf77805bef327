//! Media type validation for uploaded form files
//!
//! The declared `Content-Type` of a multipart part is parsed, its parameters
//! dropped, and the essence checked against a per-flow allow list.

use mime::Mime;

/// Which upload flow is validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPolicy {
    /// `image/jpeg` and `image/png`
    Thumbnail,
    /// `video/mp4` only
    Video,
}

impl MediaPolicy {
    fn allowed(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            MediaPolicy::Thumbnail => &[("image/jpeg", "jpg"), ("image/png", "png")],
            MediaPolicy::Video => &[("video/mp4", "mp4")],
        }
    }
}

/// A content type that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMediaType {
    /// Normalized essence, e.g. `image/png`
    pub essence: &'static str,
    /// File extension without the leading dot
    pub extension: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaTypeError {
    #[error("Malformed content type: {0:?}")]
    Malformed(String),

    #[error("Unsupported media type: {0}")]
    Unsupported(String),
}

/// Validate a declared content type against `policy`.
pub fn validate_media_type(
    content_type: &str,
    policy: MediaPolicy,
) -> Result<AcceptedMediaType, MediaTypeError> {
    let parsed: Mime = content_type
        .trim()
        .parse()
        .map_err(|_| MediaTypeError::Malformed(content_type.to_string()))?;

    let essence = parsed.essence_str().to_ascii_lowercase();
    policy
        .allowed()
        .iter()
        .find(|(allowed, _)| *allowed == essence)
        .map(|&(essence, extension)| AcceptedMediaType { essence, extension })
        .ok_or(MediaTypeError::Unsupported(essence))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_types() {
        let jpeg = validate_media_type("image/jpeg", MediaPolicy::Thumbnail).unwrap();
        assert_eq!(jpeg.extension, "jpg");
        assert_eq!(jpeg.essence, "image/jpeg");

        let png = validate_media_type("image/png", MediaPolicy::Thumbnail).unwrap();
        assert_eq!(png.extension, "png");
    }

    #[test]
    fn test_parameters_are_ignored() {
        let accepted =
            validate_media_type("Image/PNG; charset=binary", MediaPolicy::Thumbnail).unwrap();
        assert_eq!(accepted.extension, "png");

        let video = validate_media_type("video/mp4; codecs=\"avc1\"", MediaPolicy::Video).unwrap();
        assert_eq!(video.essence, "video/mp4");
    }

    #[test]
    fn test_unsupported_types() {
        assert_eq!(
            validate_media_type("image/gif", MediaPolicy::Thumbnail),
            Err(MediaTypeError::Unsupported("image/gif".to_string()))
        );
        assert!(matches!(
            validate_media_type("video/mp4", MediaPolicy::Thumbnail),
            Err(MediaTypeError::Unsupported(_))
        ));
        assert!(matches!(
            validate_media_type("video/quicktime", MediaPolicy::Video),
            Err(MediaTypeError::Unsupported(_))
        ));
        assert!(matches!(
            validate_media_type("image/jpeg", MediaPolicy::Video),
            Err(MediaTypeError::Unsupported(_))
        ));
    }

    #[test]
    fn test_malformed_types() {
        assert!(matches!(
            validate_media_type("not a mime", MediaPolicy::Thumbnail),
            Err(MediaTypeError::Malformed(_))
        ));
        assert!(matches!(
            validate_media_type("", MediaPolicy::Video),
            Err(MediaTypeError::Malformed(_))
        ));
    }
}
