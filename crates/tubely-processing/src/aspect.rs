//! Aspect ratio classification
//!
//! Videos are namespaced in object storage by the shape of their first stream.
//! Only 16:9 and 9:16 get their own category; everything else is `other`.

use std::fmt::{Display, Formatter, Result as FmtResult};

const LANDSCAPE_RATIO: f64 = 16.0 / 9.0;
const PORTRAIT_RATIO: f64 = 9.0 / 16.0;
const TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectCategory {
    Landscape,
    Portrait,
    Other,
}

impl AspectCategory {
    /// Storage path prefix for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectCategory::Landscape => "landscape",
            AspectCategory::Portrait => "portrait",
            AspectCategory::Other => "other",
        }
    }
}

impl Display for AspectCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AspectError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

/// Classify a width/height pair.
///
/// Both bounds of each tolerance window are exclusive, and the landscape
/// window is checked first.
pub fn classify(width: f64, height: f64) -> Result<AspectCategory, AspectError> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(AspectError::InvalidDimensions { width, height });
    }

    let ratio = width / height;
    if ratio > LANDSCAPE_RATIO - TOLERANCE && ratio < LANDSCAPE_RATIO + TOLERANCE {
        Ok(AspectCategory::Landscape)
    } else if ratio > PORTRAIT_RATIO - TOLERANCE && ratio < PORTRAIT_RATIO + TOLERANCE {
        Ok(AspectCategory::Portrait)
    } else {
        Ok(AspectCategory::Other)
    }
}
