//! Tubely Processing Library
//!
//! Pure classification and validation of uploaded media, plus the external
//! tool collaborators (ffprobe, ffmpeg) that prepare a video for fast-start
//! playback before it is stored.

pub mod aspect;
pub mod error;
pub mod pipeline;
pub mod probe;
pub mod remux;
pub mod validator;

pub use aspect::{classify, AspectCategory, AspectError};
pub use error::ProcessingError;
pub use pipeline::{FastStartPipeline, PreparedVideo};
pub use probe::{FfprobeProber, MediaProber, ProbeResult};
pub use remux::{FfmpegRemuxer, Remuxer};
pub use validator::{validate_media_type, AcceptedMediaType, MediaPolicy, MediaTypeError};
