//! Stream dimension probing via ffprobe

use crate::error::ProcessingError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;

/// Width and height of the first stream in a media file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub width: f64,
    pub height: f64,
}

#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<ProbeResult, ProcessingError>;
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<f64>,
    height: Option<f64>,
}

/// Reject tool paths carrying shell metacharacters or traversal sequences
pub(crate) fn validate_tool_path(tool: &'static str, path: &str) -> Result<(), ProcessingError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.is_empty() || path.chars().any(|c| dangerous_chars.contains(&c)) || path.contains("..")
    {
        return Err(ProcessingError::InvalidToolPath {
            tool,
            path: path.to_string(),
        });
    }
    Ok(())
}

pub struct FfprobeProber {
    ffprobe_path: String,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>) -> Result<Self, ProcessingError> {
        let ffprobe_path = ffprobe_path.into();
        validate_tool_path("ffprobe", &ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }
}

fn parse_first_stream(stdout: &[u8]) -> Result<ProbeResult, ProcessingError> {
    let output: FfprobeOutput =
        serde_json::from_slice(stdout).map_err(|e| ProcessingError::InvalidOutput {
            tool: "ffprobe",
            reason: e.to_string(),
        })?;

    let stream = output
        .streams
        .first()
        .ok_or_else(|| ProcessingError::InvalidOutput {
            tool: "ffprobe",
            reason: "no streams found".to_string(),
        })?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) => Ok(ProbeResult { width, height }),
        _ => Err(ProcessingError::InvalidOutput {
            tool: "ffprobe",
            reason: "first stream has no dimensions".to_string(),
        }),
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
    ))]
    async fn probe(&self, path: &Path) -> Result<ProbeResult, ProcessingError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn {
                tool: "ffprobe",
                source,
            })?;

        if !output.status.success() {
            return Err(ProcessingError::CommandFailed {
                tool: "ffprobe",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let result = parse_first_stream(&output.stdout)?;

        tracing::debug!(
            width = result.width,
            height = result.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ffprobe finished"
        );

        Ok(result)
    }
}
