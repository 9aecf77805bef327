//! Fast-start preparation pipeline
//!
//! Probe the uploaded file, classify its shape, then remux it into a second
//! scoped temp file. Every temp file is a `TempPath`, so it is deleted when
//! dropped on both the success and the error path.

use crate::aspect::{classify, AspectCategory};
use crate::error::ProcessingError;
use crate::probe::MediaProber;
use crate::remux::Remuxer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;

/// A remuxed video ready for upload.
#[derive(Debug)]
pub struct PreparedVideo {
    pub category: AspectCategory,
    /// Deleted when this value is dropped
    pub path: TempPath,
}

pub struct FastStartPipeline {
    prober: Arc<dyn MediaProber>,
    remuxer: Arc<dyn Remuxer>,
    temp_dir: PathBuf,
}

impl FastStartPipeline {
    pub fn new(
        prober: Arc<dyn MediaProber>,
        remuxer: Arc<dyn Remuxer>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            prober,
            remuxer,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    #[tracing::instrument(skip(self))]
    pub async fn prepare(&self, source: &Path) -> Result<PreparedVideo, ProcessingError> {
        let probe = self.prober.probe(source).await?;
        let category = classify(probe.width, probe.height)?;

        let output = tempfile::Builder::new()
            .prefix("tubely-faststart-")
            .suffix(".mp4")
            .tempfile_in(&self.temp_dir)?
            .into_temp_path();

        self.remuxer.faststart(source, &output).await?;

        tracing::info!(
            category = %category,
            width = probe.width,
            height = probe.height,
            "Video prepared for fast-start playback"
        );

        Ok(PreparedVideo {
            category,
            path: output,
        })
    }
}
