//! Multipart form file extraction
//!
//! Both upload flows read exactly one named file part. The declared content
//! type is checked before any bytes are consumed, so a rejected upload never
//! touches the disk. A part that grows past `max_bytes` is abandoned with 413.

use crate::error::multipart_error;
use axum::extract::Multipart;
use bytes::{Bytes, BytesMut};
use std::path::Path;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;

/// A form file spooled to a scoped temp file.
#[derive(Debug)]
pub struct SpooledFile<A> {
    pub accepted: A,
    /// Deleted when dropped
    pub path: TempPath,
    pub size_bytes: u64,
}

/// Read the part named `name` fully into memory.
///
/// `check` receives the part's declared content type (empty when absent) and
/// decides whether the part is accepted.
pub async fn read_form_file<A, F>(
    multipart: &mut Multipart,
    name: &str,
    max_bytes: usize,
    check: F,
) -> Result<(A, Bytes), AppError>
where
    F: FnOnce(&str) -> Result<A, AppError>,
{
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(name) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let accepted = check(&content_type)?;

        let mut data = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if data.len() + chunk.len() > max_bytes {
                return Err(file_too_large(name, max_bytes));
            }
            data.extend_from_slice(&chunk);
        }
        return Ok((accepted, data.freeze()));
    }

    Err(missing_field(name))
}

/// Stream the part named `name` into a temp file under `temp_dir`.
///
/// The temp file is removed if reading fails part way through.
pub async fn spool_form_file<A, F>(
    multipart: &mut Multipart,
    name: &str,
    temp_dir: &Path,
    max_bytes: usize,
    check: F,
) -> Result<SpooledFile<A>, AppError>
where
    F: FnOnce(&str) -> Result<A, AppError>,
{
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(name) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let accepted = check(&content_type)?;

        let (file, path) = tempfile::Builder::new()
            .prefix("tubely-upload-")
            .suffix(".mp4")
            .tempfile_in(temp_dir)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut size_bytes: u64 = 0;
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            size_bytes += chunk.len() as u64;
            if size_bytes > max_bytes as u64 {
                return Err(file_too_large(name, max_bytes));
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        tracing::debug!(
            path = %path.display(),
            size_bytes,
            "Form file spooled to disk"
        );

        return Ok(SpooledFile {
            accepted,
            path,
            size_bytes,
        });
    }

    Err(missing_field(name))
}

fn file_too_large(name: &str, max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "Form field '{}' exceeds the {} byte limit",
        name, max_bytes
    ))
}

fn missing_field(name: &str) -> AppError {
    AppError::BadRequest(format!("Couldn't find form field '{}'", name))
}
