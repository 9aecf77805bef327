//! Video upload handler
//!
//! The upload is spooled to disk, probed for its aspect ratio, remuxed for
//! fast-start playback, then stored under `<category>/<hex>.mp4` in the object
//! store. Both temp files are scoped and removed when the request ends.

use super::{load_owned_video, parse_video_id};
use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::spool_form_file;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tubely_core::AppError;
use tubely_processing::{validate_media_type, MediaPolicy, MediaTypeError};
use tubely_storage::keys::{video_file_name, video_object_key};

pub const VIDEO_FIELD: &str = "video";

#[utoipa::path(
    post,
    path = "/videos/{video_id}/video",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video stored, empty body"),
        (status = 400, description = "Invalid ID, missing field or malformed content type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not an MP4 video", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    auth: Result<AuthUser, HttpAppError>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, HttpAppError> {
    let start = Instant::now();
    let video_id = parse_video_id(&video_id)?;
    let user = auth?;
    let mut video = load_owned_video(&state.videos, video_id, &user).await?;
    let mut multipart = multipart?;

    let upload = spool_form_file(
        &mut multipart,
        VIDEO_FIELD,
        state.pipeline.temp_dir(),
        state.config.max_video_bytes,
        |content_type| {
            validate_media_type(content_type, MediaPolicy::Video).map_err(|e| match e {
                MediaTypeError::Malformed(_) => AppError::BadRequest(e.to_string()),
                MediaTypeError::Unsupported(_) => AppError::UnsupportedMediaType(e.to_string()),
            })
        },
    )
    .await?;

    let prepared = state.pipeline.prepare(&upload.path).await?;

    let key = video_object_key(prepared.category.as_str(), &video_file_name());
    let url = state
        .objects
        .upload_file(&key, &prepared.path, upload.accepted.essence)
        .await?;

    video.video_url = Some(url);
    video.updated_at = Utc::now();
    state.videos.update_video(&video).await?;

    tracing::info!(
        video_id = %video.id,
        user_id = %user.user_id,
        key = %key,
        category = %prepared.category,
        size_bytes = upload.size_bytes,
        duration_ms = start.elapsed().as_millis() as u64,
        "Video uploaded"
    );

    Ok(StatusCode::OK)
}
