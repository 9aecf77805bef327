//! Thumbnail upload handler

use super::{load_owned_video, parse_video_id};
use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::read_form_file;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tubely_core::{AppError, Video};
use tubely_processing::{validate_media_type, MediaPolicy};
use tubely_storage::keys::thumbnail_file_name;

pub const THUMBNAIL_FIELD: &str = "thumbnail";

#[utoipa::path(
    post,
    path = "/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail stored", body = Video),
        (status = 400, description = "Invalid ID, missing field or unsupported type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    auth: Result<AuthUser, HttpAppError>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let start = Instant::now();
    let video_id = parse_video_id(&video_id)?;
    let user = auth?;
    let mut video = load_owned_video(&state.videos, video_id, &user).await?;
    let mut multipart = multipart?;

    let (accepted, data) = read_form_file(
        &mut multipart,
        THUMBNAIL_FIELD,
        state.config.max_thumbnail_bytes,
        |content_type| {
            validate_media_type(content_type, MediaPolicy::Thumbnail)
                .map_err(|e| AppError::BadRequest(e.to_string()))
        },
    )
    .await?;

    let size_bytes = data.len();
    let file_name = thumbnail_file_name(accepted.extension);
    let url = state
        .assets
        .upload_with_key(&file_name, data, accepted.essence)
        .await?;

    video.thumbnail_url = Some(url);
    video.updated_at = Utc::now();
    state.videos.update_video(&video).await?;

    tracing::info!(
        video_id = %video.id,
        user_id = %user.user_id,
        key = %file_name,
        content_type = accepted.essence,
        size_bytes,
        duration_ms = start.elapsed().as_millis() as u64,
        "Thumbnail uploaded"
    );

    Ok(Json(video))
}
