pub mod health;
pub mod thumbnail_upload;
pub mod video_upload;

use crate::auth::AuthUser;
use std::sync::Arc;
use tubely_core::{AppError, Video};
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Parse the `{video_id}` path segment.
pub(crate) fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid ID".to_string()))
}

/// Load a video and check that `user` owns it.
pub(crate) async fn load_owned_video(
    videos: &Arc<dyn VideoRepository>,
    video_id: Uuid,
    user: &AuthUser,
) -> Result<Video, AppError> {
    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user.user_id) {
        tracing::warn!(
            video_id = %video_id,
            user_id = %user.user_id,
            owner_id = %video.user_id,
            "Upload attempted by non-owner"
        );
        return Err(AppError::Forbidden("Not authorized to update this video".to_string()));
    }

    Ok(video)
}
