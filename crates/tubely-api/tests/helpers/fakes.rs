//! In-process stand-ins for the database and the ffmpeg tools.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use bytes::Bytes;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tubely_core::{AppError, Video};
use tubely_db::VideoRepository;
use tubely_processing::{MediaProber, ProbeResult, ProcessingError, Remuxer};
use tubely_storage::{Storage, StorageError, StorageResult};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryVideos {
    videos: Mutex<HashMap<Uuid, Video>>,
    fail_updates: AtomicBool,
}

impl InMemoryVideos {
    pub fn insert_draft(&self, user_id: Uuid) -> Video {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: "Boots".to_string(),
            description: Some("A pair of boots".to_string()),
            thumbnail_url: None,
            video_url: None,
            user_id,
        };
        self.videos
            .lock()
            .unwrap()
            .insert(video.id, video.clone());
        video
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }

    /// Make every later `update_video` fail as if the pool were closed
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideos {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.get(id))
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        let mut videos = self.videos.lock().unwrap();
        match videos.get_mut(&video.id) {
            Some(stored) => {
                *stored = video.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Couldn't find video".to_string())),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Reports fixed dimensions for every file
pub struct FixedProber {
    pub width: f64,
    pub height: f64,
}

#[async_trait]
impl MediaProber for FixedProber {
    async fn probe(&self, _path: &Path) -> Result<ProbeResult, ProcessingError> {
        Ok(ProbeResult {
            width: self.width,
            height: self.height,
        })
    }
}

/// Copies the input unchanged
pub struct CopyRemuxer;

#[async_trait]
impl Remuxer for CopyRemuxer {
    async fn faststart(&self, input: &Path, output: &Path) -> Result<(), ProcessingError> {
        tokio::fs::copy(input, output).await?;
        Ok(())
    }
}

/// Refuses every upload
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload_with_key(
        &self,
        _storage_key: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> StorageResult<String> {
        Err(StorageError::UploadFailed("bucket unavailable".to_string()))
    }

    async fn upload_file(
        &self,
        _storage_key: &str,
        _source: &Path,
        _content_type: &str,
    ) -> StorageResult<String> {
        Err(StorageError::UploadFailed("bucket unavailable".to_string()))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("https://unavailable.example/{}", storage_key)
    }
}
