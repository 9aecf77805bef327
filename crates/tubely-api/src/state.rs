//! Application state shared by every handler.

use crate::auth::JwtAuth;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::FastStartPipeline;
use tubely_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    /// Local asset directory, holds thumbnails
    pub assets: Arc<dyn Storage>,
    /// Object store, holds videos
    pub objects: Arc<dyn Storage>,
    pub pipeline: Arc<FastStartPipeline>,
    pub jwt: JwtAuth,
}
