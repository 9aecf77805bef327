//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use crate::auth::JwtAuth;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::PgVideoRepository;
use tubely_processing::{FastStartPipeline, FfmpegRemuxer, FfprobeProber};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let assets = tubely_storage::create_asset_storage(&config)
        .await
        .context("Failed to initialize asset storage")?;
    let objects = tubely_storage::create_object_storage(&config)
        .context("Failed to initialize object storage")?;

    tokio::fs::create_dir_all(&config.temp_dir)
        .await
        .with_context(|| format!("Failed to create temp dir {}", config.temp_dir.display()))?;
    let prober = FfprobeProber::new(config.ffprobe_path.clone()).context("Invalid FFPROBE_PATH")?;
    let remuxer = FfmpegRemuxer::new(config.ffmpeg_path.clone()).context("Invalid FFMPEG_PATH")?;
    let pipeline = FastStartPipeline::new(
        Arc::new(prober),
        Arc::new(remuxer),
        config.temp_dir.clone(),
    );

    let state = Arc::new(AppState {
        jwt: JwtAuth::new(&config.jwt_secret),
        videos: Arc::new(PgVideoRepository::new(pool)),
        assets,
        objects,
        pipeline: Arc::new(pipeline),
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
