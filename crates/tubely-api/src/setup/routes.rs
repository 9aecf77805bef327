//! Router assembly

use crate::handlers::{health, thumbnail_upload, video_upload};
use crate::middleware::{content_length_limit_middleware, error_details_middleware};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;

/// Room allowed on top of a file limit for multipart boundaries, part headers
/// and small form fields. The file itself is held to the exact limit.
pub const FORM_FRAMING_BYTES: usize = 16 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let thumbnail_limit = config.max_thumbnail_bytes.saturating_add(FORM_FRAMING_BYTES);
    let thumbnail_route = post(thumbnail_upload::upload_thumbnail)
        .layer(DefaultBodyLimit::max(thumbnail_limit));

    // A declared length over the limit is refused before any byte reaches the temp dir
    let video_limit = config.max_video_bytes.saturating_add(FORM_FRAMING_BYTES);
    let video_route = post(video_upload::upload_video)
        .layer::<_, Infallible>(DefaultBodyLimit::max(video_limit))
        .layer(axum::middleware::from_fn_with_state(
            video_limit,
            content_length_limit_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .route("/videos/{video_id}/thumbnail", thumbnail_route)
        .route("/videos/{video_id}/video", video_route)
        .nest_service("/assets", ServeDir::new(&config.assets_root))
        .layer(axum::middleware::from_fn_with_state(
            !config.is_production(),
            error_details_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
