use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};
use tubely_core::AppError;

/// Refuses a request whose declared `Content-Length` is over `limit` before
/// the handler reads any of the body.
///
/// Bodies without a declared length pass through and are bounded while they
/// stream.
pub async fn content_length_limit_middleware(
    State(limit): State<usize>,
    request: Request,
    next: Next,
) -> Result<Response, HttpAppError> {
    let declared = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    if let Some(length) = declared {
        if length > limit as u64 {
            tracing::debug!(length, limit, "Request body over declared limit");
            return Err(AppError::PayloadTooLarge(format!(
                "Request body of {} bytes exceeds the {} byte limit",
                length, limit
            ))
            .into());
        }
    }

    Ok(next.run(request).await)
}
