use crate::error::DetailedError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Swaps error bodies for their detailed form when `expose` is set.
///
/// Only errors that attached a `DetailedError` are affected, so sensitive
/// errors stay redacted either way.
pub async fn error_details_middleware(
    State(expose): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !expose {
        return response;
    }

    match response.extensions().get::<DetailedError>().cloned() {
        Some(DetailedError(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}
