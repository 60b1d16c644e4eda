//! HTTP request handlers for the preview service
//!
//! Each request mounts its own resolver, waits for it to settle and drops it.
//! Preview failures are not HTTP failures: a failed preview is still a `200`
//! with the reason in the `error` field.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::card::{card_image, Category, BROKEN_IMAGE_FALLBACK};
use crate::model::{CardParams, CardResponse, PreviewParams};
use crate::resolver::PreviewResolver;
use crate::source::MetadataSource;
use crate::state::AppState;

/// Liveness probe
///
/// # Response
///
/// ```json
/// { "status": "ok" }
/// ```
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Resolves the preview for a single URL
///
/// # Example Request
///
/// `GET /api/preview?url=https%3A%2F%2Fexample.com`
///
/// # Response
///
/// - **200 OK** - Settled preview state, successful or not
/// - **400 Bad Request** - `url` missing or empty
pub async fn get_preview<S: MetadataSource>(
    State(state): State<AppState<S>>,
    Query(params): Query<PreviewParams>,
) -> Response {
    let Some(url) = params.url.filter(|u| !u.is_empty()) else {
        return missing_url();
    };

    let resolver = PreviewResolver::new(state.source.clone(), url);
    let preview = resolver.settled().await;

    Json(preview).into_response()
}

/// Resolves a preview and picks the image a feed card should show
///
/// # Example Request
///
/// `GET /api/preview/card?url=https%3A%2F%2Fexample.com&category=scholarship`
///
/// # Response
///
/// ```json
/// {
///   "preview": { "url": "https://example.com", "loading": false, ... },
///   "image": "/images/homepage/IMG_9920.JPG",
///   "fallback_image": "/images/homepage/IMG_9921.jpg",
///   "category": "scholarship",
///   "fetched_at": "2026-01-17T13:40:00Z"
/// }
/// ```
pub async fn get_card<S: MetadataSource>(
    State(state): State<AppState<S>>,
    Query(params): Query<CardParams>,
) -> Response {
    let Some(url) = params.url.filter(|u| !u.is_empty()) else {
        return missing_url();
    };

    let category = params
        .category
        .as_deref()
        .map(Category::parse_lossy)
        .unwrap_or_default();

    let resolver = PreviewResolver::new(state.source.clone(), url);
    let preview = resolver.settled().await;

    let image = card_image(&preview, params.image.as_deref(), category).to_string();
    debug!(url = %preview.url, %image, ?category, "card image selected");

    Json(CardResponse {
        preview,
        image,
        fallback_image: BROKEN_IMAGE_FALLBACK.to_string(),
        category,
        fetched_at: Utc::now(),
    })
    .into_response()
}

fn missing_url() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Query parameter `url` is required",
            "code": "missing_url"
        })),
    )
        .into_response()
}
