//! Tests for the reqwest-backed metadata source
//!
//! A local axum server stands in for the metadata extraction service.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use link_preview::{MetadataSource, MicrolinkSource, PreviewError, PreviewResolver};

async fn fake_service(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let url = params.get("url").cloned().unwrap_or_default();

    match url.as_str() {
        "https://full.test/" => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {
                    "title": "Full",
                    "description": "Everything present",
                    "image": { "url": "https://full.test/og.png" },
                    "logo": { "url": "https://full.test/logo.png" }
                }
            })),
        )
            .into_response(),
        "https://partial.test/" => (
            StatusCode::OK,
            Json(json!({ "status": "success", "data": { "title": "X" } })),
        )
            .into_response(),
        "https://refused.test/" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "fail", "message": "unable to reach target" })),
        )
            .into_response(),
        "https://error.test/" => (StatusCode::OK, Json(json!({ "status": "error" }))).into_response(),
        "https://garbage.test/" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "https://broken-success.test/" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "success", "data": {} })),
        )
            .into_response(),
        // Echo the decoded target back so encoding can be checked
        other => (
            StatusCode::OK,
            Json(json!({ "status": "success", "data": { "title": other } })),
        )
            .into_response(),
    }
}

/// Starts the fake service and returns its base URL
async fn spawn_service() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, Router::new().route("/", get(fake_service)))
            .await
            .unwrap();
    });

    format!("http://{addr}/")
}

/// Address nothing is listening on
async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

#[tokio::test]
async fn test_fetch_full_payload() {
    let source = MicrolinkSource::new(spawn_service().await).unwrap();

    let metadata = source.fetch("https://full.test/").await.unwrap();
    assert_eq!(metadata.title, "Full");
    assert_eq!(metadata.description, "Everything present");
    assert_eq!(metadata.image, "https://full.test/og.png");
    assert_eq!(metadata.favicon, "https://full.test/logo.png");
}

#[tokio::test]
async fn test_fetch_partial_payload_defaults_to_empty() {
    let source = MicrolinkSource::new(spawn_service().await).unwrap();

    let metadata = source.fetch("https://partial.test/").await.unwrap();
    assert_eq!(metadata.title, "X");
    assert_eq!(metadata.description, "");
    assert_eq!(metadata.image, "");
    assert_eq!(metadata.favicon, "");
}

#[tokio::test]
async fn test_target_url_is_percent_encoded() {
    let source = MicrolinkSource::new(spawn_service().await).unwrap();
    let target = "https://echo.test/path?a=1&b=two words#frag";

    let metadata = source.fetch(target).await.unwrap();
    assert_eq!(metadata.title, target);
}

#[tokio::test]
async fn test_non_success_status_is_service_failure() {
    let source = MicrolinkSource::new(spawn_service().await).unwrap();

    assert_eq!(
        source.fetch("https://error.test/").await,
        Err(PreviewError::ServiceReportedFailure)
    );
    assert_eq!(
        source.fetch("https://refused.test/").await,
        Err(PreviewError::ServiceReportedFailure)
    );
}

#[tokio::test]
async fn test_malformed_body_is_transport_failure() {
    let source = MicrolinkSource::new(spawn_service().await).unwrap();

    assert_eq!(
        source.fetch("https://garbage.test/").await,
        Err(PreviewError::TransportOrParseFailure)
    );
    assert_eq!(
        source.fetch("https://broken-success.test/").await,
        Err(PreviewError::TransportOrParseFailure)
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let addr = closed_address().await;
    let source = MicrolinkSource::new(format!("http://{addr}/")).unwrap();

    assert_eq!(
        source.fetch("https://full.test/").await,
        Err(PreviewError::TransportOrParseFailure)
    );
}

#[tokio::test]
async fn test_resolver_over_http_source() {
    let source = MicrolinkSource::new(spawn_service().await).unwrap();

    let resolver = PreviewResolver::new(source, "https://full.test/");
    let state = resolver.settled().await;
    assert_eq!(state.title, "Full");
    assert!(!state.loading);

    resolver.set_url("https://error.test/");
    assert!(resolver.state().loading);

    let state = resolver.settled().await;
    assert_eq!(state.url, "https://error.test/");
    assert_eq!(state.title, "");
    assert_eq!(state.error.as_deref(), Some("Failed to fetch preview"));
}

#[tokio::test]
async fn test_resolver_connection_refused() {
    let addr = closed_address().await;
    let source = MicrolinkSource::new(format!("http://{addr}/")).unwrap();

    let resolver = PreviewResolver::new(source, "https://full.test/");
    let state = resolver.settled().await;

    assert_eq!(state.error.as_deref(), Some("Error fetching preview"));
    assert_eq!(state.image, "");
    assert!(!state.loading);
}
