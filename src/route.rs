//! Route definitions for the preview service
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::handler::{get_card, get_preview, health};
use crate::middleware::auth_middleware;
use crate::source::MetadataSource;
use crate::state::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /health` - Liveness probe (public endpoint)
/// - `GET /api/preview` - Settled preview for `?url=`
/// - `GET /api/preview/card` - Preview plus the card image to display
///
/// Routes under `/api` pass through [`auth_middleware`].
///
/// # Example Usage
///
/// ```no_run
/// # use link_preview::{route::create_app, source::MicrolinkSource, state::AppState};
/// let source = MicrolinkSource::new("https://api.microlink.io/").unwrap();
/// let app = create_app(AppState::new(source));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app<S: MetadataSource>(state: AppState<S>) -> Router {
    let api_routes = Router::new()
        .route("/preview", get(get_preview::<S>))
        .route("/preview/card", get(get_card::<S>))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware::<S>));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(state)
}
