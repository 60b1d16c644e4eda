use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::source::MetadataSource;
use crate::state::AppState;

/// Middleware to check for Authorization header
///
/// When the state carries an authorization token, the request must present
/// the same value in its `Authorization` header. Without a configured token
/// the check is skipped.
pub async fn auth_middleware<S: MetadataSource>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    if let Some(expected) = state.authorization.as_deref() {
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if presented != Some(expected) {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Unauthorized",
                    "message": "Invalid or missing authorization header"
                })),
            )
                .into_response());
        }
    }

    Ok(next.run(request).await)
}
