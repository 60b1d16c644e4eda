//! Shared application state for the HTTP surface

use std::sync::Arc;

use crate::source::MetadataSource;

/// Application state shared across all request handlers
///
/// Generic over the metadata source so tests can run the router against an
/// in-memory source.
#[derive(Clone)]
pub struct AppState<S: MetadataSource> {
    /// Source handed to every resolver mounted by a request
    pub source: S,

    /// Token expected in the `Authorization` header, if any
    pub authorization: Option<Arc<str>>,
}

impl<S: MetadataSource> AppState<S> {
    pub fn new(source: S) -> Self {
        AppState {
            source,
            authorization: None,
        }
    }

    pub fn with_authorization(mut self, token: Option<String>) -> Self {
        self.authorization = token.filter(|t| !t.is_empty()).map(Arc::from);
        self
    }
}
