//! Failure taxonomy for preview retrieval
//!
//! Neither kind escapes the resolver. Both are folded into the `error` field
//! of the preview state so a broken preview never breaks the page embedding it.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreviewError {
    /// The service answered, but its status discriminator was not `"success"`
    #[error("Failed to fetch preview")]
    ServiceReportedFailure,

    /// The request did not complete, or the body was not the expected JSON
    #[error("Error fetching preview")]
    TransportOrParseFailure,
}

impl From<reqwest::Error> for PreviewError {
    fn from(_: reqwest::Error) -> Self {
        PreviewError::TransportOrParseFailure
    }
}
