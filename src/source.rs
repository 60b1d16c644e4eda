//! Metadata sources
//!
//! The resolver talks to the outside world only through [`MetadataSource`].
//! [`MicrolinkSource`] is the production implementation backed by reqwest.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::PreviewError;
use crate::model::{Metadata, ServiceEnvelope};

/// Public endpoint used when no service URL is configured
pub const DEFAULT_SERVICE_URL: &str = "https://api.microlink.io/";

/// Anything able to turn a URL into preview metadata
///
/// Implementations must be cheap to clone; the resolver hands a clone to
/// every in-flight fetch.
pub trait MetadataSource: Clone + Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Metadata, PreviewError>> + Send;
}

/// Client for a microlink-compatible metadata extraction endpoint
///
/// Issues `GET <service-url>?url=<percent-encoded target>` and reads the
/// `{ status, data }` envelope.
#[derive(Clone, Debug)]
pub struct MicrolinkSource {
    client: reqwest::Client,
    service_url: String,
}

impl MicrolinkSource {
    /// Builds a source with its own reqwest client
    ///
    /// No request timeout is set; only connection establishment is bounded.
    pub fn new(service_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(concat!("link-preview/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self::with_client(client, service_url))
    }

    /// Builds a source on top of an existing client
    pub fn with_client(client: reqwest::Client, service_url: impl Into<String>) -> Self {
        MicrolinkSource {
            client,
            service_url: service_url.into(),
        }
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }
}

impl MetadataSource for MicrolinkSource {
    async fn fetch(&self, url: &str) -> Result<Metadata, PreviewError> {
        let response = self
            .client
            .get(self.service_url.as_str())
            .query(&[("url", url)])
            .send()
            .await
            .inspect_err(|e| warn!(%url, error = %e, "metadata service unreachable"))?;

        let status = response.status();

        let envelope: ServiceEnvelope = response
            .json()
            .await
            .inspect_err(|e| warn!(%url, %status, error = %e, "unreadable metadata response"))?;

        // The service reports its own failures with a 4xx and a non-success
        // envelope; a 2xx is required for anything else to count.
        if !status.is_success() && envelope.status == "success" {
            warn!(%url, %status, "metadata service returned success body with error status");
            return Err(PreviewError::TransportOrParseFailure);
        }

        envelope.into_metadata().inspect_err(|_| {
            warn!(%url, %status, "metadata service reported failure");
        })
    }
}
