//! Data models for link previews
//!
//! This module defines the preview state machine, the flat snapshot handed to
//! callers, and the JSON envelope returned by the metadata service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::Category;
use crate::error::PreviewError;

/// Metadata extracted for a single URL
///
/// Every field is an empty string when the service did not report it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Human-readable page title
    pub title: String,

    /// Short summary text
    pub description: String,

    /// Absolute URL of a representative image
    pub image: String,

    /// Absolute URL of the site icon
    pub favicon: String,
}

/// The lifecycle of a preview for one resolver instance
///
/// Each variant carries only the fields that are valid in that state.
/// `Resolved` and `Failed` are terminal for their URL; only a URL change
/// moves the machine back to `Loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Preview {
    /// Synthetic default before the first URL is observed
    #[default]
    Initializing,

    /// A fetch for `url` is in flight
    Loading { url: String },

    /// The fetch for `url` settled successfully
    Resolved { url: String, metadata: Metadata },

    /// The fetch for `url` settled with an error
    Failed { url: String, error: PreviewError },
}

impl Preview {
    /// URL this state belongs to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Preview::Initializing => None,
            Preview::Loading { url } | Preview::Resolved { url, .. } | Preview::Failed { url, .. } => {
                Some(url)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Preview::Loading { .. })
    }

    /// True for `Resolved` and `Failed`
    pub fn is_settled(&self) -> bool {
        matches!(self, Preview::Resolved { .. } | Preview::Failed { .. })
    }

    /// Flattens the state into the snapshot shape callers render from
    pub fn snapshot(&self) -> PreviewState {
        match self {
            // Same shape the caller sees before its first render: nothing known, loading
            Preview::Initializing => PreviewState::loading(""),
            Preview::Loading { url } => PreviewState::loading(url),
            Preview::Resolved { url, metadata } => PreviewState {
                url: url.clone(),
                title: metadata.title.clone(),
                description: metadata.description.clone(),
                image: metadata.image.clone(),
                favicon: metadata.favicon.clone(),
                error: None,
                loading: false,
            },
            Preview::Failed { url, error } => PreviewState {
                error: Some(error.to_string()),
                loading: false,
                ..PreviewState::loading(url)
            },
        }
    }
}

/// Flat, render-ready snapshot of a [`Preview`]
///
/// # Example
/// ```json
/// {
///   "url": "https://example.com",
///   "title": "Example Domain",
///   "description": "",
///   "image": "",
///   "favicon": "https://example.com/favicon.ico",
///   "loading": false
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    /// The URL this state corresponds to
    pub url: String,

    pub title: String,
    pub description: String,
    pub image: String,
    pub favicon: String,

    /// Failure reason, present only once a fetch has failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// True exactly while a fetch for `url` is in flight
    pub loading: bool,
}

impl PreviewState {
    /// Empty state for `url` with a fetch in flight
    pub fn loading(url: &str) -> Self {
        PreviewState {
            url: url.to_string(),
            title: String::new(),
            description: String::new(),
            image: String::new(),
            favicon: String::new(),
            error: None,
            loading: true,
        }
    }
}

/// Inputs that drive the state machine
#[derive(Debug, Clone)]
pub enum PreviewEvent {
    /// The caller observed a new URL
    Requested { url: String },

    /// The fetch for `url` completed
    Settled {
        url: String,
        outcome: Result<Metadata, PreviewError>,
    },
}

/// Pure transition function for [`Preview`]
///
/// A settle only lands on a `Loading` state for the same URL; anything else
/// leaves the current state untouched. Generation checks live in the resolver,
/// this guard only keeps the machine itself consistent.
pub fn reduce(current: &Preview, event: PreviewEvent) -> Preview {
    match event {
        PreviewEvent::Requested { url } => Preview::Loading { url },
        PreviewEvent::Settled { url, outcome } => match current {
            Preview::Loading { url: pending } if *pending == url => match outcome {
                Ok(metadata) => Preview::Resolved { url, metadata },
                Err(error) => Preview::Failed { url, error },
            },
            _ => current.clone(),
        },
    }
}

/// Top-level JSON envelope returned by the metadata service
///
/// ```json
/// { "status": "success", "data": { "title": "...", "image": { "url": "..." } } }
/// ```
#[derive(Deserialize, Debug)]
pub struct ServiceEnvelope {
    pub status: String,

    #[serde(default)]
    pub data: Option<ServicePayload>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ServicePayload {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<ServiceAsset>,

    #[serde(default)]
    pub logo: Option<ServiceAsset>,
}

#[derive(Deserialize, Debug)]
pub struct ServiceAsset {
    #[serde(default)]
    pub url: Option<String>,
}

impl ServiceEnvelope {
    /// Converts the envelope into metadata, or a service-reported failure
    /// when the status discriminator is anything but `"success"`.
    pub fn into_metadata(self) -> Result<Metadata, PreviewError> {
        if self.status != "success" {
            return Err(PreviewError::ServiceReportedFailure);
        }

        let payload = self.data.unwrap_or_default();
        let asset_url = |asset: Option<ServiceAsset>| asset.and_then(|a| a.url).unwrap_or_default();

        Ok(Metadata {
            title: payload.title.unwrap_or_default(),
            description: payload.description.unwrap_or_default(),
            image: asset_url(payload.image),
            favicon: asset_url(payload.logo),
        })
    }
}

/// Query parameters for `GET /api/preview`
///
/// # Example
/// Query string: `?url=https%3A%2F%2Fexample.com`
#[derive(Deserialize)]
pub struct PreviewParams {
    /// Target URL; a missing value is rejected by the handler
    pub url: Option<String>,
}

/// Query parameters for `GET /api/preview/card`
#[derive(Deserialize)]
pub struct CardParams {
    pub url: Option<String>,

    /// Feed category name, unknown names fall back to `news`
    pub category: Option<String>,

    /// Image configured on the feed item itself
    pub image: Option<String>,
}

/// Response for `GET /api/preview/card`
#[derive(Serialize, Deserialize, Debug)]
pub struct CardResponse {
    pub preview: PreviewState,

    /// Image the card should display
    pub image: String,

    /// Image to swap in if `image` fails to load on the client
    pub fallback_image: String,

    pub category: Category,

    /// When the preview settled on this server
    pub fetched_at: DateTime<Utc>,
}
