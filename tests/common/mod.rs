//! Shared test doubles for the metadata source

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use link_preview::{Metadata, MetadataSource, PreviewError};
use tokio::sync::oneshot;

pub type Outcome = Result<Metadata, PreviewError>;

pub fn metadata(title: &str) -> Metadata {
    Metadata {
        title: title.to_string(),
        description: format!("{title} description"),
        image: format!("https://cdn.example/{title}.png"),
        favicon: format!("https://cdn.example/{title}.ico"),
    }
}

/// Source whose fetches stay pending until the test releases them
///
/// Every call is recorded; the result for a URL is delivered through
/// [`GatedSource::release`], in whatever order the test chooses.
#[derive(Clone, Default)]
pub struct GatedSource {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<Outcome>>>>,
    senders: Arc<Mutex<HashMap<String, oneshot::Sender<Outcome>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl GatedSource {
    /// Arms a gate for `url`; must be called before the fetch is issued
    pub fn arm(&self, url: &str) {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(url.to_string(), rx);
        self.senders.lock().unwrap().insert(url.to_string(), tx);
    }

    pub fn release(&self, url: &str, outcome: Outcome) {
        let tx = self
            .senders
            .lock()
            .unwrap()
            .remove(url)
            .expect("gate was not armed");
        let _ = tx.send(outcome);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl MetadataSource for GatedSource {
    async fn fetch(&self, url: &str) -> Outcome {
        self.calls.lock().unwrap().push(url.to_string());

        let gate = self.gates.lock().unwrap().remove(url);
        match gate {
            Some(rx) => rx.await.unwrap_or(Err(PreviewError::TransportOrParseFailure)),
            None => Err(PreviewError::TransportOrParseFailure),
        }
    }
}

/// Source that answers immediately from a fixed table
#[derive(Clone, Default)]
pub struct StaticSource {
    answers: Arc<HashMap<String, Outcome>>,
}

impl StaticSource {
    pub fn new(answers: impl IntoIterator<Item = (&'static str, Outcome)>) -> Self {
        StaticSource {
            answers: Arc::new(
                answers
                    .into_iter()
                    .map(|(url, outcome)| (url.to_string(), outcome))
                    .collect(),
            ),
        }
    }
}

impl MetadataSource for StaticSource {
    async fn fetch(&self, url: &str) -> Outcome {
        self.answers
            .get(url)
            .cloned()
            .unwrap_or(Err(PreviewError::TransportOrParseFailure))
    }
}
