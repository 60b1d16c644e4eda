//! Preview resolver
//!
//! A [`PreviewResolver`] owns the preview state for one displayed link. The
//! state lives in a `watch` channel so observers are woken on every change,
//! and a generation counter decides which in-flight fetch is still allowed to
//! write: last request wins, not last to complete.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::{reduce, Preview, PreviewEvent, PreviewState};
use crate::source::MetadataSource;

struct Shared {
    /// Bumped on every URL change and on teardown. A fetch may only commit
    /// while this still equals the value it captured when it was issued.
    generation: AtomicU64,
    tx: watch::Sender<Preview>,
}

/// Resolves and holds the preview for a single, changeable URL
///
/// Mounting starts a fetch immediately. Dropping the resolver tears it down:
/// fetches still in flight run to completion but their results are discarded.
/// Must be created inside a tokio runtime.
///
/// # Example
///
/// ```no_run
/// # use link_preview::{resolver::PreviewResolver, source::MicrolinkSource};
/// # async fn demo() -> Result<(), reqwest::Error> {
/// let source = MicrolinkSource::new("https://api.microlink.io/")?;
/// let resolver = PreviewResolver::new(source, "https://example.com");
/// assert!(resolver.state().loading);
///
/// let settled = resolver.settled().await;
/// println!("{}", settled.title);
/// # Ok(())
/// # }
/// ```
pub struct PreviewResolver<S: MetadataSource> {
    source: S,
    shared: Arc<Shared>,
}

impl<S: MetadataSource> PreviewResolver<S> {
    /// Mounts a resolver for `url` and issues the first fetch
    pub fn new(source: S, url: impl Into<String>) -> Self {
        let (tx, _) = watch::channel(Preview::Initializing);

        let resolver = PreviewResolver {
            source,
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                tx,
            }),
        };

        resolver.request(url.into());
        resolver
    }

    /// Points the resolver at a new URL
    ///
    /// The state is reset to an empty loading shape before this returns.
    /// Supplying the URL that is already current does nothing, in flight or not.
    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();

        if self.shared.tx.borrow().url() == Some(url.as_str()) {
            return;
        }

        self.request(url);
    }

    /// Current snapshot, safe to render directly
    pub fn state(&self) -> PreviewState {
        self.shared.tx.borrow().snapshot()
    }

    /// Current state as the underlying tagged union
    pub fn preview(&self) -> Preview {
        self.shared.tx.borrow().clone()
    }

    /// Receiver that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<Preview> {
        self.shared.tx.subscribe()
    }

    /// Waits until the current URL has settled and returns its snapshot
    ///
    /// If the URL changes while waiting, this keeps waiting for the new one.
    pub async fn settled(&self) -> PreviewState {
        let mut rx = self.subscribe();

        // The sender is owned by `self`, so it cannot close while we borrow it.
        let state = match rx.wait_for(Preview::is_settled).await {
            Ok(preview) => preview.snapshot(),
            Err(_) => self.state(),
        };
        state
    }

    fn request(&self, url: String) {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.shared.tx.send_modify(|current| {
            *current = reduce(current, PreviewEvent::Requested { url: url.clone() });
        });

        debug!(%url, generation, "issuing preview fetch");

        let source = self.source.clone();
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            let outcome = source.fetch(&url).await;

            let committed = shared.tx.send_if_modified(|current| {
                // Checked under the channel's write lock, so a concurrent
                // `request` either lands before this check or after this write.
                if shared.generation.load(Ordering::SeqCst) != generation {
                    return false;
                }

                let next = reduce(current, PreviewEvent::Settled { url: url.clone(), outcome });
                if next == *current {
                    return false;
                }

                *current = next;
                true
            });

            if !committed {
                debug!(%url, generation, "discarding superseded preview result");
            }
        });
    }
}

impl<S: MetadataSource> Drop for PreviewResolver<S> {
    fn drop(&mut self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
    }
}
