//! Library exports for the link preview resolver and its HTTP service
//!
//! The resolver and its state machine are usable on their own; the HTTP
//! modules expose them to renderers that cannot run a resolver in-process.

pub mod card;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod resolver;
pub mod route;
pub mod source;
pub mod state;

pub use error::PreviewError;
pub use model::{Metadata, Preview, PreviewState};
pub use resolver::PreviewResolver;
pub use source::{MetadataSource, MicrolinkSource};
