//! Runtime configuration for the preview service
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by the binary before [`Config::from_env`] is called.

use std::env;

use crate::source::DEFAULT_SERVICE_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port the HTTP server binds to (`PORT`, default 8080)
    pub port: u16,

    /// Metadata extraction endpoint (`PREVIEW_SERVICE_URL`)
    pub service_url: String,

    /// Token required in the `Authorization` header for `/api` routes
    /// (`AUTHORIZATION`). Unset or empty disables the check.
    pub authorization: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            authorization: None,
        }
    }
}

impl Config {
    /// Reads configuration from the environment
    ///
    /// An unparseable `PORT` falls back to the default rather than failing.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let service_url = env::var("PREVIEW_SERVICE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.service_url);

        let authorization = env::var("AUTHORIZATION").ok().filter(|token| !token.is_empty());

        Config {
            port,
            service_url,
            authorization,
        }
    }
}
