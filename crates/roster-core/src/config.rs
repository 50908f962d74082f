// ── Runtime directory configuration ──
//
// Describes *where* the user directory lives. Never touches disk:
// the CLI/TUI builds a `DirectoryConfig` and hands it in.

use std::time::Duration;

use url::Url;

use crate::error::CoreError;

/// Default list endpoint.
pub const DEFAULT_LIST_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Default create endpoint. The service echoes the body back with an id
/// but does not persist it.
pub const DEFAULT_CREATE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Endpoints and transport tuning for a [`Directory`](crate::Directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// GET endpoint returning a JSON array of users.
    pub list_url: Url,
    /// POST endpoint accepting a new user.
    pub create_url: Url,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl DirectoryConfig {
    pub fn new(list_url: Url, create_url: Url) -> Self {
        Self {
            list_url,
            create_url,
            timeout: None,
        }
    }

    /// Parse both endpoint URLs.
    pub fn parse(list_url: &str, create_url: &str) -> Result<Self, CoreError> {
        Ok(Self::new(
            parse_url("list", list_url)?,
            parse_url("create", create_url)?,
        ))
    }

    /// The public demo endpoints.
    pub fn public_defaults() -> Result<Self, CoreError> {
        Self::parse(DEFAULT_LIST_URL, DEFAULT_CREATE_URL)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_url(which: &str, raw: &str) -> Result<Url, CoreError> {
    let url = Url::parse(raw).map_err(|e| CoreError::Config {
        message: format!("invalid {which} URL '{raw}': {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CoreError::Config {
            message: format!("{which} URL must use http or https, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn public_defaults_parse() {
        let config = DirectoryConfig::public_defaults().unwrap();
        assert_eq!(config.list_url.as_str(), DEFAULT_LIST_URL);
        assert_eq!(config.create_url.as_str(), DEFAULT_CREATE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn rejects_garbage_and_non_http() {
        assert!(matches!(
            DirectoryConfig::parse("nope", DEFAULT_CREATE_URL),
            Err(CoreError::Config { .. })
        ));
        assert!(matches!(
            DirectoryConfig::parse(DEFAULT_LIST_URL, "ftp://example.com/posts"),
            Err(CoreError::Config { .. })
        ));
    }
}
