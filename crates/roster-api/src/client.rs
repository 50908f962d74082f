// User directory HTTP client
//
// Two endpoints, configured independently: a list URL answering GET with a
// JSON array of users, and a create URL accepting a POSTed user and echoing
// it back with a server-assigned id.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{NewUserRequest, UserRecord};
use crate::transport::TransportConfig;

/// Raw HTTP client for the user directory endpoints.
///
/// Stateless apart from the connection pool: every call is a single request
/// with no retry. Non-success statuses are turned into [`Error::Http`].
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    list_url: Url,
    create_url: Url,
}

impl UserClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(list_url: Url, create_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            list_url,
            create_url,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, list_url: Url, create_url: Url) -> Self {
        Self {
            http,
            list_url,
            create_url,
        }
    }

    /// Parse both URLs and build a client around an existing `reqwest::Client`.
    pub fn from_reqwest(
        list_url: &str,
        create_url: &str,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self::with_client(
            http,
            Url::parse(list_url)?,
            Url::parse(create_url)?,
        ))
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the full user list.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.get(self.list_url.clone()).await
    }

    /// Submit a new user and return the record the server echoes back.
    pub async fn create_user(&self, user: &NewUserRequest) -> Result<UserRecord, Error> {
        self.post(self.create_url.clone(), user).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, url: Url, body: &impl Serialize) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    /// Check the status, then decode the body, keeping the raw text around
    /// for error reporting.
    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
