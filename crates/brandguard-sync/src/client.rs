//! HTTP client for the BrandGuard request/response API.
//!
//! Wraps `reqwest` with typed response deserialization and status checking.
//! No request timeout is configured: a hung request blocks only the caller
//! awaiting it.

use brandguard_core::{Alert, CreatedMention, Mention, NewMention};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::SyncError;

/// Client for the dashboard's list and create endpoints.
///
/// Use [`DashboardClient::new`] with the configured `api_base`, or point it at
/// a mock server in tests.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: Url,
}

impl DashboardClient {
    /// Creates a client rooted at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`SyncError::InvalidUrl`] if `api_base` cannot be
    /// used as a base for endpoint paths.
    pub fn new(api_base: &str, user_agent: &str) -> Result<Self, SyncError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        // Normalise to exactly one trailing slash so `join` appends to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", api_base.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SyncError::InvalidUrl {
            url: api_base.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::InvalidUrl {
                url: api_base.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// Fetches the mention list, in the order the backend returns it.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Http`] on network failure.
    /// - [`SyncError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SyncError::Deserialize`] if the body is not a JSON array of mentions.
    pub async fn list_mentions(&self) -> Result<Vec<Mention>, SyncError> {
        let url = self.endpoint("mentions")?;
        self.get_json(&url).await
    }

    /// Fetches the alert list, in the order the backend returns it.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Http`] on network failure.
    /// - [`SyncError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SyncError::Deserialize`] if the body is not a JSON array of alerts.
    pub async fn list_alerts(&self) -> Result<Vec<Alert>, SyncError> {
        let url = self.endpoint("alerts")?;
        self.get_json(&url).await
    }

    /// Creates a mention. The backend broadcasts it to every push subscriber.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DashboardClient::list_mentions`].
    pub async fn create_mention(&self, mention: &NewMention) -> Result<CreatedMention, SyncError> {
        let url = self.endpoint("mentions")?;
        let response = self.client.post(url.clone()).json(mention).send().await?;
        Self::read_json(response, &url).await
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        self.base_url.join(path).map_err(|e| SyncError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, SyncError> {
        tracing::debug!(endpoint = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::read_json(response, url).await
    }

    /// Asserts a 2xx status and parses the body as JSON.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<T, SyncError> {
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SyncError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
