//! `OmdbClient` - OMDb API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::OmdbApi;
use super::types::{
    DetailParams, OmdbDetailResponse, OmdbErrorResponse, OmdbSearchResponse, SearchParams,
};

/// Default base URL for the OMDb API.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Access key sent with every request.
    api_key: String,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the access key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a whole-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Sends a GET request with the access key and the given query params.
    #[instrument(skip_all, fields(http.status_code = tracing::field::Empty))]
    async fn get_json<T: serde::de::DeserializeOwned>(&self, query: &[(&str, String)]) -> Result<T> {
        tracing::debug!(url = %self.base_url, params = ?query, "OMDb API request");

        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .build()
            .context("failed to build OMDb request")?;

        let result = self.http_client.execute(request).await;
        let response = result.context("OMDb request failed")?;

        let status = response.status();
        tracing::Span::current().record("http.status_code", status.as_u16());
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            // OMDb sends its in-band rejection envelope with some error
            // statuses (401 for a bad key); hand it back like a 200 rejection.
            if let Ok(error_response) = serde_json::from_str::<OmdbErrorResponse>(&body) {
                if let Ok(envelope) = serde_json::from_str::<T>(&body) {
                    tracing::debug!(%status, error = %error_response.error, "OMDb rejected request");
                    return Ok(envelope);
                }
                bail!("OMDb API error (HTTP {status}): {}", error_response.error);
            }
            bail!("OMDb API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .context("failed to read OMDb response body")?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed = raw_result.context("failed to decode OMDb JSON response")?;
        Ok(parsed)
    }
}

impl OmdbApi for OmdbClient {
    #[instrument(skip_all, fields(query = %params.query, page = params.page))]
    async fn search(&self, params: &SearchParams) -> Result<OmdbSearchResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("s", params.query.clone()),
            ("page", params.page.to_string()),
        ];
        if let Some(kind) = params.kind {
            query.push(("type", String::from(kind.as_str())));
        }
        if let Some(year) = params.year {
            query.push(("y", year.to_string()));
        }

        self.get_json(&query).await
    }

    #[instrument(skip_all, fields(id = %params.id))]
    async fn details(&self, params: &DetailParams) -> Result<OmdbDetailResponse> {
        let query = [
            ("i", params.id.clone()),
            ("plot", String::from(params.plot.as_str())),
        ];
        self.get_json(&query).await
    }
}
