//! Certification authority lookup against the TAG registry over HTTP

use std::time::Duration;

use ads_registry_core::{AuthorityLookup, CoreError, CoreResult, LookupError};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::utils::body_preview::body_preview;

/// [`AuthorityLookup`] issuing `GET <lookup_url>?q=<escaped id>`.
///
/// One request per call; retries are left to the verification engine.
pub struct HttpAuthorityLookup {
    client: Client,
    lookup_url: Url,
}

impl HttpAuthorityLookup {
    pub const DEFAULT_LOOKUP_URL: &'static str =
        "https://tag-members-prod.herokuapp.com/registry/lookup";

    /// Build a lookup with its own client bounded by `request_timeout`.
    pub fn new(lookup_url: &str, request_timeout: Duration) -> CoreResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, lookup_url)
    }

    /// Build a lookup on top of an existing client.
    pub fn with_client(client: Client, lookup_url: &str) -> CoreResult<Self> {
        Ok(Self {
            client,
            lookup_url: parse_lookup_url(lookup_url)?,
        })
    }

    /// Registry URL queried for `authority_id`.
    pub fn request_url(&self, authority_id: &str) -> String {
        let separator = if self.lookup_url.query().is_some() {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{separator}q={}",
            self.lookup_url,
            urlencoding::encode(authority_id)
        )
    }
}

/// Accept only absolute `http`/`https` URLs.
pub(crate) fn parse_lookup_url(lookup_url: &str) -> CoreResult<Url> {
    let url = Url::parse(lookup_url)
        .map_err(|e| CoreError::InvalidConfig(format!("Invalid lookup URL '{lookup_url}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoreError::InvalidConfig(format!(
            "Lookup URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

fn map_request_error(e: &reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout(e.to_string())
    } else {
        LookupError::Transport(e.to_string())
    }
}

#[async_trait]
impl AuthorityLookup for HttpAuthorityLookup {
    async fn lookup(&self, authority_id: &str) -> Result<String, LookupError> {
        let url = self.request_url(authority_id);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_request_error(&e))?;

        let status = response.status();
        log::debug!("Response Status: {} for {authority_id}", status.as_u16());
        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| map_request_error(&e))?;
        log::debug!("Response Body: {}", body_preview(&body));
        Ok(body)
    }
}
