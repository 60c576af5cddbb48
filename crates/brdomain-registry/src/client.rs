//! HTTP client for the two registries consulted per domain.
//!
//! The ownership lookup is the registro.br RDAP service keyed by domain; the
//! company lookup is ReceitaWS keyed by a 14-digit CNPJ. Both return the raw
//! JSON body; field extraction lives in [`crate::extract`]. Every call is a
//! single request: no retries and no caching.

use std::time::Duration;

use brdomain_core::{Cnpj, Domain};
use reqwest::{Client, Url};

use crate::error::RegistryError;

const DEFAULT_RDAP_BASE_URL: &str = "https://rdap.registro.br/domain/";
const DEFAULT_RECEITAWS_BASE_URL: &str = "https://receitaws.com.br/v1/cnpj/";

/// Client for the RDAP and ReceitaWS lookups.
///
/// Use [`RegistryClient::new`] for production or
/// [`RegistryClient::with_base_urls`] to point at a mock server in tests.
pub struct RegistryClient {
    client: Client,
    rdap_base_url: Url,
    receitaws_base_url: Url,
}

impl RegistryClient {
    /// Creates a client pointed at the production registries.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, RegistryError> {
        Self::with_base_urls(
            timeout_secs,
            user_agent,
            DEFAULT_RDAP_BASE_URL,
            DEFAULT_RECEITAWS_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// The lookup key is appended as the last path segment of each base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`RegistryError::InvalidBaseUrl`] if either
    /// base URL cannot carry a path.
    pub fn with_base_urls(
        timeout_secs: u64,
        user_agent: &str,
        rdap_base_url: &str,
        receitaws_base_url: &str,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            rdap_base_url: parse_base_url(rdap_base_url)?,
            receitaws_base_url: parse_base_url(receitaws_base_url)?,
        })
    }

    /// Fetches the RDAP domain record for `domain`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Http`] on network failure.
    /// - [`RegistryError::RateLimited`], [`RegistryError::NotFound`] or
    ///   [`RegistryError::UnexpectedStatus`] on a non-2xx status.
    /// - [`RegistryError::Deserialize`] if the body is not JSON.
    pub async fn lookup_ownership(
        &self,
        domain: &Domain,
    ) -> Result<serde_json::Value, RegistryError> {
        let url = endpoint(&self.rdap_base_url, domain.as_str());
        self.request_json(url).await
    }

    /// Fetches the ReceitaWS company record for `cnpj`.
    ///
    /// ReceitaWS reports unknown or rejected ids with a 200 response whose
    /// `"status"` is `"ERROR"`; those surface as [`RegistryError::Api`].
    ///
    /// # Errors
    ///
    /// Same as [`RegistryClient::lookup_ownership`], plus
    /// [`RegistryError::Api`].
    pub async fn lookup_company(&self, cnpj: &Cnpj) -> Result<serde_json::Value, RegistryError> {
        let url = endpoint(&self.receitaws_base_url, cnpj.as_str());
        let body = self.request_json(url).await?;
        check_api_error(&body)?;
        Ok(body)
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and parses
    /// the response body as JSON.
    async fn request_json(&self, url: Url) -> Result<serde_json::Value, RegistryError> {
        tracing::debug!(%url, "registry request");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(RegistryError::RateLimited {
                url: url.to_string(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(RegistryError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RegistryError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, RegistryError> {
    let url = Url::parse(base_url).map_err(|e| RegistryError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(RegistryError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: "URL cannot carry a path".to_owned(),
        });
    }
    Ok(url)
}

/// Appends `key` as the final path segment of `base`, replacing a trailing
/// empty segment so `.../domain/` and `.../domain` yield the same URL.
fn endpoint(base: &Url, key: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(key);
    }
    url
}

/// Returns [`RegistryError::Api`] when the body's top-level `"status"` is
/// `"ERROR"`.
fn check_api_error(body: &serde_json::Value) -> Result<(), RegistryError> {
    if body.get("status").and_then(serde_json::Value::as_str) == Some("ERROR") {
        let msg = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(RegistryError::Api(msg));
    }
    Ok(())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
