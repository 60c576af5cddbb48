use thiserror::Error;

/// Errors returned by [`crate::RegistryClient`].
///
/// Every variant is a transport-level failure of a single lookup; none of
/// them are retried by the client.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429; the registry asked us to slow down.
    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The registry answered 2xx with `"status": "ERROR"` and a message.
    #[error("registry API error: {0}")]
    Api(String),

    /// The response body is not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
