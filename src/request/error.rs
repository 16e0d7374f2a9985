use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveRequestError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error(
        "HTTP request failed for {url} with status {status}: {}",
        .reason.as_deref().unwrap_or("no reason given")
    )]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        reason: Option<String>,
    },

    #[error("Archive rejected request for {url}: {reason}")]
    ApiRejected { url: String, reason: String },

    #[error("Failed to parse JSON response from {0}")]
    JsonParse(String, #[source] serde_json::Error),
}
