use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Must provide an API key or a client id and secret when creating the client")]
    MissingCredentials,
    #[error("Invalid API key provided")]
    InvalidApiKey,
    #[error("Must provide an API key for this API, client id credentials are not accepted")]
    ApiKeyRequired,
    #[error("HTTP error {0}")]
    Http(u16),
    #[error("{status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Api {
        status: String,
        message: Option<String>,
    },
    #[error("Over query limit{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    OverQueryLimit {
        status: String,
        message: Option<String>,
    },
    #[error("Retry timeout of {0:?} exceeded")]
    Timeout(std::time::Duration),
    #[error("reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
