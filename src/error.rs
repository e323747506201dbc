use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("No {stage} found in page")]
    NoMatches { stage: &'static str },

    #[error("Failed to parse source response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No video link found in response")]
    MissingLink,

    #[error("Missing server ID in extra data")]
    MissingServerId,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
