use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("http status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
