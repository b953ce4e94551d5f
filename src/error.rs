use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream responded with status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("failed to decode schedule payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("month index {0} is out of range")]
    InvalidMonth(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
