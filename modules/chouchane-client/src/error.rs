use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChouchaneError>;

#[derive(Debug, Error)]
pub enum ChouchaneError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for ChouchaneError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChouchaneError::Protocol(err.to_string())
        } else {
            ChouchaneError::Network(err.to_string())
        }
    }
}
