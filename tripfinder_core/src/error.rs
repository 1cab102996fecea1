use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to fetch dataset from {location}: {message}")]
    Fetch { location: String, message: String },

    #[error("Dataset request to {location} returned status {status}")]
    Status { location: String, status: u16 },

    #[error("Unsupported dataset source: {0}")]
    UnsupportedSource(String),

    #[error("Dataset is not available")]
    DatasetUnavailable,
}
