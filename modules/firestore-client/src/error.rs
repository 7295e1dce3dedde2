use thiserror::Error;

pub type Result<T> = std::result::Result<T, FirestoreError>;

#[derive(Debug, Error)]
pub enum FirestoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Decode error in document {document}: {message}")]
    Decode { document: String, message: String },
}

impl From<reqwest::Error> for FirestoreError {
    fn from(err: reqwest::Error) -> Self {
        FirestoreError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FirestoreError {
    fn from(err: serde_json::Error) -> Self {
        FirestoreError::Parse(err.to_string())
    }
}
