use thiserror::Error;

use crate::types::Collection;

/// A failed bulk read of one collection. The message is meant for display.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to fetch {collection}: {message}")]
pub struct FetchError {
    pub collection: Collection,
    pub message: String,
}

impl FetchError {
    pub fn new(collection: Collection, message: impl Into<String>) -> Self {
        Self {
            collection,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ObservatoryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Seeding error: {0}")]
    Seed(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
