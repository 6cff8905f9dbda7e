use std::path::PathBuf;

use thiserror::Error;

use crate::types::ItemId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to ingest catalog from {}: {reason}", path.display())]
    Ingestion { path: PathBuf, reason: String },

    #[error("Cannot train on an empty catalog")]
    EmptyCorpus,

    #[error("Every term was filtered out; vocabulary is empty (check stop_words / min_term_len)")]
    EmptyVocabulary,

    #[error("Product ID {0} not found")]
    ProductNotFound(ItemId),

    #[error("Recommendation model is not trained")]
    NotTrained,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn ingestion(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Ingestion { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
