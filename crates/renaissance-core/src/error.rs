//! Error types for graph construction and interchange

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node `{0}` already exists")]
    DuplicateNode(String),

    #[error("node `{0}` does not exist")]
    UnknownNode(String),

    #[error("node `{0}` has no labels")]
    EmptyLabels(String),

    #[error("malformed interchange document: {0}")]
    Interchange(#[from] serde_json::Error),
}
