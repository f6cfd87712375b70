use thiserror::Error;

/// Errors raised while loading a persisted or freshly parsed tree.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("malformed syntax tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a Program node at the root, found {0}")]
    NotAProgram(String),
}
