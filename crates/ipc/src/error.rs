//! Errors raised while decoding host input.

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Malformed JSON from host: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected payload shape: {0}")]
    InvalidFormat(String),
}
