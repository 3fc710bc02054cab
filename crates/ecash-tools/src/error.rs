use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Primitives(#[from] ecash_primitives::Error),
    #[error(transparent)]
    Token(#[from] ecash_token::Error),
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
    #[error("Invalid input: {0}")]
    Input(String),
}
