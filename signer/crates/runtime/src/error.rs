use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, SignStateError>;

#[derive(Debug, Error)]
pub enum SignStateError {
    #[error("Failed to read sign state file {path}, err: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write sign state file {path}, err: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Malformed sign state file {path}, err: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("Failed to serialize sign state, err: {0}")]
    Serialize(#[source] serde_json::Error),
}
