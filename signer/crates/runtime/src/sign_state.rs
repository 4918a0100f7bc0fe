//! Last-signed state records. The signer refuses to sign below the recorded
//! height/round/step, so a record must exist before the daemon first runs.
//! This module only creates or loads the records; advancing them is the
//! signing loop's business.

use crate::error::{Result, SignStateError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignState {
    pub height: i64,
    pub round: i64,
    pub step: i8,
    #[serde(default)]
    pub signature: String,
    #[serde(default, rename = "signbytes")]
    pub sign_bytes: String,
}

/// Loads the record at `path`, or writes a fresh zeroed one if none exists.
/// An existing record is returned untouched.
pub fn create_or_load_sign_state(path: &Path) -> Result<SignState> {
    match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).map_err(|source| SignStateError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let state = SignState::default();
            let rendered = serde_json::to_string_pretty(&state).map_err(SignStateError::Serialize)?;
            fs::write(path, rendered).map_err(|source| SignStateError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "created zeroed sign state");
            Ok(state)
        }
        Err(source) => Err(SignStateError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
