use crate::env_parser::{EnvParser, EnvParserError, obtain_env_value};
use std::path::PathBuf;

const DEFAULT_HOME_DIR_NAME: &str = ".signer";

/// Home directory of the signer, holding `config.toml` and the `state/` dir.
pub struct HomePath {
    pub path: PathBuf,
}

impl EnvParser for HomePath {
    const ENV_NAME: &'static str = "SIGNER_HOME";
}

impl HomePath {
    /// Resolution order: explicit value, then `SIGNER_HOME`, then `$HOME/.signer`.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, EnvParserError> {
        if let Some(path) = explicit {
            return Ok(Self { path });
        }
        if let Ok(path) = HomePath::obtain_env_value() {
            return Ok(Self { path: PathBuf::from(path) });
        }
        let user_home = obtain_env_value("HOME")?;
        Ok(Self {
            path: PathBuf::from(user_home).join(DEFAULT_HOME_DIR_NAME),
        })
    }
}
