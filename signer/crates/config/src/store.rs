//! On-disk layout of a signer home and the load/save/init entry points.
//! `config.toml` is the human-editable form; the same serde model round-trips
//! through JSON for machine consumers. Candidates are fully serialized in
//! memory before a single byte hits the disk.

use crate::config::Config;
use crate::error::{ConfigError, Result};
use signer_runtime::sign_state::create_or_load_sign_state;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const STATE_DIR_NAME: &str = "state";

pub fn config_file_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE_NAME)
}

pub fn state_dir(home: &Path) -> PathBuf {
    home.join(STATE_DIR_NAME)
}

/// `state/{chain_id}_priv_validator_state.json`, the validator signing state.
pub fn validator_state_path(home: &Path, chain_id: &str) -> PathBuf {
    state_dir(home).join(format!("{chain_id}_priv_validator_state.json"))
}

/// `state/{chain_id}_share_sign_state.json`, the share signing state,
/// provisioned only for cosigner nodes.
pub fn share_state_path(home: &Path, chain_id: &str) -> PathBuf {
    state_dir(home).join(format!("{chain_id}_share_sign_state.json"))
}

pub fn load_config(home: &Path) -> Result<Config> {
    let path = config_file_path(home);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotInitialized(home.to_path_buf()));
        }
        Err(source) => return Err(ConfigError::ReadConfig { path, source }),
    };
    toml::from_str(&raw).map_err(|source| ConfigError::ParseConfig { path, source })
}

pub fn save_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config)?;
    let path = config_file_path(&config.home_dir);
    fs::write(&path, rendered).map_err(|source| ConfigError::WriteConfig {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "configuration written");
    Ok(())
}

/// The only legal transition out of the absent state. Requires the home
/// directory to be missing or empty, validates the assembled configuration,
/// then lays out the home: `state/` dir, `config.toml`, the validator signing
/// state, and (for cosigners) the share signing state.
pub fn init_home(config: &Config) -> Result<()> {
    if home_is_populated(&config.home_dir)? {
        return Err(ConfigError::HomeNotEmpty(config.home_dir.clone()));
    }
    config.validate()?;

    let state = state_dir(&config.home_dir);
    fs::create_dir_all(&state).map_err(|source| ConfigError::CreateStateDir {
        path: state.clone(),
        source,
    })?;
    save_config(config)?;

    create_or_load_sign_state(&validator_state_path(&config.home_dir, &config.chain_id))?;
    if config.cosigner.is_some() {
        create_or_load_sign_state(&share_state_path(&config.home_dir, &config.chain_id))?;
    }
    info!(
        home = %config.home_dir.display(),
        chain_id = %config.chain_id,
        cosigner = config.cosigner.is_some(),
        "signer home initialized"
    );
    Ok(())
}

fn home_is_populated(home: &Path) -> Result<bool> {
    match fs::read_dir(home) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ConfigError::ReadConfig {
            path: home.to_path_buf(),
            source,
        }),
    }
}
