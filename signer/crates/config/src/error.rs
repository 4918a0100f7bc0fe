use signer_runtime::error::SignStateError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, ConfigError>;

/// Every rejection the configuration subsystem can produce. Variants are
/// grouped by the corrective action they call for: fix the input, fix the
/// candidate configuration, re-run with something to do, or fix the
/// environment the command runs against.
#[derive(Debug, Error)]
pub enum ConfigError {
    // malformed input, operation aborted before any mutation
    #[error("Invalid chain node address '{address}', err: {source}")]
    InvalidNodeAddress { address: String, source: url::ParseError },
    #[error("Invalid peer '{entry}', expected '<address>|<share-id>'")]
    InvalidPeerEntry { entry: String },
    #[error("Invalid share id '{value}' in peer '{entry}'")]
    InvalidShareId { entry: String, value: String },
    #[error("Invalid peer address '{address}', err: {source}")]
    InvalidPeerAddress { address: String, source: url::ParseError },
    #[error("'{value}' is not a valid rpc timeout duration, err: {source}")]
    InvalidTimeout { value: String, source: humantime::DurationError },
    #[error("Invalid p2p listen address '{address}', err: {source}")]
    InvalidListenAddress { address: String, source: url::ParseError },

    // candidate configuration violates an invariant
    #[error("chain-id cannot be empty")]
    EmptyChainId,
    #[error("At least one chain node must be configured")]
    NoChainNodes,
    #[error("Threshold {threshold} cannot be met by {peers} peer(s) plus the local share")]
    ThresholdInfeasible { threshold: u16, peers: usize },
    #[error("Found duplicates for peer share ids: {0:?}")]
    DuplicateShareIds(Vec<u16>),

    // nothing to do
    #[error("No new chain nodes specified in args")]
    NoNewNodes,
    #[error("No new peers specified in args")]
    NoNewPeers,
    #[error("Cannot remove all chain nodes from config, please leave at least one")]
    WouldRemoveAllNodes,
    #[error("Cannot remove all peers from config, please leave at least one")]
    WouldRemoveAllPeers,

    // precondition on the command's environment
    #[error("{0} is not empty, check for existing configuration and clear path before trying again")]
    HomeNotEmpty(PathBuf),
    #[error("No configuration found under {0}, run 'config init' first")]
    NotInitialized(PathBuf),
    #[error("Configuration has no cosigner section, peer commands require a cosigner node")]
    NotACosigner,

    // store plumbing
    #[error("Failed to read config file {path}, err: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("Failed to write config file {path}, err: {source}")]
    WriteConfig { path: PathBuf, source: io::Error },
    #[error("Failed to create state directory {path}, err: {source}")]
    CreateStateDir { path: PathBuf, source: io::Error },
    #[error("Malformed config file {path}, err: {source}")]
    ParseConfig { path: PathBuf, source: toml::de::Error },
    #[error("Failed to serialize configuration, err: {0}")]
    SerializeConfig(#[from] toml::ser::Error),
    #[error(transparent)]
    SignState(#[from] SignStateError),
}
