use serde::{Deserialize, Serialize};

/// One chain node endpoint the signing runtime connects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub address: String,
}

/// One remote cosigner the runtime exchanges signature shares with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    pub id: u16,
    pub address: String,
}
