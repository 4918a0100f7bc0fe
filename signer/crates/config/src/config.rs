//! The persisted configuration model and the edit operations the CLI exposes.
//! Every operation works on an owned value that the caller loads, mutates,
//! and persists; there is no ambient shared configuration. Operations reject
//! the request and leave the value untouched on any error.

use crate::address;
use crate::error::{ConfigError, Result};
use crate::reconcile::diff_set;
use crate::validate;
use serde::{Deserialize, Serialize};
use signer_runtime::types::{NodeConfig, PeerConfig};
use std::path::PathBuf;
use tracing::debug;

/// One upstream consensus node the signer serves. Addresses compare
/// byte-for-byte; `tcp://host:80` and `tcp://host:80/` are different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode {
    #[serde(rename = "priv-val-addr")]
    pub priv_val_addr: String,
}

/// One remote share holder in the threshold scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosignerPeer {
    #[serde(rename = "share-id")]
    pub share_id: u16,
    #[serde(rename = "p2p-addr")]
    pub p2p_addr: String,
}

/// `peers` is declared after the scalar fields so the TOML rendering keeps
/// the section's key-value pairs ahead of the `[[cosigner.peers]]` tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosignerConfig {
    pub threshold: u16,
    #[serde(rename = "p2p-listen")]
    pub p2p_listen: String,
    #[serde(rename = "rpc-timeout")]
    pub rpc_timeout: String,
    pub peers: Vec<CosignerPeer>,
}

/// Root of the persisted configuration. The node runs as a cosigner iff the
/// `cosigner` section is present. Scalar fields are declared before the
/// array/table fields so the TOML rendering is always a valid document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "home-dir")]
    pub home_dir: PathBuf,
    #[serde(rename = "chain-id")]
    pub chain_id: String,
    #[serde(rename = "chain-nodes", default)]
    pub chain_nodes: Vec<ChainNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosigner: Option<CosignerConfig>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validate::validate_config(self)
    }

    /// Appends the chain nodes from a comma-separated address list, skipping
    /// any that are already configured. Rejects the request when every
    /// requested node is already present.
    pub fn add_nodes(&mut self, arg: &str) -> Result<()> {
        let requested = address::chain_nodes_from_arg(arg)?;
        let fresh = diff_set(&self.chain_nodes, &requested);
        if fresh.is_empty() {
            return Err(ConfigError::NoNewNodes);
        }
        debug!(added = fresh.len(), "appending chain nodes");
        self.chain_nodes.extend(fresh);
        Ok(())
    }

    /// Drops the requested chain nodes. Rejects the request when it would
    /// leave the configuration without a single node.
    pub fn remove_nodes(&mut self, arg: &str) -> Result<()> {
        let requested = address::chain_nodes_from_arg(arg)?;
        let survivors = diff_set(&requested, &self.chain_nodes);
        if survivors.is_empty() {
            return Err(ConfigError::WouldRemoveAllNodes);
        }
        self.chain_nodes = survivors;
        Ok(())
    }

    /// Appends peers from a comma-separated `<address>|<share-id>` list. The
    /// candidate peer set must pass the duplicate-id and threshold checks
    /// before anything is committed.
    pub fn add_peers(&mut self, arg: &str) -> Result<()> {
        let cosigner = self.cosigner.as_mut().ok_or(ConfigError::NotACosigner)?;
        let requested = address::peers_from_arg(arg)?;
        let fresh = diff_set(&cosigner.peers, &requested);
        if fresh.is_empty() {
            return Err(ConfigError::NoNewPeers);
        }
        let mut candidate = cosigner.peers.clone();
        candidate.extend(fresh);
        validate::validate_peers(&candidate)?;
        validate::validate_threshold(cosigner.threshold, candidate.len())?;
        cosigner.peers = candidate;
        Ok(())
    }

    /// Drops the requested peers. The surviving set must stay non-empty and
    /// keep the signing threshold reachable.
    pub fn remove_peers(&mut self, arg: &str) -> Result<()> {
        let cosigner = self.cosigner.as_mut().ok_or(ConfigError::NotACosigner)?;
        let requested = address::peers_from_arg(arg)?;
        let survivors = diff_set(&requested, &cosigner.peers);
        if survivors.is_empty() {
            return Err(ConfigError::WouldRemoveAllPeers);
        }
        validate::validate_threshold(cosigner.threshold, survivors.len())?;
        cosigner.peers = survivors;
        Ok(())
    }

    pub fn set_chain_id(&mut self, chain_id: &str) -> Result<()> {
        if chain_id.is_empty() {
            return Err(ConfigError::EmptyChainId);
        }
        self.chain_id = chain_id.to_string();
        Ok(())
    }

    /// Node descriptors in the form the signing runtime consumes.
    pub fn nodes(&self) -> Vec<NodeConfig> {
        self.chain_nodes
            .iter()
            .map(|node| NodeConfig {
                address: node.priv_val_addr.clone(),
            })
            .collect()
    }

    /// Peer descriptors for the signing runtime; empty for single-signer nodes.
    pub fn cosigner_peers(&self) -> Vec<PeerConfig> {
        self.cosigner
            .as_ref()
            .map(|cosigner| {
                cosigner
                    .peers
                    .iter()
                    .map(|peer| PeerConfig {
                        id: peer.share_id,
                        address: peer.p2p_addr.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(addr: &str) -> ChainNode {
        ChainNode {
            priv_val_addr: addr.to_string(),
        }
    }

    fn peer(share_id: u16, addr: &str) -> CosignerPeer {
        CosignerPeer {
            share_id,
            p2p_addr: addr.to_string(),
        }
    }

    fn single_signer() -> Config {
        Config {
            home_dir: PathBuf::from("/tmp/signer"),
            chain_id: "test-chain-1".to_string(),
            chain_nodes: vec![node("tcp://10.0.0.1:1234")],
            cosigner: None,
        }
    }

    fn cosigner() -> Config {
        Config {
            cosigner: Some(CosignerConfig {
                threshold: 2,
                p2p_listen: "tcp://0.0.0.0:2222".to_string(),
                peers: vec![peer(2, "tcp://10.0.0.2:2222"), peer(3, "tcp://10.0.0.3:2222")],
                rpc_timeout: "1500ms".to_string(),
            }),
            ..single_signer()
        }
    }

    #[test]
    fn test_add_nodes_appends_only_the_new_ones() -> eyre::Result<()> {
        let mut config = single_signer();
        config.add_nodes("tcp://10.0.0.1:1234,tcp://10.0.0.9:1234")?;
        assert_eq!(
            config.chain_nodes,
            vec![node("tcp://10.0.0.1:1234"), node("tcp://10.0.0.9:1234")]
        );
        Ok(())
    }

    #[test]
    fn test_repeated_identical_add_is_a_noop_rejection() -> eyre::Result<()> {
        let mut config = single_signer();
        config.add_nodes("tcp://10.0.0.9:1234")?;
        let before = config.clone();

        let err = config.add_nodes("tcp://10.0.0.9:1234").unwrap_err();
        assert!(matches!(err, ConfigError::NoNewNodes));
        assert_eq!(config, before);
        Ok(())
    }

    #[test]
    fn test_add_nodes_with_malformed_element_mutates_nothing() {
        let mut config = single_signer();
        let before = config.clone();
        assert!(config.add_nodes("tcp://ok:1,???").is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn test_remove_nodes_keeps_survivors_in_order() -> eyre::Result<()> {
        let mut config = single_signer();
        config.add_nodes("tcp://10.0.0.2:1234,tcp://10.0.0.3:1234")?;
        config.remove_nodes("tcp://10.0.0.2:1234")?;
        assert_eq!(
            config.chain_nodes,
            vec![node("tcp://10.0.0.1:1234"), node("tcp://10.0.0.3:1234")]
        );
        Ok(())
    }

    #[test]
    fn test_remove_never_empties_the_node_set() {
        let mut config = single_signer();
        let before = config.clone();
        let err = config.remove_nodes("tcp://10.0.0.1:1234").unwrap_err();
        assert!(matches!(err, ConfigError::WouldRemoveAllNodes));
        assert_eq!(config, before);
    }

    #[test]
    fn test_add_peers_requires_a_cosigner_section() {
        let mut config = single_signer();
        let err = config.add_peers("tcp://10.0.0.4:2222|4").unwrap_err();
        assert!(matches!(err, ConfigError::NotACosigner));
    }

    #[test]
    fn test_add_peers_appends_and_revalidates() -> eyre::Result<()> {
        let mut config = cosigner();
        config.add_peers("tcp://10.0.0.4:2222|4")?;
        let cosigner = config.cosigner.as_ref().expect("cosigner section");
        assert_eq!(cosigner.peers.len(), 3);
        assert_eq!(cosigner.peers[2], peer(4, "tcp://10.0.0.4:2222"));
        Ok(())
    }

    #[test]
    fn test_add_peer_with_duplicate_share_id_is_rejected() {
        // same id at a fresh address is a new element for reconciliation but
        // must still fail the duplicate check before commit
        let mut config = cosigner();
        let before = config.clone();
        let err = config.add_peers("tcp://10.0.0.9:2222|3").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateShareIds(ref ids) if ids == &vec![3]));
        assert_eq!(config, before);
    }

    #[test]
    fn test_repeated_identical_peer_add_is_a_noop_rejection() {
        let mut config = cosigner();
        let err = config.add_peers("tcp://10.0.0.2:2222|2").unwrap_err();
        assert!(matches!(err, ConfigError::NoNewPeers));
    }

    #[test]
    fn test_remove_peers_never_empties_the_peer_set() {
        let mut config = cosigner();
        let before = config.clone();
        let err = config
            .remove_peers("tcp://10.0.0.2:2222|2,tcp://10.0.0.3:2222|3")
            .unwrap_err();
        assert!(matches!(err, ConfigError::WouldRemoveAllPeers));
        assert_eq!(config, before);
    }

    #[test]
    fn test_remove_peers_cannot_break_the_threshold() {
        let mut config = cosigner();
        if let Some(cosigner) = config.cosigner.as_mut() {
            cosigner.threshold = 3;
        }
        let err = config.remove_peers("tcp://10.0.0.3:2222|3").unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdInfeasible { threshold: 3, peers: 1 }));
    }

    #[test]
    fn test_remove_peers_drops_the_requested_one() -> eyre::Result<()> {
        let mut config = cosigner();
        config.remove_peers("tcp://10.0.0.2:2222|2")?;
        let cosigner = config.cosigner.as_ref().expect("cosigner section");
        assert_eq!(cosigner.peers, vec![peer(3, "tcp://10.0.0.3:2222")]);
        Ok(())
    }

    #[test]
    fn test_set_chain_id_rejects_empty() {
        let mut config = single_signer();
        assert!(matches!(config.set_chain_id(""), Err(ConfigError::EmptyChainId)));
        config.set_chain_id("other-chain-9").expect("valid chain id");
        assert_eq!(config.chain_id, "other-chain-9");
    }

    #[test]
    fn test_runtime_descriptor_export() {
        let config = cosigner();
        assert_eq!(
            config.nodes(),
            vec![NodeConfig {
                address: "tcp://10.0.0.1:1234".to_string()
            }]
        );
        assert_eq!(
            config.cosigner_peers(),
            vec![
                PeerConfig {
                    id: 2,
                    address: "tcp://10.0.0.2:2222".to_string()
                },
                PeerConfig {
                    id: 3,
                    address: "tcp://10.0.0.3:2222".to_string()
                },
            ]
        );
        assert!(single_signer().cosigner_peers().is_empty());
    }
}
