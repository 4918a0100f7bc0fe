//! Parsing of the comma-delimited address lists the CLI accepts. Parsing is
//! pure and order-preserving; duplicates survive into the output because
//! deduplication belongs to reconciliation, not parsing.

use crate::config::{ChainNode, CosignerPeer};
use crate::error::{ConfigError, Result};
use url::Url;

/// Parses `tcp://node-1:1234,tcp://node-2:1234` into chain node descriptors.
/// One malformed element fails the whole parse, naming the element.
pub fn chain_nodes_from_arg(arg: &str) -> Result<Vec<ChainNode>> {
    arg.split(',')
        .map(|address| {
            Url::parse(address).map_err(|source| ConfigError::InvalidNodeAddress {
                address: address.to_string(),
                source,
            })?;
            Ok(ChainNode {
                priv_val_addr: address.to_string(),
            })
        })
        .collect()
}

/// Parses `tcp://node-1:2222|2,tcp://node-2:2222|3` into peer descriptors.
/// Each element must split into exactly two parts on `|`, with a syntactically
/// valid address and a positive share id.
pub fn peers_from_arg(arg: &str) -> Result<Vec<CosignerPeer>> {
    arg.split(',').map(peer_from_entry).collect()
}

fn peer_from_entry(entry: &str) -> Result<CosignerPeer> {
    let parts: Vec<&str> = entry.split('|').collect();
    if parts.len() != 2 {
        return Err(ConfigError::InvalidPeerEntry {
            entry: entry.to_string(),
        });
    }
    let (address, raw_share_id) = (parts[0], parts[1]);
    let share_id: u16 = raw_share_id.parse().map_err(|_| ConfigError::InvalidShareId {
        entry: entry.to_string(),
        value: raw_share_id.to_string(),
    })?;
    if share_id == 0 {
        return Err(ConfigError::InvalidShareId {
            entry: entry.to_string(),
            value: raw_share_id.to_string(),
        });
    }
    Url::parse(address).map_err(|source| ConfigError::InvalidPeerAddress {
        address: address.to_string(),
        source,
    })?;
    Ok(CosignerPeer {
        share_id,
        p2p_addr: address.to_string(),
    })
}
