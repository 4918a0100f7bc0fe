use global_utils::logger::{LoggerGuard, init_logger};
use signer_config::config::{ChainNode, Config, CosignerConfig, CosignerPeer};
use std::path::Path;
use std::sync::LazyLock;

pub static TEST_LOGGER: LazyLock<LoggerGuard> = LazyLock::new(init_logger);

pub fn single_signer_config(home: &Path) -> Config {
    Config {
        home_dir: home.to_path_buf(),
        chain_id: "pion-1".to_string(),
        chain_nodes: vec![ChainNode {
            priv_val_addr: "tcp://10.0.0.1:1234".to_string(),
        }],
        cosigner: None,
    }
}

pub fn cosigner_config(home: &Path) -> Config {
    Config {
        cosigner: Some(CosignerConfig {
            threshold: 2,
            p2p_listen: "tcp://0.0.0.0:2222".to_string(),
            peers: vec![
                CosignerPeer {
                    share_id: 2,
                    p2p_addr: "tcp://10.0.0.2:2222".to_string(),
                },
                CosignerPeer {
                    share_id: 3,
                    p2p_addr: "tcp://10.0.0.3:2222".to_string(),
                },
            ],
            rpc_timeout: "1500ms".to_string(),
        }),
        ..single_signer_config(home)
    }
}
