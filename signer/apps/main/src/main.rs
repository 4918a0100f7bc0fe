use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use global_utils::home_path::HomePath;
use global_utils::logger::init_logger;
use signer_config::address;
use signer_config::config::{Config, CosignerConfig};
use signer_config::store;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "signer", version, about = "Threshold validator signer")]
struct Cli {
    /// Signer home directory (defaults to $SIGNER_HOME, then ~/.signer)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Commands to configure the signer
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Initialize the configuration file and home directory
    #[command(alias = "i")]
    Init(InitArgs),
    /// Commands to configure the chain nodes
    #[command(subcommand)]
    Nodes(NodesCommand),
    /// Commands to configure the cosigner peers
    #[command(subcommand)]
    Peers(PeersCommand),
    /// Commands to configure the chain id
    #[command(subcommand)]
    ChainId(ChainIdCommand),
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Chain id of the chain to validate, e.g. cosmoshub-4
    chain_id: String,

    /// Comma separated chain node addresses, e.g.
    /// tcp://chain-node-1:1234,tcp://chain-node-2:1234
    chain_nodes: Option<String>,

    /// Initialize a cosigner node, requires --peers and --threshold
    #[arg(short, long)]
    cosigner: bool,

    /// Cosigner peers in <address>|<share-id> form, e.g.
    /// "tcp://node-1:2222|2,tcp://node-2:2222|3"
    #[arg(short, long, required_if_eq("cosigner", "true"))]
    peers: Option<String>,

    /// Number of signatures required to produce a valid threshold signature
    #[arg(short, long, required_if_eq("cosigner", "true"))]
    threshold: Option<u16>,

    /// Listen address of the cosigner rpc server
    #[arg(short, long, default_value = "tcp://0.0.0.0:2222")]
    listen: String,

    /// Cosigner rpc server timeout, accepts duration strings like 1s or 1000ms
    #[arg(long, default_value = "1500ms")]
    timeout: String,
}

#[derive(Subcommand, Debug)]
enum NodesCommand {
    /// Add chain node(s) to the configuration
    #[command(alias = "a")]
    Add {
        /// Comma separated chain node addresses
        chain_nodes: String,
    },
    /// Remove chain node(s) from the configuration
    #[command(alias = "r")]
    Remove {
        /// Comma separated chain node addresses
        chain_nodes: String,
    },
}

#[derive(Subcommand, Debug)]
enum PeersCommand {
    /// Add cosigner peer(s) to the configuration
    #[command(alias = "a")]
    Add {
        /// Comma separated peers in <address>|<share-id> form
        peer_nodes: String,
    },
    /// Remove cosigner peer(s) from the configuration
    #[command(alias = "r")]
    Remove {
        /// Comma separated peers in <address>|<share-id> form
        peer_nodes: String,
    },
}

#[derive(Subcommand, Debug)]
enum ChainIdCommand {
    /// Set the chain id, e.g. cosmoshub-4
    #[command(alias = "id")]
    Set { chain_id: String },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let _logger_guard = init_logger();

    let cli = Cli::parse();
    let home = HomePath::resolve(cli.home).context("Failed to resolve the signer home directory")?;

    match cli.command {
        Command::Config(command) => run_config_command(&home.path, command),
    }
}

fn run_config_command(home: &Path, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init(args) => init(home, args),
        ConfigCommand::Nodes(NodesCommand::Add { chain_nodes }) => mutate(home, |config| {
            config.add_nodes(&chain_nodes)?;
            info!(nodes = config.chain_nodes.len(), "chain nodes added");
            Ok(())
        }),
        ConfigCommand::Nodes(NodesCommand::Remove { chain_nodes }) => mutate(home, |config| {
            config.remove_nodes(&chain_nodes)?;
            info!(nodes = config.chain_nodes.len(), "chain nodes removed");
            Ok(())
        }),
        ConfigCommand::Peers(PeersCommand::Add { peer_nodes }) => mutate(home, |config| {
            config.add_peers(&peer_nodes)?;
            info!(peers = config.cosigner_peers().len(), "cosigner peers added");
            Ok(())
        }),
        ConfigCommand::Peers(PeersCommand::Remove { peer_nodes }) => mutate(home, |config| {
            config.remove_peers(&peer_nodes)?;
            info!(peers = config.cosigner_peers().len(), "cosigner peers removed");
            Ok(())
        }),
        ConfigCommand::ChainId(ChainIdCommand::Set { chain_id }) => mutate(home, |config| {
            config.set_chain_id(&chain_id)?;
            info!(%chain_id, "chain id updated");
            Ok(())
        }),
    }
}

/// Every mutation follows the same shape: load the stored configuration,
/// transform it in memory, persist it in one write.
fn mutate(
    home: &Path,
    transform: impl FnOnce(&mut Config) -> signer_config::error::Result<()>,
) -> Result<()> {
    let mut config = store::load_config(home)?;
    transform(&mut config)?;
    store::save_config(&config)?;
    Ok(())
}

fn init(home: &Path, args: InitArgs) -> Result<()> {
    let chain_nodes = match args.chain_nodes.as_deref() {
        Some(arg) => address::chain_nodes_from_arg(arg)?,
        None => Vec::new(),
    };
    let cosigner = if args.cosigner {
        Some(CosignerConfig {
            threshold: args.threshold.unwrap_or_default(),
            p2p_listen: args.listen,
            peers: address::peers_from_arg(args.peers.as_deref().unwrap_or_default())?,
            rpc_timeout: args.timeout,
        })
    } else {
        None
    };

    let config = Config {
        home_dir: home.to_path_buf(),
        chain_id: args.chain_id,
        chain_nodes,
        cosigner,
    };
    store::init_home(&config).context("Failed to initialize the signer home")?;
    Ok(())
}
