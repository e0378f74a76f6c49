//! CLI command implementations.
//!
//! Each command returns the text to print; `main` writes it to stdout.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use web3peek_client::{probe, Client, ClientConfig, ClientError};
use web3peek_types::BlockId;

use crate::config::CliConfig;
use crate::output::{self, AccountBalance, NetworkInfo};

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "web3peek")]
#[command(about = "Check a local node and print its latest block and accounts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// RPC endpoint URL
    #[arg(short, long, global = true, env = "WEB3PEEK_RPC_URL")]
    pub rpc: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file (defaults to ~/.web3peek/config.toml)
    #[arg(long, global = true, value_name = "FILE", env = "WEB3PEEK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log filter directive, e.g. "debug" or "web3peek_client=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Defaults to `probe`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Check connectivity, then print the latest block and the node's accounts
    Probe,

    /// Print whether the node answers
    Status,

    /// Print a block
    Block {
        /// Block number (decimal or 0x hex) or tag: latest, earliest, pending, safe, finalized
        #[arg(default_value = "latest")]
        id: BlockId,

        /// Include full transaction objects
        #[arg(long)]
        full: bool,
    },

    /// List the accounts the node exposes
    Accounts {
        /// Also fetch each account's balance
        #[arg(short, long)]
        balances: bool,
    },

    /// Client version, chain id, network id and head block number
    Network,

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Commands {
    /// Commands that overwrite the config file. They run even when it does not parse.
    pub fn rewrites_config(&self) -> bool {
        matches!(
            self,
            Commands::Config(ConfigCommands::SetRpc { .. } | ConfigCommands::Reset)
        )
    }
}

/// Config commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommands {
    /// Show the effective configuration file
    Show,
    /// Set the default RPC endpoint
    SetRpc {
        /// RPC endpoint URL
        url: String,
    },
    /// Restore defaults
    Reset,
}

/// Resolved settings shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub client_config: ClientConfig,
    pub json: bool,
    pub config_path: PathBuf,
    pub config: CliConfig,
}

impl Context {
    /// Load the config file and apply flag/env overrides.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => CliConfig::default_path()?,
        };
        let config = match CliConfig::load_from(&config_path) {
            Ok(config) => config,
            Err(e) if cli.command.as_ref().is_some_and(Commands::rewrites_config) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "unreadable config file, starting from defaults"
                );
                CliConfig::default()
            }
            Err(e) => return Err(e),
        };
        let client_config = config.client_config(cli.rpc.as_deref(), cli.timeout);

        tracing::debug!(
            url = %client_config.url,
            timeout = ?client_config.timeout,
            config = %config_path.display(),
            "resolved settings"
        );

        Ok(Self {
            client_config,
            json: cli.json,
            config_path,
            config,
        })
    }

    fn client(&self) -> anyhow::Result<Client> {
        Ok(Client::with_config(self.client_config.clone())?)
    }
}

/// Execute a command and return its output.
pub async fn execute(command: Commands, ctx: &Context) -> anyhow::Result<String> {
    match command {
        Commands::Probe => run_probe(ctx).await,
        Commands::Status => run_status(ctx).await,
        Commands::Block { id, full } => run_block(ctx, id, full).await,
        Commands::Accounts { balances } => run_accounts(ctx, balances).await,
        Commands::Network => run_network(ctx).await,
        Commands::Config(cmd) => run_config(ctx, cmd),
    }
}

fn json_line<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(format!("{}\n", output::to_json(value)?))
}

async fn run_probe(ctx: &Context) -> anyhow::Result<String> {
    let client = ctx.client()?;
    let report = probe(&client)
        .await
        .with_context(|| format!("probe of {} failed", client.url()))?;

    if ctx.json {
        json_line(&report)
    } else {
        Ok(output::render_probe(client.url(), &report))
    }
}

async fn run_status(ctx: &Context) -> anyhow::Result<String> {
    let client = ctx.client()?;
    let connected = client.is_connected().await;

    if ctx.json {
        json_line(&serde_json::json!({ "url": client.url(), "connected": connected }))
    } else {
        Ok(output::render_connected(client.url(), connected))
    }
}

async fn run_block(ctx: &Context, id: BlockId, full: bool) -> anyhow::Result<String> {
    let client = ctx.client()?;
    let block = client
        .get_block(id, full)
        .await?
        .ok_or(ClientError::BlockNotFound(id))?;

    if ctx.json {
        json_line(&block)
    } else {
        Ok(output::render_block(&block))
    }
}

async fn run_accounts(ctx: &Context, balances: bool) -> anyhow::Result<String> {
    let client = ctx.client()?;
    let accounts = client.accounts().await?;

    if !balances {
        return if ctx.json {
            json_line(&accounts)
        } else {
            Ok(output::render_accounts(&accounts))
        };
    }

    let mut rows = Vec::with_capacity(accounts.len());
    for address in accounts {
        let balance = client
            .get_balance(&address, BlockId::Latest)
            .await
            .with_context(|| format!("failed to fetch balance of {}", address))?;
        rows.push(AccountBalance { address, balance });
    }

    if ctx.json {
        json_line(&rows)
    } else {
        Ok(output::render_balances(&rows))
    }
}

async fn run_network(ctx: &Context) -> anyhow::Result<String> {
    let client = ctx.client()?;

    let info = NetworkInfo {
        client_version: client.client_version().await?,
        chain_id: client.chain_id().await?,
        network_id: client.net_version().await?,
        block_number: client.block_number().await?,
    };

    if ctx.json {
        json_line(&info)
    } else {
        Ok(output::render_network(&info))
    }
}

fn run_config(ctx: &Context, cmd: ConfigCommands) -> anyhow::Result<String> {
    match cmd {
        ConfigCommands::Show => {
            if ctx.json {
                json_line(&ctx.config)
            } else {
                Ok(format!(
                    "# {}\n{}",
                    ctx.config_path.display(),
                    toml::to_string_pretty(&ctx.config)?
                ))
            }
        }
        ConfigCommands::SetRpc { url } => {
            // Reject anything the client would refuse later.
            Client::new(url.as_str())?;

            let mut config = ctx.config.clone();
            config.rpc_url = url.clone();
            config.save_to(&ctx.config_path)?;
            tracing::info!(path = %ctx.config_path.display(), %url, "saved rpc endpoint");
            Ok(output::success(&format!("RPC endpoint set to {}", url)))
        }
        ConfigCommands::Reset => {
            CliConfig::default().save_to(&ctx.config_path)?;
            Ok(output::success(&format!(
                "Configuration reset ({})",
                ctx.config_path.display()
            )))
        }
    }
}
