use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser};

use gif_portal::config::{
    Commitment, DEFAULT_ACCOUNT, DEFAULT_ORIGIN, DEFAULT_RPC_URL, PortalConfig,
    default_wallet_dir,
};
use gif_portal::logging::{self, LogTarget};
use gif_portal::model::AccountRef;

use crate::Commands;

#[derive(Parser)]
#[command(name = "gif-portal")]
#[command(about = "Shared GIF list gated by a wallet", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Write logs here (the TUI logs nowhere otherwise; subcommands log to stderr)
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// JSON-RPC endpoint of the ledger node
    #[arg(long = "rpc-url", value_name = "URL", global = true, default_value = DEFAULT_RPC_URL)]
    rpc_url: String,

    /// List account to read and write
    #[arg(long, value_name = "PUBKEY", global = true, default_value = DEFAULT_ACCOUNT)]
    account: String,

    /// Keypair file of the list account; required by `init`, overrides --account
    #[arg(long = "account-keypair", value_name = "PATH", global = true)]
    account_keypair: Option<PathBuf>,

    /// Commitment level for reads and writes (processed|confirmed|finalized)
    #[arg(long, global = true, default_value = "confirmed")]
    commitment: Commitment,

    /// Directory holding the wallet keypair (default: ~/.config/gif-portal/wallet)
    #[arg(long = "wallet-dir", value_name = "DIR", global = true)]
    wallet_dir: Option<PathBuf>,

    /// Origin name the wallet trusts for silent reconnects
    #[arg(long, global = true, default_value = DEFAULT_ORIGIN)]
    origin: String,
}

impl GlobalArgs {
    fn into_config(self) -> PortalConfig {
        let wallet_dir = self.wallet_dir.unwrap_or_else(default_wallet_dir);
        let mut config = PortalConfig::new(self.rpc_url, AccountRef(self.account), wallet_dir);
        config.account_keypair = self.account_keypair;
        config.commitment = self.commitment;
        config.origin = self.origin;
        config
    }
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.global.into_config();

    match cli.command {
        None => {
            let target = match cli.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            };
            logging::init(target)?;
            gif_portal::tui::run(gif_portal::tui::TuiRunOptions { config })?;
        }
        Some(command) => {
            let target = match cli.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Stderr,
            };
            logging::init(target)?;
            crate::cli_exec::handle_command(config, command)?
        }
    }

    Ok(())
}
