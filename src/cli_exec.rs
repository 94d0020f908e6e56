use anyhow::{Context, Result};

use gif_portal::config::PortalConfig;
use gif_portal::model::ListSnapshot;
use gif_portal::view::PortalController;

use crate::{Commands, WalletCommands};

mod list;
mod prompt;
mod wallet;

use self::prompt::CliApprover;

pub(super) fn handle_command(config: PortalConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Wallet { command } => match command {
            WalletCommands::New { force } => wallet::wallet_new(&config, force),
            WalletCommands::Show { json } => wallet::wallet_show(&config, json),
        },
        Commands::List { json } => block_on(list::list(config, json)),
        Commands::Init { yes } => block_on(list::init(config, yes)),
        Commands::Submit { link, yes } => block_on(list::submit(config, link, yes)),
        Commands::Upvote { position, yes } => block_on(list::upvote(config, position, yes)),
    }
}

fn block_on<F: std::future::Future<Output = Result<()>>>(fut: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime.block_on(fut)
}

/// Builds the controller and opens a session: silently when this origin is
/// trusted, otherwise through the approver.
async fn connect(
    mut config: PortalConfig,
    yes: bool,
) -> Result<(PortalController<CliApprover>, ListSnapshot)> {
    let approver = if yes {
        CliApprover::Auto
    } else {
        CliApprover::Prompt
    };
    let controller = config.build_controller(approver)?;
    let snapshot = match controller.startup().await.context("connect wallet")? {
        Some(snapshot) => snapshot,
        None => controller.connect().await.context("connect wallet")?,
    };
    Ok((controller, snapshot))
}

fn require_list(account: &str, snapshot: &ListSnapshot) -> Result<()> {
    match snapshot {
        ListSnapshot::Resolved(_) => Ok(()),
        ListSnapshot::NotFound => anyhow::bail!(
            "list account {} is not initialized (run `gif-portal init --account-keypair ...`)",
            account
        ),
        ListSnapshot::Unavailable { reason } => {
            anyhow::bail!("could not load list account {}: {}", account, reason)
        }
        ListSnapshot::Unknown => anyhow::bail!("wallet disconnected"),
    }
}
