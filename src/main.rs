use clap::Subcommand;

mod cli_exec;
mod cli_runtime;
mod cli_subcommands;

pub(crate) use cli_subcommands::WalletCommands;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the list (connects the wallet first)
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the list account; only needed once per account
    Init {
        /// Approve wallet prompts without asking
        #[arg(long)]
        yes: bool,
    },

    /// Add a GIF link to the list
    Submit {
        link: String,
        /// Approve wallet prompts without asking
        #[arg(long)]
        yes: bool,
    },

    /// Upvote an entry by its position as printed by `list` (1-based)
    Upvote {
        position: usize,
        /// Approve wallet prompts without asking
        #[arg(long)]
        yes: bool,
    },

    /// Manage the local keypair wallet
    Wallet {
        #[command(subcommand)]
        command: WalletCommands,
    },
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
