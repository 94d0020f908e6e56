use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum WalletCommands {
    /// Generate a new keypair in the wallet directory
    New {
        /// Replace an existing keypair (also forgets trusted origins)
        #[arg(long)]
        force: bool,
    },

    /// Show the wallet's public key
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}
