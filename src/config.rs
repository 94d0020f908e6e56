use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::gate::IdentityGate;
use crate::model::AccountRef;
use crate::remote::{HttpInvoker, RemoteListStore};
use crate::view::PortalController;
use crate::wallet::{Approver, Keypair, KeypairWallet};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// Origin the wallet records when it trusts this client for silent reconnects.
pub const DEFAULT_ORIGIN: &str = "gif-portal";

/// List account compiled into the client. Override at build time with
/// `GIF_PORTAL_ACCOUNT`.
pub const DEFAULT_ACCOUNT: &str = match option_env!("GIF_PORTAL_ACCOUNT") {
    Some(account) => account,
    None => "5bd2c6ea0fe6e3f9b7c8e1bf0f3d4ad2f79bd5e0d3c8a4b13b2d7f0e36c9a1d4",
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(format!(
                "unknown commitment `{}` (expected processed|confirmed|finalized)",
                other
            )),
        }
    }
}

/// Everything the client needs to reach the list; constructed once and passed in.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub rpc_url: String,
    pub account: AccountRef,
    pub account_keypair: Option<PathBuf>,
    pub commitment: Commitment,
    pub wallet_dir: PathBuf,
    pub origin: String,
}

impl PortalConfig {
    pub fn new(rpc_url: impl Into<String>, account: AccountRef, wallet_dir: PathBuf) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            account,
            account_keypair: None,
            commitment: Commitment::default(),
            wallet_dir,
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    /// Loads the list account keypair, if one is configured. The account
    /// reference is then taken from the keypair so the two cannot disagree.
    pub fn load_account_keypair(&mut self) -> anyhow::Result<Option<Keypair>> {
        let Some(path) = self.account_keypair.as_deref() else {
            return Ok(None);
        };
        let keypair = Keypair::read_file(path)?;
        self.account = AccountRef(keypair.public_hex());
        Ok(Some(keypair))
    }

    /// Wires wallet, invoker and store together. A missing wallet is not an
    /// error here; the gate starts in its no-provider state instead.
    pub fn build_controller<A: Approver>(
        &mut self,
        approver: A,
    ) -> anyhow::Result<PortalController<A>> {
        let account_keypair = self
            .load_account_keypair()
            .context("load list account keypair")?;
        let wallet = KeypairWallet::detect(&self.wallet_dir, self.origin.clone(), approver)
            .with_context(|| format!("open wallet in {}", self.wallet_dir.display()))?;
        let invoker = HttpInvoker::new(self.rpc_url.clone(), self.commitment)?;

        let mut store = RemoteListStore::new(invoker, self.account.clone());
        if let Some(keypair) = account_keypair {
            store = store.with_account_keypair(keypair);
        }
        Ok(PortalController::new(IdentityGate::new(wallet), store))
    }
}

/// `$HOME/.config/gif-portal/wallet`, or `./.gif-portal/wallet` without a home.
pub fn default_wallet_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(".config").join("gif-portal").join("wallet"),
        None => PathBuf::from(".gif-portal").join("wallet"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
