//! Wallet capability: connect (optionally silent) and sign.

use std::future::Future;

use crate::model::Identity;

mod approval;
mod keypair;
mod keypair_wallet;

pub use self::approval::{
    ApprovalPrompt, ApprovalRequest, Approver, AutoApprove, ChannelApprover,
};
pub use self::keypair::{Keypair, verify_hex};
pub use self::keypair_wallet::{KEYPAIR_FILE, KeypairWallet, TRUSTED_FILE, create_wallet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Succeed only if this origin was approved before; never prompt.
    pub only_if_trusted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectResponse {
    pub public_key: Identity,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("wallet has not approved this client yet")]
    NotTrusted,

    #[error("request rejected in wallet")]
    UserRejected,

    #[error("wallet does not hold the key for {0}")]
    UnknownAccount(Identity),

    #[error("wallet keystore: {0}")]
    Keystore(String),
}

pub trait WalletProvider: Send + Sync + 'static {
    fn connect(
        &self,
        opts: ConnectOptions,
    ) -> impl Future<Output = Result<ConnectResponse, WalletError>> + Send;

    /// Signs `message` for `identity`. `summary` is what the user is asked to approve.
    fn sign_message(
        &self,
        identity: &Identity,
        message: &[u8],
        summary: &str,
    ) -> impl Future<Output = Result<String, WalletError>> + Send;
}
