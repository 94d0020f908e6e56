use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::model::{AccountRef, EntryId, Identity};
use crate::wallet::WalletError;

mod http_client;
pub use self::http_client::HttpInvoker;

mod types;
pub use self::types::*;

pub mod store;
pub use self::store::{InitializeOutcome, RemoteListStore};

/// Owner of every account the ledger creates.
pub const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";

/// The three entry points of the list program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "args", rename_all = "snake_case")]
pub enum ProgramCall {
    CreateList,
    AppendEntry {
        link: String,
    },
    IncrementUpvote {
        index: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entry_id: Option<EntryId>,
    },
}

impl ProgramCall {
    pub fn method(&self) -> &'static str {
        match self {
            ProgramCall::CreateList => "create_list",
            ProgramCall::AppendEntry { .. } => "append_entry",
            ProgramCall::IncrementUpvote { .. } => "increment_upvote",
        }
    }

    /// One line shown to the user when the wallet asks for approval.
    pub fn summary(&self) -> String {
        match self {
            ProgramCall::CreateList => "create the shared list account".to_string(),
            ProgramCall::AppendEntry { link } => format!("append {}", link),
            ProgramCall::IncrementUpvote { index, .. } => format!("upvote entry #{}", index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// An unsigned program call; its JSON encoding is the message every signer signs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub call: ProgramCall,
    pub accounts: Vec<AccountMeta>,
    pub payer: Identity,
}

impl Invocation {
    pub fn message(&self) -> Result<Vec<u8>, RemoteError> {
        serde_json::to_vec(self).map_err(|err| RemoteError::Encode(err.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub signer: String,
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedInvocation {
    pub invocation: Invocation,
    pub signatures: Vec<SignatureEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("rpc transport: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed rpc response: {0}")]
    Malformed(String),

    #[error("encode invocation: {0}")]
    Encode(String),
}

/// Failure of a write (initialize, append, upvote), returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("no wallet connected")]
    NotConnected,

    #[error("you must enter a link first")]
    EmptyLink,

    #[error("no entry at position {index} (list has {len})")]
    NoSuchEntry { index: usize, len: usize },

    #[error("wallet: {0}")]
    Signing(#[from] WalletError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("wallet disconnected before the write settled")]
    SessionEnded,
}

/// Remote procedure invoker for the list program.
pub trait ProgramInvoker: Send + Sync + 'static {
    /// `Ok(None)` when the account holds no storage.
    fn fetch_account(
        &self,
        account: &AccountRef,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, RemoteError>> + Send;

    fn invoke(
        &self,
        invocation: &SignedInvocation,
    ) -> impl Future<Output = Result<TxReceipt, RemoteError>> + Send;
}

/// A connected identity able to sign program calls.
pub trait Authority: Send + Sync {
    fn identity(&self) -> &Identity;

    fn sign(
        &self,
        message: &[u8],
        summary: &str,
    ) -> impl Future<Output = Result<String, WalletError>> + Send;

    /// False once the session this authority belongs to has ended.
    fn is_live(&self) -> bool;
}
