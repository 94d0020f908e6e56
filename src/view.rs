//! Derives what the user can see and do from the gate and the list store.

use std::sync::{Mutex, MutexGuard};

use crate::gate::{GateError, GateState, IdentityGate};
use crate::model::{Entry, ListSnapshot};
use crate::remote::{
    HttpInvoker, InitializeOutcome, ProgramInvoker, RemoteListStore, WriteError,
};
use crate::wallet::{KeypairWallet, WalletProvider};

/// The controller the binary runs: keypair wallet over HTTP JSON-RPC.
pub type PortalController<A> = ViewController<KeypairWallet<A>, HttpInvoker>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unresolved {
    /// Connected, first fetch not settled yet.
    NotFetched,
    /// The account was never initialized.
    NotFound,
    /// The last fetch failed; retrying may help.
    Unavailable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    WalletMissing,
    GateClosed { connecting: bool },
    Unresolved(Unresolved),
    Resolved { entries: Vec<Entry>, input: String },
}

impl ViewState {
    pub fn offers_connect(&self) -> bool {
        matches!(self, ViewState::GateClosed { connecting: false })
    }

    pub fn offers_initialize(&self) -> bool {
        matches!(self, ViewState::Unresolved(Unresolved::NotFound))
    }

    pub fn offers_retry(&self) -> bool {
        matches!(
            self,
            ViewState::Unresolved(Unresolved::NotFetched | Unresolved::Unavailable(_))
        )
    }

    pub fn accepts_writes(&self) -> bool {
        matches!(self, ViewState::Resolved { .. })
    }
}

pub struct ViewController<W, I> {
    gate: IdentityGate<W>,
    store: RemoteListStore<I>,
    input: Mutex<String>,
}

impl<W: WalletProvider, I: ProgramInvoker> ViewController<W, I> {
    pub fn new(gate: IdentityGate<W>, store: RemoteListStore<I>) -> Self {
        Self {
            gate,
            store,
            input: Mutex::new(String::new()),
        }
    }

    pub fn gate(&self) -> &IdentityGate<W> {
        &self.gate
    }

    pub fn store(&self) -> &RemoteListStore<I> {
        &self.store
    }

    fn lock_input(&self) -> MutexGuard<'_, String> {
        self.input
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn input(&self) -> String {
        self.lock_input().clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        *self.lock_input() = text.into();
    }

    pub fn view(&self) -> ViewState {
        match self.gate.state() {
            GateState::NoProvider => ViewState::WalletMissing,
            GateState::Disconnected => ViewState::GateClosed { connecting: false },
            GateState::AutoConnecting | GateState::Connecting => {
                ViewState::GateClosed { connecting: true }
            }
            GateState::Connected(_) => match self.store.snapshot() {
                ListSnapshot::Resolved(entries) => ViewState::Resolved {
                    entries,
                    input: self.input(),
                },
                ListSnapshot::Unknown => ViewState::Unresolved(Unresolved::NotFetched),
                ListSnapshot::NotFound => ViewState::Unresolved(Unresolved::NotFound),
                ListSnapshot::Unavailable { reason } => {
                    ViewState::Unresolved(Unresolved::Unavailable(reason))
                }
            },
        }
    }

    /// Silent reconnect, then the first fetch if it worked.
    pub async fn startup(&self) -> Result<Option<ListSnapshot>, GateError> {
        match self.gate.probe_trusted_session().await? {
            Some(_) => Ok(self.fetch_if_connected().await),
            None => Ok(None),
        }
    }

    pub async fn connect(&self) -> Result<ListSnapshot, GateError> {
        self.gate.connect().await?;
        self.fetch_if_connected()
            .await
            .ok_or(GateError::Superseded)
    }

    async fn fetch_if_connected(&self) -> Option<ListSnapshot> {
        self.gate.session()?;
        Some(self.store.fetch().await)
    }

    pub fn disconnect(&self) -> bool {
        let ended = self.gate.disconnect();
        self.store.reset();
        self.lock_input().clear();
        ended
    }

    pub async fn refresh(&self) -> Result<ListSnapshot, WriteError> {
        self.gate.session().ok_or(WriteError::NotConnected)?;
        Ok(self.store.fetch().await)
    }

    pub async fn initialize(&self) -> Result<InitializeOutcome, WriteError> {
        let session = self.gate.session().ok_or(WriteError::NotConnected)?;
        Ok(self.store.initialize(&session).await)
    }

    /// Appends the pending input. An empty input is rejected and left as is;
    /// otherwise the input is cleared before the remote call and stays cleared
    /// whatever the outcome.
    pub async fn submit(&self) -> Result<ListSnapshot, WriteError> {
        let session = self.gate.session().ok_or(WriteError::NotConnected)?;
        let link = {
            let mut input = self.lock_input();
            if input.trim().is_empty() {
                return Err(WriteError::EmptyLink);
            }
            std::mem::take(&mut *input)
        };
        self.store.append(&session, &link).await
    }

    pub async fn upvote(&self, index: usize) -> Result<ListSnapshot, WriteError> {
        let session = self.gate.session().ok_or(WriteError::NotConnected)?;
        self.store.upvote(&session, index).await
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
