//! Wallet-connection state machine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::model::Identity;
use crate::remote::Authority;
use crate::wallet::{ConnectOptions, WalletError, WalletProvider};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    /// No wallet was detected at startup.
    NoProvider,
    Disconnected,
    /// Silent reconnect in flight.
    AutoConnecting,
    /// Interactive approval in flight.
    Connecting,
    Connected(Identity),
}

impl GateState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            GateState::Connected(identity) => Some(identity),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("no wallet found; create one with `gif-portal wallet new`")]
    NoProvider,

    #[error("cannot connect while {0:?}")]
    Busy(GateState),

    #[error("disconnected before the wallet answered")]
    Superseded,

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

pub struct IdentityGate<W> {
    provider: Option<Arc<W>>,
    state: Mutex<GateState>,
    epoch: Arc<AtomicU64>,
}

impl<W: WalletProvider> IdentityGate<W> {
    pub fn new(provider: Option<W>) -> Self {
        let state = if provider.is_some() {
            GateState::Disconnected
        } else {
            GateState::NoProvider
        };
        Self {
            provider: provider.map(Arc::new),
            state: Mutex::new(state),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> GateState {
        self.lock().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.lock().identity().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Moves `Disconnected` into `pending`, returning the provider and the
    /// epoch the attempt belongs to.
    fn begin(&self, pending: GateState) -> Result<(Arc<W>, u64), GateError> {
        let Some(provider) = self.provider.clone() else {
            return Err(GateError::NoProvider);
        };
        let mut state = self.lock();
        if *state != GateState::Disconnected {
            return Err(GateError::Busy(state.clone()));
        }
        *state = pending;
        Ok((provider, self.epoch.load(Ordering::SeqCst)))
    }

    /// Settles an attempt started by [`Self::begin`], unless a disconnect
    /// happened in between.
    fn finish(
        &self,
        epoch: u64,
        result: Result<Identity, WalletError>,
    ) -> Result<Identity, GateError> {
        let mut state = self.lock();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return Err(GateError::Superseded);
        }
        match result {
            Ok(identity) => {
                *state = GateState::Connected(identity.clone());
                info!(identity = %identity, "wallet connected");
                Ok(identity)
            }
            Err(err) => {
                *state = GateState::Disconnected;
                Err(err.into())
            }
        }
    }

    /// Silent reconnect at startup. `Ok(None)` means the wallet has not trusted
    /// this client yet; the gate stays `Disconnected`.
    pub async fn probe_trusted_session(&self) -> Result<Option<Identity>, GateError> {
        let (provider, epoch) = self.begin(GateState::AutoConnecting)?;
        let result = provider
            .connect(ConnectOptions {
                only_if_trusted: true,
            })
            .await
            .map(|resp| resp.public_key);
        match self.finish(epoch, result) {
            Ok(identity) => Ok(Some(identity)),
            Err(GateError::Wallet(WalletError::NotTrusted)) => {
                info!("no trusted wallet session");
                Ok(None)
            }
            Err(err) => {
                warn!(error = %err, "silent wallet reconnect failed");
                Err(err)
            }
        }
    }

    /// Interactive connect; only valid from `Disconnected`. Not retried.
    pub async fn connect(&self) -> Result<Identity, GateError> {
        let (provider, epoch) = self.begin(GateState::Connecting)?;
        let result = provider
            .connect(ConnectOptions::default())
            .await
            .map(|resp| resp.public_key);
        self.finish(epoch, result).inspect_err(|err| {
            warn!(error = %err, "wallet connect failed");
        })
    }

    /// Ends the session. Attempts and writes still in flight lose their result.
    /// Returns false if there was nothing to end.
    pub fn disconnect(&self) -> bool {
        let mut state = self.lock();
        match *state {
            GateState::NoProvider | GateState::Disconnected => false,
            _ => {
                self.epoch.fetch_add(1, Ordering::SeqCst);
                *state = GateState::Disconnected;
                info!("wallet disconnected");
                true
            }
        }
    }

    pub fn session(&self) -> Option<Session<W>> {
        let state = self.lock();
        let identity = state.identity()?.clone();
        let wallet = self.provider.clone()?;
        Some(Session {
            identity,
            wallet,
            epoch: self.epoch.load(Ordering::SeqCst),
            current_epoch: self.epoch.clone(),
        })
    }
}

/// A connected identity, valid until the gate's next disconnect.
pub struct Session<W> {
    identity: Identity,
    wallet: Arc<W>,
    epoch: u64,
    current_epoch: Arc<AtomicU64>,
}

impl<W> Clone for Session<W> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            wallet: self.wallet.clone(),
            epoch: self.epoch,
            current_epoch: self.current_epoch.clone(),
        }
    }
}

impl<W: WalletProvider> Authority for Session<W> {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    async fn sign(&self, message: &[u8], summary: &str) -> Result<String, WalletError> {
        self.wallet
            .sign_message(&self.identity, message, summary)
            .await
    }

    fn is_live(&self) -> bool {
        self.current_epoch.load(Ordering::SeqCst) == self.epoch
    }
}

#[cfg(test)]
#[path = "tests/gate_tests.rs"]
mod tests;
