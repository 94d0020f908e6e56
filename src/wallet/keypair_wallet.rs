use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::keypair::write_atomic;
use super::{
    ApprovalRequest, Approver, ConnectOptions, ConnectResponse, Keypair, WalletError,
    WalletProvider,
};
use crate::model::Identity;

pub const KEYPAIR_FILE: &str = "id.json";
pub const TRUSTED_FILE: &str = "trusted.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct TrustedOrigins {
    #[serde(default)]
    origins: Vec<String>,
}

/// A wallet backed by a keypair file, with trusted origins persisted next to it.
#[derive(Debug)]
pub struct KeypairWallet<A> {
    dir: PathBuf,
    origin: String,
    keypair: Keypair,
    approver: A,
}

impl<A: Approver> KeypairWallet<A> {
    /// Returns `None` when the directory holds no keypair, i.e. no wallet is installed.
    pub fn detect(
        dir: &Path,
        origin: impl Into<String>,
        approver: A,
    ) -> Result<Option<Self>, WalletError> {
        let path = dir.join(KEYPAIR_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no wallet keypair");
            return Ok(None);
        }
        let keypair = Keypair::read_file(&path)?;
        Ok(Some(Self {
            dir: dir.to_path_buf(),
            origin: origin.into(),
            keypair,
            approver,
        }))
    }

    pub fn identity(&self) -> Identity {
        self.keypair.identity()
    }

    fn trusted_path(&self) -> PathBuf {
        self.dir.join(TRUSTED_FILE)
    }

    fn read_trusted(&self) -> Result<TrustedOrigins, WalletError> {
        let path = self.trusted_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(TrustedOrigins::default());
            }
            Err(err) => {
                return Err(WalletError::Keystore(format!(
                    "read {}: {}",
                    path.display(),
                    err
                )));
            }
        };
        serde_json::from_str(&raw)
            .map_err(|err| WalletError::Keystore(format!("parse {}: {}", path.display(), err)))
    }

    fn is_trusted(&self) -> Result<bool, WalletError> {
        Ok(self.read_trusted()?.origins.contains(&self.origin))
    }

    fn trust_origin(&self) -> Result<(), WalletError> {
        let mut trusted = self.read_trusted()?;
        if trusted.origins.contains(&self.origin) {
            return Ok(());
        }
        trusted.origins.push(self.origin.clone());
        let json = serde_json::to_vec_pretty(&trusted)
            .map_err(|err| WalletError::Keystore(format!("encode trusted origins: {}", err)))?;
        write_atomic(&self.trusted_path(), &json)
    }
}

impl<A: Approver> WalletProvider for KeypairWallet<A> {
    async fn connect(&self, opts: ConnectOptions) -> Result<ConnectResponse, WalletError> {
        let identity = self.identity();
        if self.is_trusted()? {
            return Ok(ConnectResponse {
                public_key: identity,
            });
        }
        if opts.only_if_trusted {
            return Err(WalletError::NotTrusted);
        }

        let request = ApprovalRequest::Connect {
            origin: self.origin.clone(),
            identity: identity.clone(),
        };
        if !self.approver.approve(request).await {
            return Err(WalletError::UserRejected);
        }
        self.trust_origin()?;
        info!(origin = %self.origin, "wallet trusted origin");
        Ok(ConnectResponse {
            public_key: identity,
        })
    }

    async fn sign_message(
        &self,
        identity: &Identity,
        message: &[u8],
        summary: &str,
    ) -> Result<String, WalletError> {
        if *identity != self.identity() {
            return Err(WalletError::UnknownAccount(identity.clone()));
        }
        let request = ApprovalRequest::Sign {
            origin: self.origin.clone(),
            identity: identity.clone(),
            summary: summary.to_string(),
        };
        if !self.approver.approve(request).await {
            return Err(WalletError::UserRejected);
        }
        Ok(self.keypair.sign_hex(message))
    }
}

/// Generates a keypair in `dir`. Refuses to overwrite one unless `force` is set.
pub fn create_wallet(dir: &Path, force: bool) -> Result<Keypair, WalletError> {
    let path = dir.join(KEYPAIR_FILE);
    if path.exists() && !force {
        return Err(WalletError::Keystore(format!(
            "{} already exists (use --force to replace it)",
            path.display()
        )));
    }
    let keypair = Keypair::generate()?;
    keypair.write_file(&path)?;
    let trusted = dir.join(TRUSTED_FILE);
    if force && trusted.exists() {
        fs::remove_file(&trusted).map_err(|err| {
            WalletError::Keystore(format!("remove {}: {}", trusted.display(), err))
        })?;
    }
    Ok(keypair)
}

#[cfg(test)]
#[path = "../tests/wallet/keypair_wallet_tests.rs"]
mod tests;
