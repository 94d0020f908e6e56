use std::fmt;
use std::fs;
use std::path::Path;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use super::WalletError;
use crate::model::Identity;

/// ed25519 keypair stored as a JSON array of 64 bytes (seed then public key).
#[derive(Clone)]
pub struct Keypair {
    signing: SigningKey,
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public", &self.public_hex())
            .finish_non_exhaustive()
    }
}

impl Keypair {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(&seed),
        }
    }

    pub fn generate() -> Result<Self, WalletError> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed)
            .map_err(|err| WalletError::Keystore(format!("os randomness: {}", err)))?;
        Ok(Self::from_seed(seed))
    }

    pub fn public_hex(&self) -> String {
        hex::encode(self.signing.verifying_key().as_bytes())
    }

    pub fn identity(&self) -> Identity {
        Identity(self.public_hex())
    }

    pub fn sign_hex(&self, message: &[u8]) -> String {
        hex::encode(self.signing.sign(message).to_bytes())
    }

    pub fn read_file(path: &Path) -> Result<Self, WalletError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| WalletError::Keystore(format!("read {}: {}", path.display(), err)))?;
        let bytes: Vec<u8> = serde_json::from_str(&raw)
            .map_err(|err| WalletError::Keystore(format!("parse {}: {}", path.display(), err)))?;
        let bytes: [u8; 64] = bytes.try_into().map_err(|v: Vec<u8>| {
            WalletError::Keystore(format!(
                "{}: expected 64 bytes, found {}",
                path.display(),
                v.len()
            ))
        })?;
        let signing = SigningKey::from_keypair_bytes(&bytes).map_err(|_| {
            WalletError::Keystore(format!(
                "{}: public key does not match secret",
                path.display()
            ))
        })?;
        Ok(Self { signing })
    }

    pub fn write_file(&self, path: &Path) -> Result<(), WalletError> {
        let bytes = self.signing.to_keypair_bytes().to_vec();
        let json = serde_json::to_string(&bytes)
            .map_err(|err| WalletError::Keystore(format!("encode keypair: {}", err)))?;
        write_atomic(path, json.as_bytes())
    }
}

/// Checks a hex signature produced by [`Keypair::sign_hex`] against `identity`.
pub fn verify_hex(identity: &Identity, message: &[u8], signature: &str) -> bool {
    let Some(public) = decode_array::<32>(identity.as_str()) else {
        return false;
    };
    let Some(sig) = decode_array::<64>(signature) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&public) else {
        return false;
    };
    key.verify(message, &Signature::from_bytes(&sig)).is_ok()
}

fn decode_array<const N: usize>(s: &str) -> Option<[u8; N]> {
    hex::decode(s).ok()?.try_into().ok()
}

pub(super) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WalletError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| WalletError::Keystore(format!("create {}: {}", parent.display(), err)))?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes)
        .map_err(|err| WalletError::Keystore(format!("write {}: {}", tmp.display(), err)))?;
    fs::rename(&tmp, path).map_err(|err| {
        WalletError::Keystore(format!(
            "rename {} -> {}: {}",
            tmp.display(),
            path.display(),
            err
        ))
    })
}
