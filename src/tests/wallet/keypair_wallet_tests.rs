use std::sync::Mutex;

use super::*;
use crate::wallet::{AutoApprove, ChannelApprover, verify_hex};

struct Scripted {
    answer: bool,
    seen: Mutex<Vec<ApprovalRequest>>,
}

impl Scripted {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Approver for Scripted {
    async fn approve(&self, request: ApprovalRequest) -> bool {
        self.seen.lock().unwrap().push(request);
        self.answer
    }
}

#[test]
fn detect_without_keypair_reports_no_wallet() {
    let dir = tempfile::tempdir().unwrap();
    let wallet = KeypairWallet::detect(dir.path(), "test", AutoApprove).unwrap();
    assert!(wallet.is_none());
}

#[test]
fn detect_rejects_corrupt_keypair() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(KEYPAIR_FILE), "[1,2,3]").unwrap();
    let err = KeypairWallet::detect(dir.path(), "test", AutoApprove).unwrap_err();
    assert!(matches!(err, WalletError::Keystore(_)));
}

#[tokio::test]
async fn silent_connect_requires_prior_trust() {
    let dir = tempfile::tempdir().unwrap();
    create_wallet(dir.path(), false).unwrap();
    let wallet = KeypairWallet::detect(dir.path(), "test", Scripted::new(true))
        .unwrap()
        .unwrap();

    let silent = ConnectOptions {
        only_if_trusted: true,
    };
    assert_eq!(wallet.connect(silent).await, Err(WalletError::NotTrusted));
    assert!(wallet.approver.seen.lock().unwrap().is_empty());

    let resp = wallet.connect(ConnectOptions::default()).await.unwrap();
    assert_eq!(resp.public_key, wallet.identity());
    assert_eq!(wallet.approver.seen.lock().unwrap().len(), 1);

    // Trust is persisted, so a fresh process reconnects without a prompt.
    let again = KeypairWallet::detect(dir.path(), "test", Scripted::new(false))
        .unwrap()
        .unwrap();
    assert_eq!(again.connect(silent).await.unwrap().public_key, resp.public_key);
    assert!(again.approver.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rejected_connect_does_not_trust() {
    let dir = tempfile::tempdir().unwrap();
    create_wallet(dir.path(), false).unwrap();
    let wallet = KeypairWallet::detect(dir.path(), "test", Scripted::new(false))
        .unwrap()
        .unwrap();

    assert_eq!(
        wallet.connect(ConnectOptions::default()).await,
        Err(WalletError::UserRejected)
    );
    assert!(!dir.path().join(TRUSTED_FILE).exists());
}

#[tokio::test]
async fn signatures_verify_against_identity() {
    let dir = tempfile::tempdir().unwrap();
    create_wallet(dir.path(), false).unwrap();
    let wallet = KeypairWallet::detect(dir.path(), "test", AutoApprove)
        .unwrap()
        .unwrap();
    let identity = wallet.identity();

    let sig = wallet
        .sign_message(&identity, b"append_entry", "append a.gif")
        .await
        .unwrap();
    assert!(verify_hex(&identity, b"append_entry", &sig));
    assert!(!verify_hex(&identity, b"something else", &sig));

    let stranger = Identity("00".repeat(32));
    assert_eq!(
        wallet.sign_message(&stranger, b"x", "x").await,
        Err(WalletError::UnknownAccount(stranger.clone()))
    );
}

#[tokio::test]
async fn channel_approver_forwards_prompts() {
    let dir = tempfile::tempdir().unwrap();
    create_wallet(dir.path(), false).unwrap();
    let (approver, mut prompts) = ChannelApprover::new();
    let wallet = KeypairWallet::detect(dir.path(), "test", approver)
        .unwrap()
        .unwrap();

    let answer = tokio::spawn(async move {
        let prompt = prompts.recv().await.unwrap();
        assert!(matches!(prompt.request, ApprovalRequest::Connect { .. }));
        prompt.answer(false);
    });

    assert_eq!(
        wallet.connect(ConnectOptions::default()).await,
        Err(WalletError::UserRejected)
    );
    answer.await.unwrap();
}

#[test]
fn create_wallet_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let first = create_wallet(dir.path(), false).unwrap();
    assert!(create_wallet(dir.path(), false).is_err());

    let replaced = create_wallet(dir.path(), true).unwrap();
    assert_ne!(first.public_hex(), replaced.public_hex());
    let loaded = Keypair::read_file(&dir.path().join(KEYPAIR_FILE)).unwrap();
    assert_eq!(loaded.public_hex(), replaced.public_hex());
}
