use super::*;
use crate::gate::IdentityGate;
use crate::test_support::{FakeProgram, FakeWallet, entry, store};

async fn connected(identity: &str) -> (FakeWallet, IdentityGate<FakeWallet>) {
    let wallet = FakeWallet::new(identity);
    let gate = IdentityGate::new(Some(wallet.clone()));
    gate.connect().await.unwrap();
    (wallet, gate)
}

#[tokio::test]
async fn fetch_distinguishes_absent_from_unavailable() {
    let program = FakeProgram::default();
    let store = store(&program);
    assert_eq!(store.snapshot(), ListSnapshot::Unknown);
    assert_eq!(store.fetch().await, ListSnapshot::NotFound);

    program.fail_fetches(Some(RemoteError::Transport("connection refused".into())));
    let snapshot = store.fetch().await;
    assert!(matches!(
        snapshot,
        ListSnapshot::Unavailable { ref reason } if reason.contains("connection refused")
    ));
    assert_eq!(store.snapshot(), snapshot);
}

#[tokio::test]
async fn repeated_fetch_without_writes_is_stable() {
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 2, Some(0))]);
    let store = store(&program);
    let first = store.fetch().await;
    let second = store.fetch().await;
    assert_eq!(first, second);
    assert_eq!(first.entries().unwrap()[0].upvotes, 2);
}

#[tokio::test]
async fn stale_fetch_never_replaces_newer_snapshot() {
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 0, Some(0))]);
    let store = std::sync::Arc::new(store(&program));

    let release = program.hold_next_fetch();
    let slow = tokio::spawn({
        let store = store.clone();
        async move { store.fetch().await }
    });
    while program.fetches() == 0 {
        tokio::task::yield_now().await;
    }

    program.external_append("b.gif", "Y");
    let fresh = store.fetch().await;
    assert_eq!(fresh.entries().unwrap().len(), 2);

    release.send(()).unwrap();
    let late = slow.await.unwrap();
    // The old response was read before b.gif existed; it must not win.
    assert_eq!(late, fresh);
    assert_eq!(store.snapshot().entries().unwrap().len(), 2);
}

#[tokio::test]
async fn reset_discards_fetches_in_flight() {
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 0, Some(0))]);
    let store = std::sync::Arc::new(store(&program));

    let release = program.hold_next_fetch();
    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.fetch().await }
    });
    while program.fetches() == 0 {
        tokio::task::yield_now().await;
    }
    store.reset();
    release.send(()).unwrap();

    assert_eq!(pending.await.unwrap(), ListSnapshot::Unknown);
    assert_eq!(store.snapshot(), ListSnapshot::Unknown);
}

#[tokio::test]
async fn append_rejects_blank_link_without_remote_call() {
    let program = FakeProgram::initialized(Vec::new());
    let store = store(&program);
    let (wallet, gate) = connected("alice").await;
    let session = gate.session().unwrap();

    assert_eq!(store.append(&session, "").await, Err(WriteError::EmptyLink));
    assert_eq!(store.append(&session, "   ").await, Err(WriteError::EmptyLink));
    assert!(program.calls().is_empty());
    assert_eq!(program.fetches(), 0);
    assert_eq!(wallet.signs(), 0);
    assert_eq!(store.snapshot(), ListSnapshot::Unknown);
}

#[tokio::test]
async fn successful_append_is_followed_by_one_fetch() {
    let program = FakeProgram::initialized(Vec::new());
    let store = store(&program);
    let (_wallet, gate) = connected("alice").await;
    let session = gate.session().unwrap();

    let snapshot = store.append(&session, "a.gif").await.unwrap();
    assert_eq!(program.fetches(), 1);
    assert_eq!(
        program.calls(),
        vec![ProgramCall::AppendEntry {
            link: "a.gif".into()
        }]
    );
    let entries = snapshot.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].submitter.as_str(), "alice");

    let signed = program.signed();
    assert_eq!(signed[0].signatures.len(), 1);
    assert_eq!(signed[0].signatures[0].signer, "alice");
    assert_eq!(signed[0].invocation.accounts[0].pubkey, crate::test_support::LIST);
    assert!(signed[0].invocation.accounts[1].is_signer);
}

#[tokio::test]
async fn append_sends_link_as_typed() {
    let program = FakeProgram::initialized(Vec::new());
    let store = store(&program);
    let (_wallet, gate) = connected("alice").await;

    store.append(&gate.session().unwrap(), " a.gif\n").await.unwrap();
    assert_eq!(
        program.calls(),
        vec![ProgramCall::AppendEntry {
            link: " a.gif\n".into()
        }]
    );
    assert_eq!(program.entries().unwrap()[0].link, " a.gif\n");
}

#[tokio::test]
async fn failed_write_skips_refetch_and_keeps_snapshot() {
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 0, Some(0))]);
    let store = store(&program);
    let (_wallet, gate) = connected("alice").await;
    let session = gate.session().unwrap();
    let before = store.fetch().await;

    program.fail_invokes(Some(RemoteError::Transport("timed out".into())));
    let err = store.upvote(&session, 0).await.unwrap_err();
    assert!(matches!(err, WriteError::Remote(RemoteError::Transport(_))));
    assert_eq!(program.fetches(), 1);
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.snapshot().entries().unwrap()[0].upvotes, 0);
}

#[tokio::test]
async fn declined_signature_never_reaches_program() {
    let program = FakeProgram::initialized(Vec::new());
    let store = store(&program);
    let (wallet, gate) = connected("alice").await;
    wallet.decline_sign();

    let err = store
        .append(&gate.session().unwrap(), "a.gif")
        .await
        .unwrap_err();
    assert_eq!(err, WriteError::Signing(WalletError::UserRejected));
    assert!(program.calls().is_empty());
}

#[tokio::test]
async fn upvote_requires_position_in_current_snapshot() {
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 0, Some(0))]);
    let store = store(&program);
    let (_wallet, gate) = connected("alice").await;
    let session = gate.session().unwrap();

    assert_eq!(
        store.upvote(&session, 0).await,
        Err(WriteError::NoSuchEntry { index: 0, len: 0 })
    );
    store.fetch().await;
    assert_eq!(
        store.upvote(&session, 3).await,
        Err(WriteError::NoSuchEntry { index: 3, len: 1 })
    );
    assert!(program.calls().is_empty());
}

#[tokio::test]
async fn upvote_carries_stable_entry_id() {
    let program = FakeProgram::initialized(vec![
        entry("a.gif", "X", 0, Some(10)),
        entry("b.gif", "Y", 0, Some(11)),
    ]);
    let store = store(&program);
    let (_wallet, gate) = connected("alice").await;
    let session = gate.session().unwrap();
    store.fetch().await;

    let snapshot = store.upvote(&session, 1).await.unwrap();
    assert_eq!(
        program.calls(),
        vec![ProgramCall::IncrementUpvote {
            index: 1,
            entry_id: Some(EntryId(11)),
        }]
    );
    assert_eq!(snapshot.entries().unwrap()[1].upvotes, 1);
    assert_eq!(snapshot.entries().unwrap()[0].upvotes, 0);
}

#[tokio::test]
async fn initialize_on_existing_account_converges_to_list() {
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 0, Some(0))]);
    let store = store(&program);
    let (_wallet, gate) = connected("alice").await;

    let outcome = store.initialize(&gate.session().unwrap()).await;
    assert!(matches!(
        outcome.created,
        Err(WriteError::Remote(RemoteError::Rpc { .. }))
    ));
    assert!(outcome.snapshot.is_resolved());
    assert_eq!(outcome.snapshot.entries().unwrap().len(), 1);
    assert_eq!(program.fetches(), 1);
}

#[tokio::test]
async fn initialize_creates_empty_list_with_system_program() {
    let program = FakeProgram::default();
    let keypair = Keypair::from_seed([3u8; 32]);
    let store = RemoteListStore::new(program.clone(), AccountRef(keypair.public_hex()))
        .with_account_keypair(keypair.clone());
    let (_wallet, gate) = connected("alice").await;

    let outcome = store.initialize(&gate.session().unwrap()).await;
    assert!(outcome.created.is_ok());
    assert_eq!(outcome.snapshot, ListSnapshot::Resolved(Vec::new()));

    let signed = &program.signed()[0];
    let pubkeys: Vec<&str> = signed
        .invocation
        .accounts
        .iter()
        .map(|a| a.pubkey.as_str())
        .collect();
    let list = keypair.public_hex();
    assert_eq!(pubkeys, vec![list.as_str(), "alice", SYSTEM_PROGRAM]);
    assert!(signed.invocation.accounts[0].is_signer);
    assert_eq!(signed.signatures.len(), 2);
    assert_eq!(signed.signatures[1].signer, keypair.public_hex());
}

#[tokio::test]
async fn write_settling_after_disconnect_is_discarded() {
    let program = FakeProgram::initialized(Vec::new());
    let store = std::sync::Arc::new(store(&program));
    let (_wallet, gate) = connected("alice").await;
    let session = gate.session().unwrap();

    let release = program.hold_next_invoke();
    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.append(&session, "a.gif").await }
    });
    while program.queued_holds() > 0 {
        tokio::task::yield_now().await;
    }
    gate.disconnect();
    store.reset();
    release.send(()).unwrap();

    assert_eq!(pending.await.unwrap(), Err(WriteError::SessionEnded));
    assert_eq!(program.fetches(), 0);
    assert_eq!(store.snapshot(), ListSnapshot::Unknown);
}
