use super::*;
use crate::remote::RemoteError;
use crate::test_support::{FakeProgram, FakeWallet, controller, entry};

#[tokio::test]
async fn startup_without_wallet_reports_install_hint() {
    let program = FakeProgram::default();
    let view = controller(None, &program);

    let outcome = Action::Startup.perform(&view).await;
    assert_eq!(outcome.kind, EntryKind::Error);
    assert!(outcome.lines[0].contains("wallet new"));
}

#[tokio::test]
async fn connect_summarizes_fetched_list() {
    let wallet = FakeWallet::new("alice");
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 0, Some(0))]);
    let view = controller(Some(&wallet), &program);

    let outcome = Action::Connect.perform(&view).await;
    assert_eq!(outcome.kind, EntryKind::Output);
    assert_eq!(outcome.lines, vec!["connected; 1 link(s) in the list"]);
}

#[tokio::test]
async fn connect_to_missing_account_points_at_initialize() {
    let wallet = FakeWallet::new("alice");
    let program = FakeProgram::default();
    let view = controller(Some(&wallet), &program);

    let outcome = Action::Connect.perform(&view).await;
    assert!(outcome.lines[0].contains("press i"));

    let outcome = Action::Initialize.perform(&view).await;
    assert_eq!(outcome.kind, EntryKind::Output);
    assert!(outcome.lines[0].starts_with("list created; 0 link(s)"));
    assert!(outcome.lines[1].starts_with("signature "));
}

#[tokio::test]
async fn failed_upvote_is_reported_as_error() {
    let wallet = FakeWallet::new("alice");
    let program = FakeProgram::initialized(vec![entry("a.gif", "X", 0, Some(0))]);
    let view = controller(Some(&wallet), &program);
    Action::Connect.perform(&view).await;

    program.fail_invokes(Some(RemoteError::Transport("timed out".into())));
    let outcome = Action::Upvote(0).perform(&view).await;
    assert_eq!(outcome.kind, EntryKind::Error);
    assert!(outcome.lines[0].starts_with("upvote failed"));
}

#[tokio::test]
async fn unavailable_refresh_offers_retry() {
    let wallet = FakeWallet::new("alice");
    let program = FakeProgram::initialized(Vec::new());
    let view = controller(Some(&wallet), &program);
    Action::Connect.perform(&view).await;

    program.fail_fetches(Some(RemoteError::Transport("refused".into())));
    let outcome = Action::Refresh.perform(&view).await;
    assert_eq!(outcome.kind, EntryKind::Error);
    assert!(outcome.lines[0].contains("press r to retry"));
}
