use crate::model::ListSnapshot;
use crate::remote::{InitializeOutcome, ProgramInvoker, WriteError};
use crate::view::ViewController;
use crate::wallet::WalletProvider;

use super::EntryKind;

/// Work the shell hands to the runtime. Disconnect is not here: it is
/// synchronous and runs on the UI thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Action {
    Startup,
    Connect,
    Refresh,
    Initialize,
    Submit,
    Upvote(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) struct ActionOutcome {
    pub(in crate::tui_shell) kind: EntryKind,
    pub(in crate::tui_shell) lines: Vec<String>,
}

impl ActionOutcome {
    fn ok(line: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Output,
            lines: vec![line.into()],
        }
    }

    fn error(line: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            lines: vec![line.into()],
        }
    }

    fn from_snapshot(prefix: &str, snapshot: &ListSnapshot) -> Self {
        match snapshot {
            ListSnapshot::Resolved(entries) => {
                Self::ok(format!("{}; {} link(s) in the list", prefix, entries.len()))
            }
            ListSnapshot::NotFound => Self::ok(format!(
                "{}; the list account is not initialized (press i)",
                prefix
            )),
            ListSnapshot::Unavailable { reason } => Self::error(format!(
                "{}; could not load the list: {} (press r to retry)",
                prefix, reason
            )),
            ListSnapshot::Unknown => Self::ok(format!("{}; session ended", prefix)),
        }
    }

    fn from_write(verb: &str, done: &str, res: Result<ListSnapshot, WriteError>) -> Self {
        match res {
            Ok(snapshot) => Self::from_snapshot(done, &snapshot),
            Err(WriteError::SessionEnded) => Self::ok("wallet disconnected; result discarded"),
            Err(err) => Self::error(format!("{} failed: {}", verb, err)),
        }
    }
}

impl Action {
    pub(in crate::tui_shell) fn label(self) -> &'static str {
        match self {
            Action::Startup => "startup",
            Action::Connect => "connect",
            Action::Refresh => "refresh",
            Action::Initialize => "initialize",
            Action::Submit => "submit",
            Action::Upvote(_) => "upvote",
        }
    }

    pub(in crate::tui_shell) async fn perform<W, I>(
        self,
        view: &ViewController<W, I>,
    ) -> ActionOutcome
    where
        W: WalletProvider,
        I: ProgramInvoker,
    {
        match self {
            Action::Startup => match view.startup().await {
                Ok(Some(snapshot)) => ActionOutcome::from_snapshot("reconnected", &snapshot),
                Ok(None) => ActionOutcome::ok("press c to connect your wallet"),
                Err(err) => ActionOutcome::error(err.to_string()),
            },
            Action::Connect => match view.connect().await {
                Ok(snapshot) => ActionOutcome::from_snapshot("connected", &snapshot),
                Err(err) => ActionOutcome::error(format!("connect failed: {}", err)),
            },
            Action::Refresh => {
                ActionOutcome::from_write("refresh", "refreshed", view.refresh().await)
            }
            Action::Initialize => match view.initialize().await {
                Ok(InitializeOutcome {
                    created: Ok(receipt),
                    snapshot,
                }) => {
                    let mut outcome = ActionOutcome::from_snapshot("list created", &snapshot);
                    outcome.lines.push(format!("signature {}", receipt.signature));
                    outcome
                }
                Ok(InitializeOutcome {
                    created: Err(WriteError::SessionEnded),
                    ..
                }) => ActionOutcome::ok("wallet disconnected; result discarded"),
                Ok(InitializeOutcome {
                    created: Err(err),
                    snapshot,
                }) => {
                    let mut outcome = ActionOutcome::from_snapshot("initialize failed", &snapshot);
                    outcome.kind = EntryKind::Error;
                    outcome.lines.push(err.to_string());
                    outcome
                }
                Err(err) => ActionOutcome::error(format!("initialize failed: {}", err)),
            },
            Action::Submit => {
                ActionOutcome::from_write("submit", "link added", view.submit().await)
            }
            Action::Upvote(index) => {
                ActionOutcome::from_write("upvote", "upvoted", view.upvote(index).await)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/actions_tests.rs"]
mod tests;
