use std::io::{self, BufRead, Write};

use gif_portal::wallet::{ApprovalRequest, Approver, AutoApprove};

/// Answers wallet prompts on the terminal, or approves everything with `--yes`.
#[derive(Clone, Copy, Debug)]
pub(crate) enum CliApprover {
    Auto,
    Prompt,
}

impl Approver for CliApprover {
    async fn approve(&self, request: ApprovalRequest) -> bool {
        match self {
            CliApprover::Auto => AutoApprove.approve(request).await,
            CliApprover::Prompt => tokio::task::spawn_blocking(move || ask(&request))
                .await
                .unwrap_or(false),
        }
    }
}

fn ask(request: &ApprovalRequest) -> bool {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "{} [y/N] ", request.describe());
    let _ = stderr.flush();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
