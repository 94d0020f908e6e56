use std::future::Future;

use tokio::sync::{mpsc, oneshot};

use crate::model::Identity;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApprovalRequest {
    Connect {
        origin: String,
        identity: Identity,
    },
    Sign {
        origin: String,
        identity: Identity,
        summary: String,
    },
}

impl ApprovalRequest {
    pub fn describe(&self) -> String {
        match self {
            ApprovalRequest::Connect { origin, identity } => {
                format!("Connect wallet {} to {}?", identity, origin)
            }
            ApprovalRequest::Sign {
                origin, summary, ..
            } => format!("{} wants to sign: {}", origin, summary),
        }
    }
}

/// Whoever answers the wallet's "approve?" prompts.
pub trait Approver: Send + Sync + 'static {
    fn approve(&self, request: ApprovalRequest) -> impl Future<Output = bool> + Send;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AutoApprove;

impl Approver for AutoApprove {
    async fn approve(&self, _request: ApprovalRequest) -> bool {
        true
    }
}

/// A pending prompt; dropping it without an answer counts as a rejection.
#[derive(Debug)]
pub struct ApprovalPrompt {
    pub request: ApprovalRequest,
    reply: oneshot::Sender<bool>,
}

impl ApprovalPrompt {
    pub fn answer(self, approved: bool) {
        let _ = self.reply.send(approved);
    }
}

/// Forwards prompts to a UI task over a channel.
#[derive(Clone, Debug)]
pub struct ChannelApprover {
    tx: mpsc::UnboundedSender<ApprovalPrompt>,
}

impl ChannelApprover {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ApprovalPrompt>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Approver for ChannelApprover {
    async fn approve(&self, request: ApprovalRequest) -> bool {
        let (reply, answer) = oneshot::channel();
        if self.tx.send(ApprovalPrompt { request, reply }).is_err() {
            return false;
        }
        answer.await.unwrap_or(false)
    }
}
