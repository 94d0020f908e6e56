use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::*;
use crate::config::Commitment;

/// Retries transport failures only; RPC errors are answers, not outages.
async fn with_retries<T, F, Fut>(label: &str, mut f: F) -> Result<T, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RemoteError>>,
{
    const ATTEMPTS: u32 = 3;
    let mut attempt = 0;
    loop {
        match f().await {
            Err(RemoteError::Transport(msg)) if attempt + 1 < ATTEMPTS => {
                debug!(label, attempt, error = %msg, "retrying rpc call");
                tokio::time::sleep(Duration::from_millis(200 * (1 << attempt))).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// JSON-RPC 2.0 invoker over HTTP.
#[derive(Debug)]
pub struct HttpInvoker {
    endpoint: String,
    commitment: Commitment,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpInvoker {
    pub fn new(endpoint: impl Into<String>, commitment: Commitment) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gif-portal")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            commitment,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    fn commitment_param(&self) -> CommitmentParam {
        CommitmentParam {
            commitment: self.commitment.as_str().to_string(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, RemoteError> {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: method.to_string(),
            params,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(format!("{}: {}", method, err)))?;
        let resp = ensure_ok(resp, method)?;
        let body: RpcResponse = resp
            .json()
            .await
            .map_err(|err| RemoteError::Malformed(format!("{}: {}", method, err)))?;

        if let Some(err) = body.error {
            return Err(RemoteError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        serde_json::from_value(body.result)
            .map_err(|err| RemoteError::Malformed(format!("{} result: {}", method, err)))
    }
}

fn ensure_ok(resp: reqwest::Response, label: &str) -> Result<reqwest::Response, RemoteError> {
    let status = resp.status();
    if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RemoteError::Transport(format!("{}: status {}", label, status)));
    }
    resp.error_for_status()
        .map_err(|err| RemoteError::Rpc {
            code: i64::from(status.as_u16()),
            message: format!("{}: {}", label, err),
        })
}

impl ProgramInvoker for HttpInvoker {
    async fn fetch_account(
        &self,
        account: &AccountRef,
    ) -> Result<Option<serde_json::Value>, RemoteError> {
        let params = serde_json::json!([account, self.commitment_param()]);
        let info: Option<AccountInfo> =
            with_retries(GET_LIST_ACCOUNT, || self.call(GET_LIST_ACCOUNT, params.clone())).await?;
        Ok(info.map(|info| info.data))
    }

    async fn invoke(&self, invocation: &SignedInvocation) -> Result<TxReceipt, RemoteError> {
        let params = serde_json::json!([invocation, self.commitment_param()]);
        self.call(SEND_PROGRAM_CALL, params).await
    }
}
