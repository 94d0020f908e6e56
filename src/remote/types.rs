//! JSON-RPC envelopes exchanged with the ledger node.

pub const GET_LIST_ACCOUNT: &str = "getListAccount";
pub const SEND_PROGRAM_CALL: &str = "sendProgramCall";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,

    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub result: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `getListAccount` result for an existing account.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct AccountInfo {
    pub data: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CommitmentParam {
    pub commitment: String,
}
