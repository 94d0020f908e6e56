use serde::{Deserialize, Serialize};

use super::{EntryId, Identity};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub link: String,
    pub submitter: Identity,
    pub upvotes: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
}

/// Account payload as the list program stores it.
///
/// Field aliases accept the older `gif_list` / `gif_link` / `user_address` /
/// `votes` naming. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ListPayload {
    #[serde(alias = "gif_list")]
    entries: Vec<EntryRecord>,
}

#[derive(Debug, Deserialize)]
struct EntryRecord {
    #[serde(alias = "gif_link")]
    link: String,

    #[serde(alias = "user_address")]
    submitter: String,

    #[serde(default, alias = "votes")]
    upvotes: u64,

    #[serde(default)]
    seq: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
#[error("decode list payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decodes an account payload into entries, keeping the program's order.
pub fn decode_entries(payload: serde_json::Value) -> Result<Vec<Entry>, DecodeError> {
    let payload: ListPayload = serde_json::from_value(payload)?;
    Ok(payload
        .entries
        .into_iter()
        .map(|r| Entry {
            link: r.link,
            submitter: Identity(r.submitter),
            upvotes: r.upvotes,
            id: r.seq.map(EntryId),
        })
        .collect())
}

#[cfg(test)]
#[path = "../tests/model/entry_tests.rs"]
mod tests;
