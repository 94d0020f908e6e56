use super::Entry;

/// Local cache of the list account, replaced wholesale by each applied fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListSnapshot {
    /// Nothing fetched in this session yet.
    #[default]
    Unknown,
    Resolved(Vec<Entry>),
    /// The account holds no storage; it has never been initialized.
    NotFound,
    /// The fetch failed for a reason that may go away on retry.
    Unavailable { reason: String },
}

impl ListSnapshot {
    pub fn entries(&self) -> Option<&[Entry]> {
        match self {
            ListSnapshot::Resolved(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ListSnapshot::Resolved(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListSnapshot::Unknown => "unknown",
            ListSnapshot::Resolved(_) => "resolved",
            ListSnapshot::NotFound => "not-found",
            ListSnapshot::Unavailable { .. } => "unavailable",
        }
    }
}
