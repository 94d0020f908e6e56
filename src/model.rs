mod entry;
mod ids;
mod snapshot;

pub use self::entry::{DecodeError, Entry, decode_entries};
pub use self::ids::{AccountRef, EntryId, Identity};
pub use self::snapshot::ListSnapshot;
