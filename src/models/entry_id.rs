use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry identifier: either a durable id assigned by the store, or a
/// locally-generated placeholder id for an entry whose create is still in
/// flight. A pending id is never written to the store.
///
/// Ord: durable ids sort before pending ones, which keeps placeholder rows
/// at a deterministic position when used as a sort tie-breaker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryId {
    Durable(i64),
    Pending(u64),
}

impl EntryId {
    pub fn is_pending(&self) -> bool {
        matches!(self, EntryId::Pending(_))
    }

    /// The durable id, if confirmed.
    pub fn durable(&self) -> Option<i64> {
        match self {
            EntryId::Durable(n) => Some(*n),
            EntryId::Pending(_) => None,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Durable(n) => write!(f, "{}", n),
            EntryId::Pending(n) => write!(f, "pending-{}", n),
        }
    }
}
