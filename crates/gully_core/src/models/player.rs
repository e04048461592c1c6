use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A roster entry. Immutable once created; all per-match statistics are
/// tracked separately, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    /// Create a player with a freshly minted id.
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), name: name.into() }
    }

    /// Create a player with a caller-supplied id (session restore, tests).
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}
