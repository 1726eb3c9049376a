//! Wire envelopes exchanged with the policy store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored policy: its id plus the policy text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct PolicyRecord {
    pub id: String,
    pub content: String,
}

/// Body of an update request for an existing policy id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct PolicyUpdate {
    pub content: String,
}

impl PolicyRecord {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        PolicyRecord {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Rebuild a record from an update addressed to `id`.
    pub fn from_update(id: impl Into<String>, update: PolicyUpdate) -> Self {
        PolicyRecord::new(id, update.content)
    }
}

impl From<cedar_policy::Policy> for PolicyRecord {
    fn from(policy: cedar_policy::Policy) -> Self {
        PolicyRecord {
            id: policy.id().to_string(),
            content: policy.to_string(),
        }
    }
}
