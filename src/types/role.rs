//! The three scope positions of a policy head.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A scope position, in the fixed order it appears in policy text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Principal,
    Action,
    Resource,
}

impl Role {
    /// All roles in textual order.
    pub const ALL: [Role; 3] = [Role::Principal, Role::Action, Role::Resource];
}
