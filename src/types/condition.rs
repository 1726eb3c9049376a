//! `when` / `unless` condition clauses.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConditionKind {
    When,
    Unless,
}

/// A condition clause. The body is opaque expression text, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ConditionRepr")]
pub struct Condition {
    kind: ConditionKind,
    body: String,
}

#[derive(Deserialize)]
struct ConditionRepr {
    kind: ConditionKind,
    body: String,
}

impl From<ConditionRepr> for Condition {
    fn from(repr: ConditionRepr) -> Self {
        Condition::new(repr.kind, repr.body)
    }
}

impl Condition {
    pub fn new(kind: ConditionKind, body: impl AsRef<str>) -> Self {
        Condition {
            kind,
            body: body.as_ref().trim().to_string(),
        }
    }

    pub fn when(body: impl AsRef<str>) -> Self {
        Condition::new(ConditionKind::When, body)
    }

    pub fn unless(body: impl AsRef<str>) -> Self {
        Condition::new(ConditionKind::Unless, body)
    }

    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
