//! Scope constraints for the principal, action and resource positions.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use super::entity_ref::EntityRef;

/// The comparison a scope applies to its position.
///
/// String forms match the operators as they appear in policy text; `All`
/// stands for an unconstrained position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum ScopeOperator {
    #[strum(serialize = "All")]
    #[serde(rename = "All")]
    All,
    #[strum(serialize = "==")]
    #[serde(rename = "==")]
    Eq,
    #[strum(serialize = "!=")]
    #[serde(rename = "!=")]
    Neq,
    #[strum(serialize = "in")]
    #[serde(rename = "in")]
    In,
    #[strum(serialize = "not in")]
    #[serde(rename = "not in")]
    NotIn,
}

/// A borrowed view of a scope's operand, shaped by its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeTarget<'a> {
    None,
    Single(&'a EntityRef),
    List(&'a [EntityRef]),
}

/// A constraint on one policy position.
///
/// The variant fixes the operand shape: `All` has none, `Eq`/`Neq` hold one
/// entity, `In`/`NotIn` hold a list. List cardinality, empty ids and
/// role-specific operators are checked when the scope is placed into a
/// [`PolicyDocument`](super::PolicyDocument).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Scope {
    #[default]
    #[serde(rename = "All")]
    All,
    #[serde(rename = "==")]
    Eq { entity: EntityRef },
    #[serde(rename = "!=")]
    Neq { entity: EntityRef },
    #[serde(rename = "in")]
    In { entities: Vec<EntityRef> },
    #[serde(rename = "not in")]
    NotIn { entities: Vec<EntityRef> },
}

impl Scope {
    pub fn all() -> Self {
        Scope::All
    }

    pub fn equal(entity: EntityRef) -> Self {
        Scope::Eq { entity }
    }

    pub fn not_equal(entity: EntityRef) -> Self {
        Scope::Neq { entity }
    }

    pub fn is_in(entities: impl IntoIterator<Item = EntityRef>) -> Self {
        Scope::In {
            entities: entities.into_iter().collect(),
        }
    }

    pub fn not_in(entities: impl IntoIterator<Item = EntityRef>) -> Self {
        Scope::NotIn {
            entities: entities.into_iter().collect(),
        }
    }

    pub fn operator(&self) -> ScopeOperator {
        match self {
            Scope::All => ScopeOperator::All,
            Scope::Eq { .. } => ScopeOperator::Eq,
            Scope::Neq { .. } => ScopeOperator::Neq,
            Scope::In { .. } => ScopeOperator::In,
            Scope::NotIn { .. } => ScopeOperator::NotIn,
        }
    }

    pub fn target(&self) -> ScopeTarget<'_> {
        match self {
            Scope::All => ScopeTarget::None,
            Scope::Eq { entity } | Scope::Neq { entity } => ScopeTarget::Single(entity),
            Scope::In { entities } | Scope::NotIn { entities } => ScopeTarget::List(entities),
        }
    }
}
