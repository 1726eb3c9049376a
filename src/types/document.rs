//! The structured form of one policy.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::validate_document;

use super::condition::Condition;
use super::effect::Effect;
use super::role::Role;
use super::scope::Scope;

/// One authorization rule as the console edits it.
///
/// Instances only exist in a validated state: both [`PolicyDocument::new`]
/// and JSON deserialization run [`validate_document`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPolicyDocument")]
pub struct PolicyDocument {
    id: String,
    effect: Effect,
    principal: Scope,
    action: Scope,
    resource: Scope,
    conditions: Vec<Condition>,
}

#[derive(Deserialize)]
struct UncheckedPolicyDocument {
    id: String,
    effect: Effect,
    principal: Scope,
    action: Scope,
    resource: Scope,
    #[serde(default)]
    conditions: Vec<Condition>,
}

impl TryFrom<UncheckedPolicyDocument> for PolicyDocument {
    type Error = ValidationError;

    fn try_from(raw: UncheckedPolicyDocument) -> Result<Self, Self::Error> {
        PolicyDocument::new(
            raw.id,
            raw.effect,
            raw.principal,
            raw.action,
            raw.resource,
            raw.conditions,
        )
    }
}

impl PolicyDocument {
    pub fn new(
        id: impl Into<String>,
        effect: Effect,
        principal: Scope,
        action: Scope,
        resource: Scope,
        conditions: Vec<Condition>,
    ) -> Result<Self, ValidationError> {
        let document = PolicyDocument {
            id: id.into(),
            effect,
            principal,
            action,
            resource,
            conditions,
        };
        validate_document(&document)?;
        Ok(document)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn principal(&self) -> &Scope {
        &self.principal
    }

    pub fn action(&self) -> &Scope {
        &self.action
    }

    pub fn resource(&self) -> &Scope {
        &self.resource
    }

    /// The scope at `role`.
    pub fn scope(&self, role: Role) -> &Scope {
        match role {
            Role::Principal => &self.principal,
            Role::Action => &self.action,
            Role::Resource => &self.resource,
        }
    }

    /// Conditions in evaluation order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}
