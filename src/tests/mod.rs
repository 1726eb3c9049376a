//! Crate-level tests that exercise the parser and serializer together.

use crate::types::{Condition, Effect, EntityRef, PolicyDocument, Scope};

mod scenarios;

fn entity(entity_type: &str, id: &str) -> EntityRef {
    EntityRef::new(entity_type, id).unwrap()
}

fn document(
    effect: Effect,
    principal: Scope,
    action: Scope,
    resource: Scope,
    conditions: Vec<Condition>,
) -> PolicyDocument {
    PolicyDocument::new("policy-1", effect, principal, action, resource, conditions).unwrap()
}
