//! Invariant checks shared by construction, parsing and JSON decoding.
//!
//! Each check returns the first violation it finds; nothing is collected.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::lexer::{KEYWORDS, find_block_end};
use crate::types::{PolicyDocument, Role, Scope};

static ENTITY_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("entity type pattern is valid")
});

/// Whether `s` is a namespace-qualified identifier usable as an entity type.
pub(crate) fn is_entity_type(s: &str) -> bool {
    ENTITY_TYPE.is_match(s) && !KEYWORDS.contains(&s)
}

/// Whether the braces in a condition body pair up, ignoring string literals.
pub(crate) fn is_balanced_body(body: &str) -> bool {
    let closed = format!("{body}}}");
    find_block_end(&closed, 0) == Some(body.len())
}

/// Check one scope against the operator rules for `role`.
pub fn validate_scope(role: Role, scope: &Scope) -> Result<(), ValidationError> {
    match scope {
        Scope::All => Ok(()),
        Scope::In { entities } | Scope::NotIn { entities } if entities.is_empty() => {
            Err(ValidationError::EmptyEntityList { role })
        }
        Scope::NotIn { .. } if role == Role::Action => {
            Err(ValidationError::UnsupportedActionOperator)
        }
        Scope::In { .. } | Scope::NotIn { .. } => Ok(()),
        Scope::Eq { entity } | Scope::Neq { entity } => {
            if entity.entity_id().is_empty() {
                Err(ValidationError::MissingEntityId { role })
            } else {
                Ok(())
            }
        }
    }
}

/// Check a whole document: id, then each scope in textual order, then conditions.
pub fn validate_document(document: &PolicyDocument) -> Result<(), ValidationError> {
    if document.id().is_empty() {
        return Err(ValidationError::EmptyPolicyId);
    }
    for role in Role::ALL {
        validate_scope(role, document.scope(role))?;
    }
    for (index, condition) in document.conditions().iter().enumerate() {
        if !is_balanced_body(condition.body()) {
            return Err(ValidationError::UnbalancedConditionBody { index });
        }
    }
    Ok(())
}
