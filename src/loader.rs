use cedar_policy::{ParseErrors, Policy, PolicyId, PolicySet};
use tracing::{debug, warn};

use crate::error::PolicyError;
use crate::serializer::serialize_policy;
use crate::types::PolicyDocument;

/// Compile a document's canonical text with the Cedar parser, under the document's id.
///
/// Cedar parse errors are mapped into `PolicyError::CedarError`.
///
/// Example:
/// ```rust
/// use cedar_scope_codec::{parse_policy, to_cedar_policy};
/// let doc = parse_policy("p1", r#"forbid(principal == User::"evil", action, resource);"#).unwrap();
/// let policy = to_cedar_policy(&doc).unwrap();
/// assert_eq!(policy.id().to_string(), "p1");
/// ```
pub fn to_cedar_policy(document: &PolicyDocument) -> Result<Policy, PolicyError> {
    let text = serialize_policy(document);
    let policy = Policy::parse(None, &text).map_err(|e: ParseErrors| {
        warn!(
            event = "Policy",
            phase = "Compile",
            id = document.id(),
            error = %e
        );
        PolicyError::from(e)
    })?;
    debug!(event = "Policy", phase = "Compile", id = document.id());
    Ok(policy.new_id(PolicyId::new(document.id())))
}

/// Compile a set of documents into a Cedar `PolicySet`. Ids must be unique.
pub fn compile_policy_set(documents: &[PolicyDocument]) -> Result<PolicySet, PolicyError> {
    let mut set = PolicySet::new();
    for document in documents {
        set.add(to_cedar_policy(document)?)?;
    }
    Ok(set)
}
