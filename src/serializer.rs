//! Canonical policy text for a [`PolicyDocument`].
//!
//! Layout, for a policy with conditions:
//!
//! ```text
//! permit(
//!   principal == User::"alice",
//!   action in [Action::"view", Action::"edit"],
//!   resource
//! )
//! when {
//!   context.mfa == true
//! };
//! ```
//!
//! Without conditions the closing paren is followed directly by `;`.

use itertools::Itertools;
use tracing::debug;

use crate::types::{PolicyDocument, Role, Scope};

/// Render `document` as canonical policy text.
///
/// The document is valid by construction, so this never fails.
pub fn serialize_policy(document: &PolicyDocument) -> String {
    let mut out = format!("{}(\n", document.effect());
    for role in Role::ALL {
        out.push_str("  ");
        out.push_str(&render_scope(role, document.scope(role)));
        out.push_str(if role == Role::Resource { "\n" } else { ",\n" });
    }

    if document.conditions().is_empty() {
        out.push_str(");");
    } else {
        out.push_str(")\n");
        let conditions = document
            .conditions()
            .iter()
            .map(|condition| format!("{} {{\n  {}\n}};", condition.kind(), condition.body()))
            .join("\n");
        out.push_str(&conditions);
    }

    debug!(
        event = "Policy",
        phase = "Serialize",
        id = document.id(),
        length = out.len()
    );
    out
}

/// One scope clause, without its trailing separator. Lists are bracketed
/// for `in`/`not in` whatever their length.
fn render_scope(role: Role, scope: &Scope) -> String {
    match scope {
        Scope::All => role.to_string(),
        Scope::Eq { entity } | Scope::Neq { entity } => {
            format!("{role} {} {entity}", scope.operator())
        }
        Scope::In { entities } | Scope::NotIn { entities } => {
            format!("{role} {} [{}]", scope.operator(), entities.iter().join(", "))
        }
    }
}

/// Escape a string literal's contents so the lexer reads back the same value.
pub(crate) fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
