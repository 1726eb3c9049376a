//! Bidirectional codec between the console's structured policy model and
//! Cedar policy text.
//!
//! [`parse_policy`] turns stored policy text into a [`PolicyDocument`];
//! [`serialize_policy`] renders a document back as canonical text. Both are
//! pure: no I/O, no shared state, no configuration.
//!
//! ```rust
//! use cedar_scope_codec::{parse_policy, serialize_policy};
//!
//! let text = "permit(\n  principal,\n  action,\n  resource\n);";
//! let doc = parse_policy("p1", text).unwrap();
//! assert_eq!(serialize_policy(&doc), text);
//! ```
pub use error::{LexError, ParseError, PolicyError, ValidationError};
pub use lexer::{Token, TokenKind, tokenize};
pub use loader::{compile_policy_set, to_cedar_policy};
pub use parser::parse_policy;
pub use records::{decode_record, decode_records, decode_records_json, encode_record};
pub use serializer::serialize_policy;
pub use types::{
    ACTION_ENTITY_TYPE, Condition, ConditionKind, Effect, EntityRef, PolicyDocument, PolicyRecord,
    PolicyUpdate, Role, Scope, ScopeOperator, ScopeTarget,
};
pub use validation::{validate_document, validate_scope};

mod error;
mod lexer;
mod loader;
mod parser;
mod records;
mod serializer;
mod types;
mod validation;

#[cfg(test)]
mod tests;
