use cedar_policy::{ParseErrors, PolicySetError};
use thiserror::Error;

use crate::types::{Role, ScopeOperator};

/// Failure to classify the raw policy text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid escape sequence '{sequence}' at offset {offset}")]
    InvalidEscape { sequence: String, offset: usize },

    #[error("unterminated condition block starting at offset {offset}")]
    UnterminatedCondition { offset: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { offset, .. }
            | LexError::UnterminatedString { offset }
            | LexError::InvalidEscape { offset, .. }
            | LexError::UnterminatedCondition { offset } => *offset,
        }
    }
}

/// A structurally well-formed policy that breaks an invariant of the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{role} scope requires at least one entity")]
    EmptyEntityList { role: Role },

    #[error("the 'not in' operator is not supported for the action scope")]
    UnsupportedActionOperator,

    #[error("{role} scope entity reference is missing its id")]
    MissingEntityId { role: Role },

    #[error("invalid entity type '{entity_type}'")]
    InvalidEntityType { entity_type: String },

    #[error("policy id must not be empty")]
    EmptyPolicyId,

    #[error("condition {index} has unbalanced braces in its body")]
    UnbalancedConditionBody { index: usize },
}

/// Failure to build a policy document from a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at offset {offset}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("{role} scope operator '{operator}' is missing its operand at offset {offset}")]
    MissingOperand {
        role: Role,
        operator: ScopeOperator,
        offset: usize,
    },

    #[error("unterminated condition block starting at offset {offset}")]
    UnterminatedCondition { offset: usize },

    #[error("operator '{operator}' is not supported for the {role} scope at offset {offset}")]
    UnsupportedOperator {
        role: Role,
        operator: ScopeOperator,
        offset: usize,
        #[source]
        source: ValidationError,
    },

    #[error("invalid policy: {0}")]
    Invalid(#[from] ValidationError),
}

impl ParseError {
    /// Byte offset into the source text, when the failure has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Lex(err) => Some(err.offset()),
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::MissingOperand { offset, .. }
            | ParseError::UnterminatedCondition { offset }
            | ParseError::UnsupportedOperator { offset, .. } => Some(*offset),
            ParseError::Invalid(_) => None,
        }
    }
}

/// Crate-level error for the record and Cedar surfaces.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to parse policy '{id}': {source}")]
    ParseError {
        id: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid policy: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("invalid policy JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("cedar rejected policy: {0}")]
    CedarError(String),
}

impl From<ParseErrors> for PolicyError {
    fn from(err: ParseErrors) -> Self {
        PolicyError::CedarError(err.to_string())
    }
}

impl From<PolicySetError> for PolicyError {
    fn from(err: PolicySetError) -> Self {
        PolicyError::CedarError(err.to_string())
    }
}
