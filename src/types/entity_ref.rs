//! Entity references, the `Type::"id"` operands of a scope.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::serializer::escape_string;
use crate::validation::is_entity_type;

/// The entity type the console uses for every action reference.
pub const ACTION_ENTITY_TYPE: &str = "Action";

/// A reference to one entity, e.g. `User::"alice"` or `Ns::Document::"doc1"`.
///
/// The type is checked on construction; the id is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EntityRefRepr")]
pub struct EntityRef {
    #[serde(rename = "type")]
    entity_type: String,
    #[serde(rename = "id")]
    entity_id: String,
}

#[derive(Deserialize)]
struct EntityRefRepr {
    #[serde(rename = "type")]
    entity_type: String,
    #[serde(rename = "id")]
    entity_id: String,
}

impl TryFrom<EntityRefRepr> for EntityRef {
    type Error = ValidationError;

    fn try_from(repr: EntityRefRepr) -> Result<Self, Self::Error> {
        EntityRef::new(repr.entity_type, repr.entity_id)
    }
}

impl EntityRef {
    /// Create a reference, rejecting types that are not namespace-qualified identifiers.
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let entity_type = entity_type.into();
        if !is_entity_type(&entity_type) {
            return Err(ValidationError::InvalidEntityType { entity_type });
        }
        Ok(EntityRef {
            entity_type,
            entity_id: entity_id.into(),
        })
    }

    /// Create an `Action::"id"` reference.
    pub fn action(entity_id: impl Into<String>) -> Self {
        EntityRef {
            entity_type: ACTION_ENTITY_TYPE.to_string(),
            entity_id: entity_id.into(),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

/// Renders the policy-text literal, with the id quoted and escaped.
impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            r#"{}::"{}""#,
            self.entity_type,
            escape_string(&self.entity_id)
        )
    }
}
