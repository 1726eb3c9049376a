//! The structured policy model.
//!
//! A [`PolicyDocument`] holds an effect, one [`Scope`] per [`Role`] and an
//! ordered list of [`Condition`]s. JSON forms follow the console's form
//! state: scopes are tagged by `op` (`All`, `==`, `!=`, `in`, `not in`) and
//! entity references are `{"type": ..., "id": ...}` objects.

mod condition;
mod document;
mod effect;
mod entity_ref;
mod record;
mod role;
mod scope;

pub use condition::{Condition, ConditionKind};
pub use document::PolicyDocument;
pub use effect::Effect;
pub use entity_ref::{ACTION_ENTITY_TYPE, EntityRef};
pub use record::{PolicyRecord, PolicyUpdate};
pub use role::Role;
pub use scope::{Scope, ScopeOperator, ScopeTarget};
