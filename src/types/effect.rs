//! Policy effect.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Whether a matching policy grants or denies the request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Effect {
    Permit,
    Forbid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_effect_keywords() {
        assert_eq!(Effect::Permit.as_ref(), "permit");
        assert_eq!(Effect::Forbid.to_string(), "forbid");
        assert_eq!(Effect::from_str("forbid").unwrap(), Effect::Forbid);
        assert!(Effect::from_str("allow").is_err());
    }

    #[test]
    fn test_effect_json() {
        assert_eq!(serde_json::to_value(Effect::Permit).unwrap(), "permit");
        let effect: Effect = serde_json::from_str(r#""forbid""#).unwrap();
        assert_eq!(effect, Effect::Forbid);
    }
}
