//! Conversions between documents and the policy store's `{id, content}` records.

use tracing::debug;

use crate::error::{ParseError, PolicyError};
use crate::parser::parse_policy;
use crate::serializer::serialize_policy;
use crate::types::{PolicyDocument, PolicyRecord, PolicyUpdate};

/// Decode a stored record into a document.
pub fn decode_record(record: &PolicyRecord) -> Result<PolicyDocument, ParseError> {
    parse_policy(&record.id, &record.content)
}

/// Decode a policy listing, stopping at the first record that fails.
pub fn decode_records(records: &[PolicyRecord]) -> Result<Vec<PolicyDocument>, PolicyError> {
    let documents = records
        .iter()
        .map(|record| {
            decode_record(record).map_err(|source| PolicyError::ParseError {
                id: record.id.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(event = "Policy", phase = "Decoded", count = documents.len());
    Ok(documents)
}

/// Encode a document as the record sent to the create endpoint.
pub fn encode_record(document: &PolicyDocument) -> PolicyRecord {
    PolicyRecord::new(document.id(), serialize_policy(document))
}

/// Decode the JSON listing returned by the policy store.
pub fn decode_records_json(json: &str) -> Result<Vec<PolicyDocument>, PolicyError> {
    let records: Vec<PolicyRecord> = serde_json::from_str(json)?;
    decode_records(&records)
}

impl PolicyDocument {
    /// The body sent to the update endpoint for this document's id.
    pub fn to_update(&self) -> PolicyUpdate {
        PolicyUpdate {
            content: serialize_policy(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::{Effect, EntityRef, Role, Scope};

    #[test]
    fn test_decode_record_uses_record_id() {
        let record = PolicyRecord::new(
            "alice-view",
            r#"permit(principal == User::"alice", action == Action::"view", resource);"#,
        );
        let doc = decode_record(&record).unwrap();
        assert_eq!(doc.id(), "alice-view");
        assert_eq!(doc.effect(), Effect::Permit);
    }

    #[test]
    fn test_encode_record_pairs_id_and_text() {
        let doc = PolicyDocument::new(
            "deny-bob",
            Effect::Forbid,
            Scope::equal(EntityRef::new("User", "bob").unwrap()),
            Scope::All,
            Scope::All,
            vec![],
        )
        .unwrap();
        let record = encode_record(&doc);
        assert_eq!(record.id, "deny-bob");
        assert_eq!(record.content, serialize_policy(&doc));
        assert_eq!(doc.to_update().content, record.content);
        assert_eq!(decode_record(&record).unwrap(), doc);
    }

    #[test]
    fn test_decode_records_reports_failing_id() {
        let records = vec![
            PolicyRecord::new("ok", "permit(principal, action, resource);"),
            PolicyRecord::new("broken", "permit(principal, action in [], resource);"),
            PolicyRecord::new("never-reached", "nonsense"),
        ];
        match decode_records(&records) {
            Err(PolicyError::ParseError { id, source }) => {
                assert_eq!(id, "broken");
                assert_eq!(
                    source,
                    ParseError::Invalid(ValidationError::EmptyEntityList { role: Role::Action })
                );
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_records_json() {
        let json = r#"[
            {"id": "a", "content": "permit(principal, action, resource);"},
            {"id": "b", "content": "forbid(principal, action, resource) unless { context.ok };"}
        ]"#;
        let docs = decode_records_json(json).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(docs[1].conditions().len(), 1);
    }

    #[test]
    fn test_decode_records_json_rejects_bad_envelope() {
        let err = decode_records_json(r#"[{"id": "a"}]"#).unwrap_err();
        assert!(matches!(err, PolicyError::JsonError(_)));
    }
}
