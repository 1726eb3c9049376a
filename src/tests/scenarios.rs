use insta::assert_snapshot;

use super::{document, entity};
use crate::error::{ParseError, ValidationError};
use crate::types::{
    Condition, ConditionKind, Effect, EntityRef, Role, Scope, ScopeOperator, ScopeTarget,
};
use crate::{parse_policy, serialize_policy};

#[test]
fn test_unconstrained_policy() {
    let doc = parse_policy("p", "permit(\n  principal,\n  action,\n  resource\n);").unwrap();
    assert_eq!(doc.effect(), Effect::Permit);
    for role in Role::ALL {
        assert_eq!(doc.scope(role), &Scope::All);
        assert_eq!(doc.scope(role).target(), ScopeTarget::None);
    }
    assert!(doc.conditions().is_empty());
}

#[test]
fn test_equality_policy_reencodes_canonically() {
    let text = "permit(\n  principal == User::\"alice\",\n  action == Action::\"view\",\n  resource == Document::\"doc1\"\n);";
    let doc = parse_policy("p", text).unwrap();
    assert_eq!(doc.principal(), &Scope::equal(entity("User", "alice")));
    assert_eq!(doc.action(), &Scope::equal(EntityRef::action("view")));
    assert_eq!(doc.resource(), &Scope::equal(entity("Document", "doc1")));
    assert!(doc.conditions().is_empty());
    assert_eq!(serialize_policy(&doc), text);
}

#[test]
fn test_equality_policy_from_compact_text() {
    let doc = parse_policy(
        "p",
        r#"permit(principal == User::"alice", action == Action::"view", resource == Document::"doc1");"#,
    )
    .unwrap();
    assert_snapshot!(serialize_policy(&doc), @r#"
    permit(
      principal == User::"alice",
      action == Action::"view",
      resource == Document::"doc1"
    );
    "#);
}

#[test]
fn test_action_list_keeps_order() {
    let doc = parse_policy(
        "p",
        r#"permit(principal, action in [Action::"view", Action::"edit"], resource);"#,
    )
    .unwrap();
    assert_eq!(doc.action().operator(), ScopeOperator::In);
    let ScopeTarget::List(actions) = doc.action().target() else {
        panic!("expected a list target");
    };
    let ids: Vec<&str> = actions.iter().map(|a| a.entity_id()).collect();
    assert_eq!(ids, vec!["view", "edit"]);
    assert!(serialize_policy(&doc).contains(r#"action in [Action::"view", Action::"edit"],"#));
}

#[test]
fn test_unquoted_id_is_rejected() {
    let err = parse_policy("p", "permit(principal == User::alice, action, resource);").unwrap_err();
    match err {
        ParseError::UnexpectedToken { expected, .. } => {
            assert!(expected.contains("string literal"), "{expected}")
        }
        other => panic!("expected an unexpected-token error, got {other:?}"),
    }
}

#[test]
fn test_action_not_in_never_downgrades() {
    for text in [
        r#"permit(principal, action not in [Action::"view"], resource);"#,
        r#"permit(principal, action not in Action::"view", resource);"#,
        r#"forbid(principal, action not in [Action::"a", Action::"b"], resource) when { true };"#,
    ] {
        let err = parse_policy("p", text).unwrap_err();
        assert!(
            matches!(
                err,
                ParseError::UnsupportedOperator {
                    role: Role::Action,
                    source: ValidationError::UnsupportedActionOperator,
                    ..
                }
            ),
            "{text}: {err:?}"
        );
    }
}

#[test]
fn test_nested_brace_body_is_not_truncated() {
    let doc = parse_policy(
        "p",
        r#"permit(principal, action, resource) when { context.tags has {"x"} };"#,
    )
    .unwrap();
    assert_eq!(doc.conditions(), &[Condition::when(r#"context.tags has {"x"}"#)]);
}

#[test]
fn test_full_policy() {
    let text = r#"
        forbid (
            principal in [Group::"contractors", Group::"interns"],
            action in [Action::"delete", Action::"share"],
            resource not in [Folder::"public"]
        )
        when { context.time.hour > 18 }
        unless { principal.clearance == "high" && { level: 3 }.level == 3 };
    "#;
    let doc = parse_policy("after-hours", text).unwrap();
    assert_eq!(doc.effect(), Effect::Forbid);
    assert_eq!(doc.resource().operator(), ScopeOperator::NotIn);
    let kinds: Vec<ConditionKind> = doc.conditions().iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec![ConditionKind::When, ConditionKind::Unless]);

    assert_snapshot!(serialize_policy(&doc), @r#"
    forbid(
      principal in [Group::"contractors", Group::"interns"],
      action in [Action::"delete", Action::"share"],
      resource not in [Folder::"public"]
    )
    when {
      context.time.hour > 18
    };
    unless {
      principal.clearance == "high" && { level: 3 }.level == 3
    };
    "#);
}

#[test]
fn test_parse_is_independent_across_threads() {
    let expected = document(
        Effect::Permit,
        Scope::equal(entity("User", "alice")),
        Scope::All,
        Scope::All,
        vec![],
    );
    let text = serialize_policy(&expected);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| parse_policy("policy-1", &text)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}
