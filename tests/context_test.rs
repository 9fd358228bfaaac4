//! Integration tests for location contexts.

use serde_json::json;
use triage::{make_ctx, Context, PathSegment};

#[test]
fn test_make_ctx_root() {
    let input = json!({"user": {"age": 3}});
    let ctx = make_ctx(None, None, Some(&input));

    assert_eq!(ctx.path().to_string(), "$");
    assert!(ctx.key().is_none());
    assert!(ctx.parent().is_none());
    assert_eq!(ctx.root(), Some(&input));
}

#[test]
fn test_make_ctx_chain() {
    let input = json!({"user": {"age": 3}});
    let root = make_ctx(None, None, Some(&input));
    let user = make_ctx(Some(&root), Some(PathSegment::field("user")), input.get("user"));
    let age = make_ctx(Some(&user), Some("age".into()), input["user"].get("age"));

    assert_eq!(age.path().to_string(), "$.user.age");
    assert_eq!(age.key(), Some(&PathSegment::field("age")));
    assert_eq!(age.parent(), Some(&json!({"age": 3})));
    assert_eq!(age.root(), Some(&input));
    assert_eq!(age.value(), Some(&json!(3)));
}

#[test]
fn test_siblings_do_not_share_state() {
    let input = json!([1, 2]);
    let root = Context::new(Some(&input));

    let first = root.child(PathSegment::index(0), input.get(0));
    let second = root.child(PathSegment::index(1), input.get(1));

    assert_eq!(first.path().to_string(), "$[0]");
    assert_eq!(second.path().to_string(), "$[1]");
    assert_eq!(root.path().to_string(), "$");
}

#[test]
fn test_explicit_null_versus_unset() {
    let input = json!({"a": null});
    let root = Context::new(Some(&input));

    let a = root.child(PathSegment::field("a"), input.get("a"));
    let b = root.child(PathSegment::field("b"), input.get("b"));

    assert_eq!(a.value(), Some(&json!(null)));
    assert_eq!(b.value(), None);
}

#[test]
fn test_root_marker_is_inherited() {
    let input = json!({"q": 1});
    let root = Context::with_root_path(Some(&input), "query");
    let q = root.child(PathSegment::field("q"), input.get("q"));

    assert_eq!(q.path().to_string(), "query.q");
}
