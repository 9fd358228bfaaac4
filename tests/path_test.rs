//! Integration tests for JsonPath.

use triage::{JsonPath, PathSegment, ROOT_MARKER};

#[test]
fn test_path_construction_and_display() {
    // Root path
    assert_eq!(JsonPath::root().to_string(), ROOT_MARKER);

    // Simple field
    assert_eq!(JsonPath::root().push_field("name").to_string(), "$.name");

    // Simple index
    assert_eq!(JsonPath::root().push_index(0).to_string(), "$[0]");

    // Complex nested path
    let path = JsonPath::root()
        .push_field("users")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "$.users[0].address.city");
}

#[test]
fn test_custom_marker() {
    let path = JsonPath::with_marker("body").push_field("items").push_index(3);
    assert_eq!(path.to_string(), "body.items[3]");
    assert_eq!(path.marker(), "body");

    let bare = JsonPath::with_marker("").push_index(1).push_field("id");
    assert_eq!(bare.to_string(), "[1].id");
}

#[test]
fn test_path_segments_preserved() {
    let path = JsonPath::root()
        .push_field("data")
        .push_index(42)
        .push_field("value");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(segments.len(), 3);

    match &segments[0] {
        PathSegment::Field(name) => assert_eq!(name, "data"),
        _ => panic!("Expected Field segment"),
    }

    match &segments[1] {
        PathSegment::Index(idx) => assert_eq!(*idx, 42),
        _ => panic!("Expected Index segment"),
    }

    match &segments[2] {
        PathSegment::Field(name) => assert_eq!(name, "value"),
        _ => panic!("Expected Field segment"),
    }
}

#[test]
fn test_path_is_immutable() {
    let base = JsonPath::root().push_field("items");

    let path1 = base.push_index(0);
    let path2 = base.push_index(1);
    let path3 = base.push_field("count");

    // Base path unchanged
    assert_eq!(base.to_string(), "$.items");
    assert_eq!(path1.to_string(), "$.items[0]");
    assert_eq!(path2.to_string(), "$.items[1]");
    assert_eq!(path3.to_string(), "$.items.count");
}

#[test]
fn test_numeric_looking_field_is_still_a_field() {
    let path = JsonPath::root().push_field("0").push(PathSegment::from(0usize));
    assert_eq!(path.to_string(), "$.0[0]");
}

#[test]
fn test_parent_and_last() {
    let path = JsonPath::root().push_field("a").push_index(2);

    assert_eq!(path.last(), Some(&PathSegment::Index(2)));
    assert_eq!(path.parent().unwrap().to_string(), "$.a");
    assert_eq!(path.parent().unwrap().parent().unwrap(), JsonPath::root());
    assert!(JsonPath::root().parent().is_none());
}

#[test]
fn test_equal_key_chains_give_equal_paths() {
    let a = JsonPath::root().push_field("x").push_index(1);
    let b = JsonPath::default()
        .push(PathSegment::from("x"))
        .push(PathSegment::from(1usize));
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}
