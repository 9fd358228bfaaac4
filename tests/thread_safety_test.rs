//! Tests for sharing validators and registries across threads.

use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use triage::{
    check, integer, object, optional, pipe, string, validate, Shape, Validator, ValidatorRegistry,
};

#[test]
fn test_concurrent_validation() {
    let registry = Arc::new(ValidatorRegistry::new());

    registry
        .register("User", object(Shape::new()
            .field("name", string())
            .field("age", integer())))
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let result = registry.validate("User", &json!({
                    "name": format!("User{}", i),
                    "age": 20 + i
                })).unwrap();
                assert!(result.is_valid());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shared_validator_tree() {
    let schema: Arc<dyn Validator> = Arc::new(object(Shape::new().field(
        "n",
        check(|v, _| v.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0)).named("even"),
    )));

    let handles: Vec<_> = (0..16)
        .map(|i: i64| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let result = validate(&schema, &json!({"n": i}));
                assert_eq!(result.is_valid(), i % 2 == 0);
                if let Some(error) = result.error() {
                    assert_eq!(error.message, format!("$.n: {} did not satisfy even", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_recursive_validation() {
    let registry = Arc::new(ValidatorRegistry::new());

    registry
        .register("Node", object(Shape::new()
            .field("value", integer())
            .field("next", pipe(optional()).then(registry.reference("Node")))))
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let result = registry.validate("Node", &json!({
                    "value": i,
                    "next": {
                        "value": i + 1,
                        "next": {
                            "value": i + 2
                        }
                    }
                })).unwrap();
                assert!(result.is_valid());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_register_and_validate() {
    let registry = ValidatorRegistry::new();
    registry.register("Base", string()).unwrap();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                if i % 2 == 0 {
                    // Even threads validate
                    let result = registry.validate("Base", &json!("x")).unwrap();
                    assert!(result.is_valid());
                } else {
                    // Odd threads register
                    registry.register(format!("Extra{}", i), integer()).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 11);
}

#[test]
fn test_stress_concurrent_validation() {
    let registry = Arc::new(ValidatorRegistry::new());

    registry.register("Email", string()).unwrap();
    registry.register("UserId", integer()).unwrap();
    registry
        .register("User", object(Shape::new()
            .field("id", registry.reference("UserId"))
            .field("email", registry.reference("Email"))
            .field("name", string())))
        .unwrap();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for j in 0..10 {
                    let result = registry.validate("User", &json!({
                        "id": i * 10 + j + 1,
                        "email": format!("user{}@example.com", i),
                        "name": format!("User {}", i)
                    })).unwrap();
                    assert!(result.is_valid());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
