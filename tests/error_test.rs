//! Integration tests for ValidationError and its attribution.

use serde_json::{json, Value};
use stillwater::Validation;
use triage::{
    check, create_validator, guard, object, pipe, string, try_transform, validate, Context,
    ErrorKind, Message, PathSegment, Shape, ValidationError, Validator,
};

#[test]
fn test_error_display_is_message() {
    let error = ValidationError::new("age must be positive").with_kind(ErrorKind::PredicateFailure);

    assert_eq!(error.to_string(), "age must be positive");
    assert_eq!(error.kind.to_string(), "predicate_failure");
    assert!(!error.is_stamped());
}

#[test]
fn test_error_is_std_error() {
    fn as_std(error: ValidationError) -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(error)
    }

    let boxed = as_std(ValidationError::new("boom"));
    assert_eq!(boxed.to_string(), "boom");

    let back: ValidationError = boxed.into();
    assert_eq!(back.message, "boom");
    assert_eq!(back.kind, ErrorKind::HandlerFailure);
}

#[test]
fn test_stamp_records_full_location() {
    let input = json!({"user": {"email": "nope"}});
    let root = Context::new(Some(&input));
    let user = root.child(PathSegment::field("user"), input.get("user"));
    let email = user.child(PathSegment::field("email"), input["user"].get("email"));

    let error = ValidationError::new("bad email").stamp("email", email.value(), &email);

    assert_eq!(error.expected.as_deref(), Some("email"));
    assert_eq!(error.actual, Some(json!("nope")));
    assert_eq!(error.path.as_ref().unwrap().to_string(), "$.user.email");
    assert_eq!(error.key, Some(PathSegment::field("email")));
    assert_eq!(error.parent, Some(json!({"email": "nope"})));
    assert_eq!(error.root, Some(input));
}

#[test]
fn test_first_stamp_wins() {
    let input = json!(1);
    let ctx = Context::new(Some(&input));

    let inner = ValidationError::new("inner").stamp("inner", Some(&input), &ctx);
    let outer = inner.clone().stamp("outer", None, &ctx);

    assert_eq!(outer, inner);
}

#[test]
fn test_innermost_validator_is_reported_through_layers() {
    let schema = object(Shape::new().field(
        "a",
        object(Shape::new().field("b", pipe(string()).then(check(|_, _| false).named("never")))),
    ));

    let result = validate(&schema, &json!({"a": {"b": "x"}}));
    let error = result.error().unwrap();

    assert_eq!(error.expected.as_deref(), Some("check"));
    assert_eq!(error.path.as_ref().unwrap().to_string(), "$.a.b");
    assert_eq!(error.message, "$.a.b: x did not satisfy never");
}

#[test]
fn test_handler_error_takes_validator_name() {
    let wrapper = create_validator(
        "wrapper",
        |_: Option<&Value>, _: &Context<'_>, _: &Message| Err(ValidationError::new("raw")),
    )
    .build(Message::default());

    let result = validate(&wrapper, &json!(null));
    assert_eq!(result.error().unwrap().expected.as_deref(), Some("wrapper"));
}

#[test]
fn test_guard_on_hand_written_validator() {
    struct Even;

    impl Validator for Even {
        fn run(
            &self,
            value: Option<&Value>,
            ctx: &Context<'_>,
        ) -> Result<triage::Flow, ValidationError> {
            guard("even", value, ctx, || match value.and_then(Value::as_i64) {
                Some(n) if n % 2 == 0 => Ok(triage::Flow::Continue(value.cloned())),
                _ => Err(ValidationError::new("not even").with_kind(ErrorKind::PredicateFailure)),
            })
        }
    }

    let schema = object(Shape::new().field("n", Even));
    let error = validate(&schema, &json!({"n": 3})).into_result().unwrap_err();

    assert_eq!(error.expected.as_deref(), Some("even"));
    assert_eq!(error.kind, ErrorKind::PredicateFailure);
    assert_eq!(error.path.unwrap().to_string(), "$.n");
}

#[test]
fn test_string_errors_become_handler_failures() {
    let parse = try_transform(|value, _| {
        let text = value.and_then(Value::as_str).ok_or("not text")?;
        Ok(Some(json!(text.len())))
    });

    let error = validate(&parse, &json!(1)).into_result().unwrap_err();
    assert_eq!(error.message, "not text");
    assert_eq!(error.kind, ErrorKind::HandlerFailure);
    assert_eq!(error.expected.as_deref(), Some("transform"));
}

#[test]
fn test_error_kinds_by_validator() {
    let structural = validate(&object(Shape::new()), &json!(1)).into_result().unwrap_err();
    assert_eq!(structural.kind, ErrorKind::StructuralMismatch);

    let mismatch = validate(&string(), &json!(1)).into_result().unwrap_err();
    assert_eq!(mismatch.kind, ErrorKind::TypeMismatch);

    let predicate = validate(&check(|_, _| false), &json!(1)).into_result().unwrap_err();
    assert_eq!(predicate.kind, ErrorKind::PredicateFailure);
}

#[test]
fn test_stillwater_conversion_keeps_error() {
    let outcome: Validation<Option<Value>, ValidationError> = validate(&string(), &json!(false)).into();

    match outcome {
        Validation::Success(_) => panic!("Expected failure"),
        Validation::Failure(e) => assert_eq!(e.expected.as_deref(), Some("string")),
    }
}
