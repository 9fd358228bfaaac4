//! Presence gates.
//!
//! `required` rejects null and unset values. `optional` lets them through
//! and ends the enclosing pipeline, so later stages only ever see a present
//! value.

use serde_json::Value;

use crate::context::Context;
use crate::error::{ErrorKind, ValidationError};
use crate::format::render;

use super::factory::{create_validator, FnValidator, Message};
use super::traits::{Flow, Validator};

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Fails when the value is null or unset; otherwise passes it through.
///
/// # Example
///
/// ```rust
/// use triage::{object, required, validate, Shape};
/// use serde_json::json;
///
/// let schema = object(Shape::new().field("id", required()));
///
/// let result = validate(&schema, &json!({}));
/// let error = result.error().unwrap();
/// assert_eq!(error.expected.as_deref(), Some("required"));
/// assert_eq!(error.path.as_ref().unwrap().to_string(), "$.id");
/// ```
pub fn required() -> FnValidator<Message> {
    create_validator(
        "required",
        |value: Option<&Value>, ctx: &Context<'_>, message: &Message| {
            if is_absent(value) {
                let message =
                    message.resolve(|| format!("{}: value is required, got {}", ctx.path(), render(value)));
                return Err(ValidationError::new(message).with_kind(ErrorKind::TypeMismatch));
            }
            Ok(value.cloned())
        },
    )
    .build(Message::default())
}

/// Control unit that ends the enclosing pipeline on null or unset values.
///
/// Present values pass through untouched and the pipeline goes on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optional;

/// Returns the [`Optional`] control unit.
///
/// # Example
///
/// ```rust
/// use triage::{number, object, optional, pipe, validate, Shape};
/// use serde_json::json;
///
/// let schema = object(Shape::new().field("age", pipe(optional()).then(number())));
///
/// assert_eq!(validate(&schema, &json!({})).result(), Some(&json!({})));
/// assert!(validate(&schema, &json!({"age": 3})).is_valid());
/// assert!(!validate(&schema, &json!({"age": "3"})).is_valid());
/// ```
pub fn optional() -> Optional {
    Optional
}

impl Validator for Optional {
    fn run(&self, value: Option<&Value>, _ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        if is_absent(value) {
            Ok(Flow::Skip(value.cloned()))
        } else {
            Ok(Flow::Continue(value.cloned()))
        }
    }

    fn is_control(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_rejects_null_and_unset() {
        let validator = required();
        let ctx = Context::new(None);

        let unset = validator.validate(None, &ctx).unwrap_err();
        assert_eq!(unset.message, "$: value is required, got undefined");
        assert_eq!(unset.kind, ErrorKind::TypeMismatch);
        assert!(unset.actual.is_none());

        let null = validator.validate(Some(&Value::Null), &ctx).unwrap_err();
        assert_eq!(null.message, "$: value is required, got null");
        assert_eq!(null.actual, Some(Value::Null));
    }

    #[test]
    fn test_required_passes_present_values() {
        let validator = required();
        for input in [json!(0), json!(false), json!(""), json!([]), json!({})] {
            let ctx = Context::new(Some(&input));
            assert_eq!(validator.validate(Some(&input), &ctx).unwrap(), Some(input.clone()));
        }
    }

    #[test]
    fn test_required_custom_message() {
        let validator = required().error("id is mandatory");
        let error = validator.validate(None, &Context::new(None)).unwrap_err();
        assert_eq!(error.message, "id is mandatory");
    }

    #[test]
    fn test_optional_flow() {
        let validator = optional();
        let ctx = Context::new(None);

        assert!(validator.is_control());
        assert_eq!(validator.run(None, &ctx).unwrap(), Flow::Skip(None));
        assert_eq!(
            validator.run(Some(&Value::Null), &ctx).unwrap(),
            Flow::Skip(Some(Value::Null))
        );
        assert_eq!(
            validator.run(Some(&json!("x")), &ctx).unwrap(),
            Flow::Continue(Some(json!("x")))
        );
        assert!(!required().is_control());
    }
}
