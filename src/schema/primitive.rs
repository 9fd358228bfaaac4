//! Leaf kind checks.
//!
//! Each check here is an ordinary validator built with
//! [`create_validator`]: it passes a value of the right JSON kind through
//! unchanged and fails with [`ErrorKind::TypeMismatch`] otherwise. Custom
//! messages are set with `.error(..)`.

use regex::Regex;
use serde_json::Value;

use crate::context::Context;
use crate::error::{ErrorKind, ValidationError};
use crate::format::{render, type_name};

use super::factory::{create_validator, FnValidator, Message};

fn kind_check(
    name: &'static str,
    accepts: fn(&Value) -> bool,
) -> FnValidator<Message> {
    create_validator(
        name,
        move |value: Option<&Value>, ctx: &Context<'_>, message: &Message| match value {
            Some(v) if accepts(v) => Ok(value.cloned()),
            _ => Err(mismatch(name, value, ctx, message)),
        },
    )
    .build(Message::default())
}

fn mismatch(
    expected: &str,
    value: Option<&Value>,
    ctx: &Context<'_>,
    message: &Message,
) -> ValidationError {
    let message = message.resolve(|| {
        format!(
            "{}: expected {}, got {} ({})",
            ctx.path(),
            expected,
            render(value),
            type_name(value)
        )
    });
    ValidationError::new(message).with_kind(ErrorKind::TypeMismatch)
}

/// Accepts JSON strings.
///
/// # Example
///
/// ```rust
/// use triage::{string, validate};
/// use serde_json::json;
///
/// assert!(validate(&string(), &json!("hello")).is_valid());
///
/// let result = validate(&string(), &json!(5));
/// assert_eq!(result.error().unwrap().message, "$: expected string, got 5 (number)");
/// ```
pub fn string() -> FnValidator<Message> {
    kind_check("string", Value::is_string)
}

/// Accepts JSON numbers, integer or not.
pub fn number() -> FnValidator<Message> {
    kind_check("number", Value::is_number)
}

/// Accepts JSON numbers stored as integers.
///
/// Floats are rejected even when they have no fractional part, so `1.0`
/// fails while `1` passes.
pub fn integer() -> FnValidator<Message> {
    kind_check("integer", |v| v.is_i64() || v.is_u64())
}

/// Accepts JSON booleans.
pub fn boolean() -> FnValidator<Message> {
    kind_check("boolean", Value::is_boolean)
}

/// Accepts strings matching the regular expression `pattern`.
///
/// Returns an error if the pattern does not compile.
///
/// # Example
///
/// ```rust
/// use triage::{pattern, validate};
/// use serde_json::json;
///
/// let digits = pattern(r"^\d+$").unwrap();
///
/// assert!(validate(&digits, &json!("12345")).is_valid());
///
/// let result = validate(&digits, &json!("12a"));
/// assert_eq!(result.error().unwrap().message, r"$: 12a does not match ^\d+$");
/// ```
pub fn pattern(pattern: &str) -> Result<FnValidator<Message>, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(create_validator(
        "pattern",
        move |value: Option<&Value>, ctx: &Context<'_>, message: &Message| match value {
            Some(Value::String(s)) if regex.is_match(s) => Ok(value.cloned()),
            Some(Value::String(_)) => {
                let message = message.resolve(|| {
                    format!("{}: {} does not match {}", ctx.path(), render(value), regex.as_str())
                });
                Err(ValidationError::new(message).with_kind(ErrorKind::PredicateFailure))
            }
            _ => Err(mismatch("string", value, ctx, message)),
        },
    )
    .build(Message::default()))
}
