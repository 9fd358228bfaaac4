//! Ordered-sequence validation.
//!
//! This module provides [`ArrayValidator`] for validating every element of
//! a JSON array against one item validator.

use std::fmt;

use serde_json::Value;

use crate::context::Context;
use crate::error::{ErrorKind, ValidationError};
use crate::format::render;
use crate::path::PathSegment;

use super::factory::guard;
use super::traits::{Flow, Validator};

/// Validates each element of a JSON array.
///
/// Elements are visited by index, each with its own child context keyed by
/// that index. The first failing element ends validation. The output is a
/// new array of per-element outputs; an unset output becomes `null` so the
/// indices stay aligned.
pub struct ArrayValidator<V> {
    item: V,
    type_error_message: Option<String>,
}

impl<V: fmt::Debug> fmt::Debug for ArrayValidator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayValidator")
            .field("item", &self.item)
            .field("type_error_message", &self.type_error_message)
            .finish_non_exhaustive()
    }
}

/// Creates an array validator applying `item` to every element.
///
/// # Example
///
/// ```rust
/// use triage::{array, number, validate};
/// use serde_json::json;
///
/// let schema = array(number());
///
/// assert!(validate(&schema, &json!([1, 2, 3])).is_valid());
///
/// let result = validate(&schema, &json!([1, "x", 3]));
/// assert_eq!(result.error().unwrap().path.as_ref().unwrap().to_string(), "$[1]");
/// ```
pub fn array<V: Validator>(item: V) -> ArrayValidator<V> {
    ArrayValidator {
        item,
        type_error_message: None,
    }
}

impl<V: Validator> ArrayValidator<V> {
    /// Sets a custom message for values that are not arrays.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the item validator.
    pub fn item(&self) -> &V {
        &self.item
    }

    fn items(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Vec<Value>, ValidationError> {
        let arr = match value {
            Some(Value::Array(arr)) => arr,
            _ => {
                let message = self.type_error_message.clone().unwrap_or_else(|| {
                    format!("{}: expected array, got {}", ctx.path(), render(value))
                });
                return Err(ValidationError::new(message).with_kind(ErrorKind::StructuralMismatch));
            }
        };

        let mut validated = Vec::with_capacity(arr.len());
        for (index, element) in arr.iter().enumerate() {
            let child = ctx.child(PathSegment::index(index), Some(element));
            let output = self.item.validate(Some(element), &child)?;
            validated.push(output.unwrap_or(Value::Null));
        }
        Ok(validated)
    }
}

impl<V: Validator> Validator for ArrayValidator<V> {
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        guard("array", value, ctx, || self.items(value, ctx))
            .map(|validated| Flow::Continue(Some(Value::Array(validated))))
    }
}
