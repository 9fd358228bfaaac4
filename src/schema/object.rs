//! Keyed-shape validation.
//!
//! This module provides [`Shape`], an ordered mapping from member names to
//! validators, and [`ObjectValidator`], which checks a JSON object against it.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::{ErrorKind, ValidationError};
use crate::format::render;
use crate::path::PathSegment;

use super::factory::guard;
use super::traits::{Flow, Validator};

/// Member validators in declaration order.
///
/// # Example
///
/// ```rust
/// use triage::{number, string, Shape};
///
/// let shape = Shape::new()
///     .field("name", string())
///     .field("age", number());
///
/// let names: Vec<_> = shape.names().collect();
/// assert_eq!(names, vec!["name", "age"]);
/// ```
#[derive(Default)]
pub struct Shape {
    fields: IndexMap<String, Box<dyn Validator>>,
}

impl Shape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a member and returns self for chaining.
    ///
    /// Declaring a name twice replaces its validator but keeps its original
    /// position.
    pub fn field<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.fields.insert(name.into(), Box::new(validator));
        self
    }

    /// Returns the declared member names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the number of declared members.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no member is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K: Into<String>> FromIterator<(K, Box<dyn Validator>)> for Shape {
    fn from_iter<I: IntoIterator<Item = (K, Box<dyn Validator>)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, validator)| (name.into(), validator))
                .collect(),
        }
    }
}

/// Validates a JSON object member by member.
///
/// Members are visited in the shape's declaration order, each with its own
/// child context. The first failing member ends validation. The output is a
/// new object holding only the declared members; a member whose output is
/// unset is left out.
pub struct ObjectValidator {
    shape: Shape,
    type_error_message: Option<String>,
}

impl fmt::Debug for ObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValidator")
            .field("shape", &self.shape)
            .field("type_error_message", &self.type_error_message)
            .finish_non_exhaustive()
    }
}

/// Creates an object validator for `shape`.
///
/// # Example
///
/// ```rust
/// use triage::{number, object, string, validate, Shape};
/// use serde_json::json;
///
/// let schema = object(
///     Shape::new().field(
///         "user",
///         object(Shape::new().field("name", string()).field("age", number())),
///     ),
/// );
///
/// let result = validate(&schema, &json!({"user": {"name": "nana", "age": "bad"}}));
/// let error = result.error().unwrap();
/// assert_eq!(error.path.as_ref().unwrap().to_string(), "$.user.age");
/// assert_eq!(error.expected.as_deref(), Some("number"));
/// ```
pub fn object(shape: Shape) -> ObjectValidator {
    ObjectValidator {
        shape,
        type_error_message: None,
    }
}

impl ObjectValidator {
    /// Sets a custom message for values that are not objects.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the shape this validator checks against.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn members(
        &self,
        value: Option<&Value>,
        ctx: &Context<'_>,
    ) -> Result<Map<String, Value>, ValidationError> {
        let obj = match value {
            Some(Value::Object(obj)) => obj,
            _ => {
                let message = self.type_error_message.clone().unwrap_or_else(|| {
                    format!("{}: expected object, got {}", ctx.path(), render(value))
                });
                return Err(ValidationError::new(message).with_kind(ErrorKind::StructuralMismatch));
            }
        };

        let mut validated = Map::new();
        for (name, validator) in &self.shape.fields {
            let member = obj.get(name);
            let child = ctx.child(PathSegment::field(name.as_str()), member);
            if let Some(output) = validator.validate(member, &child)? {
                validated.insert(name.clone(), output);
            }
        }
        Ok(validated)
    }
}

impl Validator for ObjectValidator {
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        guard("object", value, ctx, || self.members(value, ctx))
            .map(|validated| Flow::Continue(Some(Value::Object(validated))))
    }
}
