//! The validator capability shared by every unit.
//!
//! This module provides the [`Validator`] trait and the [`Flow`] signal a
//! validator returns to its enclosing pipeline.

use std::sync::Arc;

use serde_json::Value;

use crate::context::Context;
use crate::error::ValidationError;

/// Outcome of a successful validator run.
///
/// `Skip` asks the enclosing pipeline to stop and return the carried value
/// as its own output. Outside a pipeline both variants just carry a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Hand the value to the next stage.
    Continue(Option<Value>),
    /// End the enclosing pipeline with this value.
    Skip(Option<Value>),
}

impl Flow {
    /// Returns the carried value, whatever the variant.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Flow::Continue(value) | Flow::Skip(value) => value,
        }
    }

    /// Returns true for [`Flow::Skip`].
    pub fn is_skip(&self) -> bool {
        matches!(self, Flow::Skip(_))
    }
}

/// A unit that checks or re-shapes a value at a location.
///
/// Input `None` means the value is unset, which is distinct from
/// `Some(&Value::Null)`. The `Send + Sync` bounds allow validator trees to be
/// shared across threads and stored as `Box<dyn Validator>`.
///
/// # Example
///
/// ```rust
/// use triage::{object, string, number, Context, Shape, Validator};
/// use serde_json::json;
///
/// let user = object(
///     Shape::new()
///         .field("name", string())
///         .field("age", number()),
/// );
///
/// let input = json!({"name": "nana", "age": 3});
/// let output = user.validate(Some(&input), &Context::new(Some(&input))).unwrap();
/// assert_eq!(output, Some(input));
/// ```
pub trait Validator: Send + Sync {
    /// Runs the validator, reporting whether an enclosing pipeline should go on.
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError>;

    /// Runs the validator and returns its output value.
    fn validate(
        &self,
        value: Option<&Value>,
        ctx: &Context<'_>,
    ) -> Result<Option<Value>, ValidationError> {
        self.run(value, ctx).map(Flow::into_value)
    }

    /// Returns true for control units that may end a pipeline early.
    ///
    /// A control unit can precede any stage, whatever that stage accepts,
    /// because the stage never runs when the unit skips.
    fn is_control(&self) -> bool {
        false
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        (**self).run(value, ctx)
    }

    fn is_control(&self) -> bool {
        (**self).is_control()
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        (**self).run(value, ctx)
    }

    fn is_control(&self) -> bool {
        (**self).is_control()
    }
}
