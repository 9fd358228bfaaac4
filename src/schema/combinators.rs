//! Composition operators.
//!
//! This module provides the operators that chain and adapt validators:
//! - `pipe`: run stages in order, feeding each output into the next stage
//! - `transform` / `try_transform`: map a value to a new one
//! - `check` / `try_check`: gate a value on a predicate
//!
//! # Example
//!
//! ```rust
//! use triage::{check, pipe, string, transform, validate};
//! use serde_json::{json, Value};
//!
//! let slug = pipe(string())
//!     .then(transform(|value, _| {
//!         value
//!             .and_then(Value::as_str)
//!             .map(|s| json!(s.trim().to_lowercase().replace(' ', "-")))
//!     }))
//!     .then(check(|value, _| value.and_then(Value::as_str).is_some_and(|s| !s.is_empty())).named("non_empty"));
//!
//! let result = validate(&slug, &json!("  Hello World "));
//! assert_eq!(result.result(), Some(&json!("hello-world")));
//! ```

use std::fmt;

use serde_json::Value;
use tracing::trace;

use crate::context::Context;
use crate::error::{ErrorKind, ValidationError};
use crate::format::render;

use super::factory::{create_validator, guard, FnValidator};
use super::traits::{Flow, Validator};

/// Stages run in order over one shared context.
///
/// Built with [`pipe`] and [`Pipe::then`], or the [`pipe!`](crate::pipe!)
/// macro. A pipe has at least one stage by construction.
///
/// When a stage returns [`Flow::Skip`] the remaining stages do not run and
/// the skipped value becomes the pipe's output. The pipe itself always
/// reports [`Flow::Continue`], so a skip ends only the pipe it happened in.
pub struct Pipe {
    stages: Vec<Box<dyn Validator>>,
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("stages", &self.stages.len())
            .finish_non_exhaustive()
    }
}

/// Starts a pipeline with its first stage.
///
/// # Example
///
/// ```rust
/// use triage::{optional, pipe, string, validate};
/// use serde_json::{json, Value};
///
/// let nickname = pipe(optional()).then(string());
///
/// assert_eq!(validate(&nickname, &Value::Null).result(), Some(&Value::Null));
/// assert_eq!(validate(&nickname, &json!("ok")).result(), Some(&json!("ok")));
/// assert!(!validate(&nickname, &json!(7)).is_valid());
/// ```
pub fn pipe<V: Validator + 'static>(first: V) -> Pipe {
    Pipe {
        stages: vec![Box::new(first)],
    }
}

impl Pipe {
    /// Appends a stage and returns self for chaining.
    pub fn then<V: Validator + 'static>(mut self, next: V) -> Self {
        self.stages.push(Box::new(next));
        self
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false: a pipe is created with its first stage.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Validator for Pipe {
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        guard("pipe", value, ctx, || {
            let mut current = value.cloned();
            for (index, stage) in self.stages.iter().enumerate() {
                match stage.run(current.as_ref(), ctx)? {
                    Flow::Continue(next) => current = next,
                    Flow::Skip(next) => {
                        trace!(
                            path = %ctx.path(),
                            stage = index,
                            skipped = self.stages.len() - index - 1,
                            "pipeline short-circuited"
                        );
                        return Ok(Flow::Continue(next));
                    }
                }
            }
            Ok(Flow::Continue(current))
        })
    }
}

/// Builds a [`Pipe`] from one or more stages.
///
/// `pipe![a, b, c]` is shorthand for `pipe(a).then(b).then(c)`; an empty
/// invocation does not compile.
///
/// # Example
///
/// ```rust
/// use triage::{number, pipe, required, validate};
/// use serde_json::json;
///
/// let age = pipe![required(), number()];
/// assert!(validate(&age, &json!(30)).is_valid());
/// ```
#[macro_export]
macro_rules! pipe {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::pipe($first)$(.then($rest))*
    };
}

/// Maps the value through `f`. Never fails on its own.
///
/// `f` receives `None` when the value is unset and may return `None` to
/// produce an unset value.
pub fn transform<F>(f: F) -> FnValidator<()>
where
    F: Fn(Option<&Value>, &Context<'_>) -> Option<Value> + Send + Sync + 'static,
{
    create_validator(
        "transform",
        move |value: Option<&Value>, ctx: &Context<'_>, _: &()| Ok(f(value, ctx)),
    )
    .build(())
}

/// Maps the value through a fallible `f`.
///
/// An error returned by `f` is attributed to `"transform"` at the current
/// location, unless it was already attributed elsewhere.
///
/// # Example
///
/// ```rust
/// use triage::{try_transform, validate, ValidationError};
/// use serde_json::{json, Value};
///
/// let parse = try_transform(|value, _| {
///     let text = value.and_then(Value::as_str).ok_or("expected text")?;
///     let n: i64 = text
///         .parse()
///         .map_err(|_| ValidationError::new(format!("{text} is not an integer")))?;
///     Ok(Some(json!(n)))
/// });
///
/// assert_eq!(validate(&parse, &json!("42")).result(), Some(&json!(42)));
///
/// let result = validate(&parse, &json!("x"));
/// assert_eq!(result.error().unwrap().expected.as_deref(), Some("transform"));
/// ```
pub fn try_transform<F>(f: F) -> FnValidator<()>
where
    F: Fn(Option<&Value>, &Context<'_>) -> Result<Option<Value>, ValidationError>
        + Send
        + Sync
        + 'static,
{
    create_validator(
        "transform",
        move |value: Option<&Value>, ctx: &Context<'_>, _: &()| f(value, ctx),
    )
    .build(())
}

/// Configuration captured by [`check`] validators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    name: Option<String>,
    message: Option<String>,
}

impl CheckConfig {
    /// Returns the predicate name shown in default messages.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("check")
    }

    /// Returns the custom message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Passes the value through only when `predicate` returns `true`.
///
/// On failure the message is the one set with `.error(..)`, or
/// `"{path}: {value} did not satisfy {name}"` where `name` is set with
/// `.named(..)` and defaults to `check`.
///
/// # Example
///
/// ```rust
/// use triage::{check, validate};
/// use serde_json::{json, Value};
///
/// let positive = check(|value, _| value.and_then(Value::as_f64).is_some_and(|n| n > 0.0))
///     .named("is_positive");
///
/// let result = validate(&positive, &json!(0));
/// assert_eq!(result.error().unwrap().message, "$: 0 did not satisfy is_positive");
/// ```
pub fn check<F>(predicate: F) -> FnValidator<CheckConfig>
where
    F: Fn(Option<&Value>, &Context<'_>) -> bool + Send + Sync + 'static,
{
    try_check(move |value, ctx| Ok(predicate(value, ctx)))
}

/// Like [`check`], with a predicate that can fail on its own.
///
/// A predicate error propagates as-is instead of the default message.
pub fn try_check<F>(predicate: F) -> FnValidator<CheckConfig>
where
    F: Fn(Option<&Value>, &Context<'_>) -> Result<bool, ValidationError> + Send + Sync + 'static,
{
    create_validator(
        "check",
        move |value: Option<&Value>, ctx: &Context<'_>, config: &CheckConfig| {
            if predicate(value, ctx)? {
                return Ok(value.cloned());
            }
            let message = config.message.clone().unwrap_or_else(|| {
                format!(
                    "{}: {} did not satisfy {}",
                    ctx.path(),
                    render(value),
                    config.name()
                )
            });
            Err(ValidationError::new(message).with_kind(ErrorKind::PredicateFailure))
        },
    )
    .build(CheckConfig::default())
}

impl FnValidator<CheckConfig> {
    /// Names the predicate for default failure messages.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.config_mut().name = Some(name.into());
        self
    }

    /// Sets a custom failure message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.config_mut().message = Some(message.into());
        self
    }
}
