//! Turning plain handler functions into validators.
//!
//! [`create_validator`] names a handler and returns a [`ValidatorFactory`].
//! The factory captures configuration (a custom message, a predicate name,
//! ...) with [`ValidatorFactory::build`], producing an [`FnValidator`].
//! Every run of that validator goes through [`guard`], which attributes a
//! failure to the validator's name and location unless an inner validator
//! already did.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::Context;
use crate::error::ValidationError;

use super::traits::{Flow, Validator};

/// Type alias for handler functions stored in factories.
pub(crate) type HandlerFn<C> = dyn Fn(Option<&Value>, &Context<'_>, &C) -> Result<Option<Value>, ValidationError>
    + Send
    + Sync;

/// Runs `run` and stamps any failure with `name`, `value` and the location in `ctx`.
///
/// Errors that are already stamped come back unchanged. Implementations of
/// [`Validator`] written by hand should route their body through this
/// function to get the same attribution as built-in validators.
///
/// # Example
///
/// ```rust
/// use triage::{guard, Context, ValidationError};
/// use serde_json::json;
///
/// let input = json!(3);
/// let ctx = Context::new(Some(&input));
///
/// let result: Result<(), _> = guard("odd", Some(&input), &ctx, || {
///     Err(ValidationError::new("three is right out"))
/// });
/// assert_eq!(result.unwrap_err().expected.as_deref(), Some("odd"));
/// ```
pub fn guard<T>(
    name: &str,
    value: Option<&Value>,
    ctx: &Context<'_>,
    run: impl FnOnce() -> Result<T, ValidationError>,
) -> Result<T, ValidationError> {
    run().map_err(|error| error.stamp(name, value, ctx))
}

/// Names a handler and returns a factory for validators built from it.
///
/// The handler receives the value (`None` when unset), the context and the
/// configuration captured by [`ValidatorFactory::build`]. Any error type with
/// a `From` conversion into [`ValidationError`] can be raised with `?`;
/// strings and boxed errors convert into unstamped handler failures.
///
/// # Example
///
/// ```rust
/// use triage::{create_validator, validate, Context, Message, ValidationError};
/// use serde_json::{json, Value};
///
/// let even = create_validator("even", |value: Option<&Value>, ctx: &Context<'_>, message: &Message| {
///     match value.and_then(Value::as_i64) {
///         Some(n) if n % 2 == 0 => Ok(value.cloned()),
///         _ => Err(ValidationError::new(
///             message.resolve(|| format!("{}: expected an even number", ctx.path())),
///         )),
///     }
/// });
///
/// let result = validate(&even.build(Message::default()), &json!(3));
/// let error = result.error().unwrap();
/// assert_eq!(error.expected.as_deref(), Some("even"));
/// assert_eq!(error.message, "$: expected an even number");
/// ```
pub fn create_validator<C, F>(name: impl Into<String>, handler: F) -> ValidatorFactory<C>
where
    F: Fn(Option<&Value>, &Context<'_>, &C) -> Result<Option<Value>, ValidationError>
        + Send
        + Sync
        + 'static,
{
    let handler: Arc<HandlerFn<C>> = Arc::new(handler);
    ValidatorFactory {
        name: Arc::from(name.into().as_str()),
        handler,
    }
}

/// A named handler waiting for its configuration.
pub struct ValidatorFactory<C> {
    name: Arc<str>,
    handler: Arc<HandlerFn<C>>,
}

impl<C> ValidatorFactory<C> {
    /// Returns the name failures are attributed to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Captures `config` and returns the validator.
    ///
    /// A factory can build any number of validators; they share the handler.
    pub fn build(&self, config: C) -> FnValidator<C> {
        FnValidator {
            name: Arc::clone(&self.name),
            handler: Arc::clone(&self.handler),
            config,
        }
    }
}

impl<C> Clone for ValidatorFactory<C> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<C> fmt::Debug for ValidatorFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A validator built from a named handler and its configuration.
pub struct FnValidator<C> {
    name: Arc<str>,
    handler: Arc<HandlerFn<C>>,
    config: C,
}

impl<C> FnValidator<C> {
    /// Returns the name failures are attributed to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the captured configuration.
    pub fn config(&self) -> &C {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut C {
        &mut self.config
    }
}

impl<C: Clone> Clone for FnValidator<C> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            handler: Arc::clone(&self.handler),
            config: self.config.clone(),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for FnValidator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: Send + Sync> Validator for FnValidator<C> {
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        guard(&self.name, value, ctx, || {
            (self.handler)(value, ctx, &self.config)
        })
        .map(Flow::Continue)
    }
}

/// Optional caller-supplied failure message.
///
/// The configuration most built-in validators capture. Without a custom
/// message the validator falls back to its default template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message(Option<String>);

impl Message {
    /// Creates a custom message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(Some(message.into()))
    }

    /// Returns the custom message, if any.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns the custom message or builds the default one.
    pub fn resolve(&self, default: impl FnOnce() -> String) -> String {
        self.0.clone().unwrap_or_else(default)
    }
}

impl FnValidator<Message> {
    /// Sets a custom failure message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::{string, validate};
    /// use serde_json::json;
    ///
    /// let name = string().error("name must be text");
    ///
    /// let result = validate(&name, &json!(42));
    /// assert_eq!(result.error().unwrap().message, "name must be text");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        *self.config_mut() = Message::new(message);
        self
    }
}
