//! Running a validator over a whole input.
//!
//! This module provides the entry points ([`validate`], [`validate_at`],
//! [`validate_with`]), the [`ValidateOptions`] they accept and the
//! [`ValidationResult`] they return.

use serde_json::Value;
use stillwater::Validation;
use tracing::debug;

use crate::context::{Context, DEFAULT_MAX_DEPTH};
use crate::error::ValidationError;
use crate::path::ROOT_MARKER;
use crate::schema::Validator;

/// Options for a validation run.
///
/// # Example
///
/// ```rust
/// use triage::{number, object, validate_with, Shape, ValidateOptions};
/// use serde_json::json;
///
/// let schema = object(Shape::new().field("age", number()));
/// let options = ValidateOptions::new().root_path("body");
///
/// let input = json!({"age": "x"});
/// let result = validate_with(&schema, Some(&input), &options);
/// assert_eq!(result.error().unwrap().path.as_ref().unwrap().to_string(), "body.age");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOptions {
    root_path: String,
    max_depth: usize,
}

impl ValidateOptions {
    /// Creates options with the default `$` root marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the marker that rendered paths start with.
    pub fn root_path(mut self, marker: impl Into<String>) -> Self {
        self.root_path = marker.into();
        self
    }

    /// Sets how many registry references a run may follow before failing.
    ///
    /// The default is 100.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the root marker.
    pub fn marker(&self) -> &str {
        &self.root_path
    }

    /// Returns the reference depth limit.
    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            root_path: ROOT_MARKER.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Outcome of a validation run.
///
/// On success `result` is the validator's output, which may differ from the
/// input when transforms ran. On failure `result` is the original input and
/// `error` describes the first failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Every validator passed.
    Valid {
        /// Output of the validator; `None` when unset.
        result: Option<Value>,
    },
    /// A validator failed.
    Invalid {
        /// The stamped failure.
        error: ValidationError,
        /// The untransformed input.
        result: Option<Value>,
    },
}

impl ValidationResult {
    /// Returns true for [`ValidationResult::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    /// Returns the output on success or the original input on failure.
    pub fn result(&self) -> Option<&Value> {
        match self {
            ValidationResult::Valid { result } | ValidationResult::Invalid { result, .. } => {
                result.as_ref()
            }
        }
    }

    /// Returns the failure, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid { .. } => None,
            ValidationResult::Invalid { error, .. } => Some(error),
        }
    }

    /// Converts into a `Result`, dropping the original input on failure.
    pub fn into_result(self) -> Result<Option<Value>, ValidationError> {
        match self {
            ValidationResult::Valid { result } => Ok(result),
            ValidationResult::Invalid { error, .. } => Err(error),
        }
    }
}

impl From<ValidationResult> for Validation<Option<Value>, ValidationError> {
    fn from(outcome: ValidationResult) -> Self {
        match outcome {
            ValidationResult::Valid { result } => Validation::Success(result),
            ValidationResult::Invalid { error, .. } => Validation::Failure(error),
        }
    }
}

/// Validates `value` with a root context rendered as `$`.
///
/// # Example
///
/// ```rust
/// use triage::{check, validate};
/// use serde_json::{json, Value};
///
/// let positive = check(|v, _| v.and_then(Value::as_f64).is_some_and(|n| n > 0.0));
///
/// let result = validate(&positive, &json!(-1));
/// assert!(!result.is_valid());
/// assert_eq!(result.result(), Some(&json!(-1)));
/// ```
pub fn validate<V: Validator + ?Sized>(validator: &V, value: &Value) -> ValidationResult {
    validate_with(validator, Some(value), &ValidateOptions::default())
}

/// Validates `value` with a root context rendered as `root_path`.
pub fn validate_at<V: Validator + ?Sized>(
    validator: &V,
    value: &Value,
    root_path: impl Into<String>,
) -> ValidationResult {
    validate_with(validator, Some(value), &ValidateOptions::new().root_path(root_path))
}

/// Validates a possibly unset value with explicit options.
pub fn validate_with<V: Validator + ?Sized>(
    validator: &V,
    value: Option<&Value>,
    options: &ValidateOptions,
) -> ValidationResult {
    let ctx = Context::with_root_path(value, options.marker()).with_max_depth(options.depth_limit());
    debug!(root = %ctx.path(), "validation started");

    match validator.validate(value, &ctx) {
        Ok(result) => {
            debug!(root = %ctx.path(), "validation passed");
            ValidationResult::Valid { result }
        }
        Err(error) => {
            debug!(
                path = %error.path.as_ref().unwrap_or(ctx.path()),
                kind = %error.kind,
                expected = error.expected.as_deref().unwrap_or_default(),
                "validation failed"
            );
            ValidationResult::Invalid {
                error,
                result: value.cloned(),
            }
        }
    }
}
