//! Validation error type.
//!
//! This module provides [`ValidationError`], which carries the failure kind
//! name, the offending value and the location where the failure happened.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::context::Context;
use crate::path::{JsonPath, PathSegment};

/// Coarse classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value is not the keyed or ordered structure a structural validator requires.
    StructuralMismatch,
    /// A leaf kind check or presence check failed.
    TypeMismatch,
    /// A `check` predicate did not return `true`.
    PredicateFailure,
    /// A handler or transform function failed on its own.
    HandlerFailure,
}

impl ErrorKind {
    /// Returns a stable machine-readable name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::StructuralMismatch => "structural_mismatch",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::PredicateFailure => "predicate_failure",
            ErrorKind::HandlerFailure => "handler_failure",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure with full location context.
///
/// A fresh error carries only a message and a kind. The validator core
/// *stamps* it on the way out of the failing validator:
/// - **expected**: name of the validator that failed (e.g. `"object"`, `"check"`)
/// - **actual**: the value that validator received
/// - **path**, **key**, **parent**, **root**: copied from the validator's context
///
/// Stamping happens once. An error that already names a validator passes
/// through enclosing validators untouched, so the innermost failure wins.
///
/// # Example
///
/// ```rust
/// use triage::{ErrorKind, ValidationError};
///
/// let error = ValidationError::new("total must equal quantity * price")
///     .with_kind(ErrorKind::PredicateFailure);
///
/// assert!(!error.is_stamped());
/// assert_eq!(error.kind, ErrorKind::PredicateFailure);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Human-readable error message.
    pub message: String,
    /// Classification of the failure.
    pub kind: ErrorKind,
    /// Name of the validator the failure is attributed to.
    pub expected: Option<String>,
    /// The value the failing validator received; `None` when it was unset.
    pub actual: Option<Value>,
    /// Where the failing value lives.
    pub path: Option<JsonPath>,
    /// Key used to reach the failing value.
    pub key: Option<PathSegment>,
    /// Value enclosing the failing value.
    pub parent: Option<Value>,
    /// Root input of the validation run.
    pub root: Option<Value>,
}

impl ValidationError {
    /// Creates an unstamped error with the given message.
    ///
    /// The kind defaults to [`ErrorKind::HandlerFailure`].
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::HandlerFailure,
            expected: None,
            actual: None,
            path: None,
            key: None,
            parent: None,
            root: None,
        }
    }

    /// Sets the kind and returns self for chaining.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replaces the message and returns self for chaining.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns true once a validator name has been attached.
    pub fn is_stamped(&self) -> bool {
        self.expected.is_some()
    }

    /// Attributes this error to validator `name` at the location in `ctx`.
    ///
    /// Does nothing if the error is already stamped.
    pub fn stamp(mut self, name: &str, actual: Option<&Value>, ctx: &Context<'_>) -> Self {
        if self.is_stamped() {
            return self;
        }
        self.expected = Some(name.to_string());
        self.actual = actual.cloned();
        self.path = Some(ctx.path().clone());
        self.key = ctx.key().cloned();
        self.parent = ctx.parent().cloned();
        self.root = ctx.root().cloned();
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<String> for ValidationError {
    fn from(message: String) -> Self {
        ValidationError::new(message)
    }
}

impl From<&str> for ValidationError {
    fn from(message: &str) -> Self {
        ValidationError::new(message)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ValidationError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ValidationError::new(error.to_string())
    }
}

// Validation errors cross thread boundaries inside shared registries.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};
