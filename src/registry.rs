//! Named validator storage and run-time references.
//!
//! This module provides the [`ValidatorRegistry`] type that stores validators
//! under string names, and [`RefValidator`], a validator that looks a name up
//! each time it runs. References make recursive shapes possible: a validator
//! can refer to itself by name before it is registered.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::trace;

use crate::context::Context;
use crate::error::ValidationError;
use crate::schema::{guard, Flow, Validator};
use crate::validation::{validate_with, ValidateOptions, ValidationResult};

/// Type alias for the validator storage map.
type ValidatorMap = RwLock<HashMap<String, Arc<dyn Validator>>>;

/// A thread-safe table of named validators.
///
/// # Thread Safety
///
/// The table sits behind an `Arc<RwLock<...>>`:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same table.
///
/// # Example
///
/// ```rust
/// use triage::{array, object, optional, pipe, string, Shape, ValidatorRegistry};
/// use serde_json::json;
///
/// let registry = ValidatorRegistry::new();
///
/// registry.register("Node", object(
///     Shape::new()
///         .field("name", string())
///         .field("children", pipe(optional()).then(array(registry.reference("Node")))),
/// )).unwrap();
///
/// let result = registry.validate("Node", &json!({
///     "name": "root",
///     "children": [{"name": "leaf"}, {"name": 7}]
/// })).unwrap();
///
/// let error = result.error().unwrap();
/// assert_eq!(error.path.as_ref().unwrap().to_string(), "$.children[1].name");
/// ```
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: Arc<ValidatorMap>,
    options: ValidateOptions,
}

impl ValidatorRegistry {
    /// Creates an empty registry with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the options used by [`ValidatorRegistry::validate`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::{number, ValidateOptions, ValidatorRegistry};
    /// use serde_json::json;
    ///
    /// let registry = ValidatorRegistry::new().with_options(ValidateOptions::new().root_path("cfg"));
    /// registry.register("Port", number()).unwrap();
    ///
    /// let result = registry.validate("Port", &json!("80")).unwrap();
    /// assert_eq!(result.error().unwrap().path.as_ref().unwrap().to_string(), "cfg");
    /// ```
    pub fn with_options(mut self, options: ValidateOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets how many references a registry validation may follow.
    ///
    /// The default max depth is 100. A run that follows more references
    /// than this fails instead of recursing further.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::ValidatorRegistry;
    ///
    /// let registry = ValidatorRegistry::new().with_max_depth(50);
    /// assert_eq!(registry.options().depth_limit(), 50);
    /// ```
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.max_depth(depth);
        self
    }

    /// Returns the options used by [`ValidatorRegistry::validate`].
    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    /// Registers a validator under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::{string, ValidatorRegistry};
    ///
    /// let registry = ValidatorRegistry::new();
    /// registry.register("Email", string()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("Email", string()).is_err());
    /// ```
    pub fn register<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        trace!(name = %name, "validator registered");
        validators.insert(name, Arc::new(validator));
        Ok(())
    }

    /// Retrieves a validator by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.read().get(name).cloned()
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Returns a validator that runs whatever is registered as `name`.
    ///
    /// The name is resolved on every run, so it need not be registered yet.
    /// The reference does not keep the registry alive.
    pub fn reference(&self, name: impl Into<String>) -> RefValidator {
        RefValidator {
            name: name.into(),
            validators: Arc::downgrade(&self.validators),
        }
    }

    /// Validates `value` against the validator registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name isn't registered.
    pub fn validate(&self, name: &str, value: &Value) -> Result<ValidationResult, RegistryError> {
        let validator = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        Ok(validate_with(&validator, Some(value), &self.options))
    }
}

/// Validator that resolves a registry name when it runs.
///
/// Failures raised by the resolved validator keep their own attribution.
/// An unknown name, a registry that no longer exists, or a run that has
/// already followed the context's maximum number of references fails as a
/// handler failure attributed to `"ref"`.
#[derive(Clone)]
pub struct RefValidator {
    name: String,
    validators: Weak<ValidatorMap>,
}

impl RefValidator {
    /// Returns the referenced name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> Result<Arc<dyn Validator>, ValidationError> {
        let validators = self
            .validators
            .upgrade()
            .ok_or_else(|| ValidationError::new(format!("registry for '{}' was dropped", self.name)))?;

        // Clone out of the lock so recursive references never hold it while running.
        let resolved = validators.read().get(&self.name).cloned();
        resolved.ok_or_else(|| ValidationError::new(format!("validator '{}' is not registered", self.name)))
    }
}

impl fmt::Debug for RefValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Validator for RefValidator {
    fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<Flow, ValidationError> {
        guard("ref", value, ctx, || {
            if ctx.depth() >= ctx.max_depth() {
                return Err(ValidationError::new(format!(
                    "{}: maximum reference depth {} exceeded at '{}'",
                    ctx.path(),
                    ctx.max_depth(),
                    self.name
                )));
            }
            let validator = self.resolve()?;
            trace!(name = %self.name, path = %ctx.path(), depth = ctx.depth(), "reference resolved");
            validator.run(value, &ctx.deeper())
        })
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a name that isn't registered.
    #[error("validator '{0}' not found")]
    NotFound(String),
}
