//! # Triage
//!
//! Composable, fail-fast validation and transformation pipelines for JSON
//! values, with located errors.
//!
//! ## Overview
//!
//! A validator checks a value, may reshape it, and either hands its output on
//! or fails. Validators compose: [`pipe`] chains them, [`object`] and
//! [`array`] descend into structures, [`optional`] ends a pipeline early on
//! missing values. The first failure stops the run and comes back as a
//! [`ValidationError`] that records where it happened (path, key, parent,
//! root) and which validator raised it.
//!
//! ## Core Types
//!
//! - [`Validator`]: the trait every unit implements
//! - [`Context`]: where the current value lives in the input
//! - [`JsonPath`]: a rendered location such as `$.users[0].email`
//! - [`ValidationError`]: the first failure, stamped with its location
//! - [`ValidationResult`]: what [`validate`] returns
//!
//! ## Example
//!
//! ```rust
//! use triage::{check, number, object, optional, pipe, required, string, validate, Shape};
//! use serde_json::{json, Value};
//!
//! let user = object(
//!     Shape::new()
//!         .field("name", pipe(required()).then(string()))
//!         .field("age", pipe(optional()).then(number()).then(
//!             check(|v, _| v.and_then(Value::as_f64).is_some_and(|n| n >= 0.0)).named("non_negative"),
//!         )),
//! );
//!
//! assert!(validate(&user, &json!({"name": "nana"})).is_valid());
//!
//! let result = validate(&user, &json!({"name": "nana", "age": -1}));
//! let error = result.error().unwrap();
//! assert_eq!(error.message, "$.age: -1 did not satisfy non_negative");
//! assert_eq!(result.result(), Some(&json!({"name": "nana", "age": -1})));
//! ```

pub mod context;
pub mod error;
pub mod format;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;

pub use context::{make_ctx, Context, DEFAULT_MAX_DEPTH};
pub use error::{ErrorKind, ValidationError};
pub use path::{JsonPath, PathSegment, ROOT_MARKER};
pub use registry::{RefValidator, RegistryError, ValidatorRegistry};
pub use schema::{
    array, boolean, check, create_validator, guard, integer, number, object, optional, pattern,
    pipe, required, string, transform, try_check, try_transform, ArrayValidator, CheckConfig,
    Flow, FnValidator, Message, ObjectValidator, Optional, Pipe, Shape, Validator,
    ValidatorFactory,
};
pub use validation::{validate, validate_at, validate_with, ValidateOptions, ValidationResult};
