//! Validator units and the ways they compose.
//!
//! Every unit implements [`Validator`]. Leaf checks ([`string`], [`number`],
//! [`required`], [`check`], ...) are built from plain handlers with
//! [`create_validator`]; structural units ([`object`], [`array`]) and
//! [`pipe`] combine other validators. All of them stop at the first failure.
//!
//! # Example
//!
//! ```rust
//! use triage::{array, check, object, optional, pipe, string, transform, validate, Shape};
//! use serde_json::{json, Value};
//!
//! let schema = object(
//!     Shape::new()
//!         .field("name", pipe(string()).then(transform(|v, _| {
//!             v.and_then(Value::as_str).map(|s| json!(s.trim()))
//!         })))
//!         .field("tags", pipe(optional()).then(array(string())))
//!         .field("age", check(|v, _| v.and_then(Value::as_u64).is_some_and(|n| n < 150)).named("plausible_age")),
//! );
//!
//! let result = validate(&schema, &json!({"name": "  nana ", "age": 3}));
//! assert_eq!(result.result(), Some(&json!({"name": "nana", "age": 3})));
//! ```

mod array;
mod combinators;
mod control;
mod factory;
mod object;
mod primitive;
mod traits;

pub use array::{array, ArrayValidator};
pub use combinators::{check, pipe, transform, try_check, try_transform, CheckConfig, Pipe};
pub use control::{optional, required, Optional};
pub use factory::{create_validator, guard, FnValidator, Message, ValidatorFactory};
pub use object::{object, ObjectValidator, Shape};
pub use primitive::{boolean, integer, number, pattern, string};
pub use traits::{Flow, Validator};
