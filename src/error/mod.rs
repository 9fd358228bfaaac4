//! Error types for validation failures.
//!
//! This module provides [`ValidationError`], the single failure shape produced
//! by every validator, and [`ErrorKind`], its coarse classification.

mod validation_error;

pub use validation_error::{ErrorKind, ValidationError};
