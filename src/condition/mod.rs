//! Condition model and completeness validation module
//!
//! This module holds the user-editable `Condition` record and the single
//! predicate deciding whether a condition is ready to compile.

mod model;
mod validator;

#[cfg(test)]
mod property_tests;

pub use model::*;
pub use validator::*;
