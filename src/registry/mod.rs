//! Field registry module
//!
//! This module holds the static metadata for every filterable field: its
//! value kind and the operators it accepts.

mod defaults;
mod field;
mod table;

pub use defaults::*;
pub use field::*;
pub use table::*;
