//! Filter compilation module
//!
//! This module turns a list of conditions plus a logical combinator into
//! the two request artifacts: a parameter map and a query string. Both are
//! driven from the same shaped condition stream.

mod emit;
mod logical;
mod params;
mod query;


pub use logical::*;
pub use params::*;
pub use query::*;
