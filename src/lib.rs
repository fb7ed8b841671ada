//! Filter Query Core - filter condition and query-compilation engine
//!
//! Callers assemble a list of conditions (field + operator + value) and a
//! logical combinator; the engine keeps only the complete conditions and
//! compiles them into two equivalent artifacts for a search/listing API:
//! a structured parameter map and a percent-encoded query string.
//!
//! ```
//! use filter_query_core::{compile_query_string, Condition, LogicalOperator, Operator};
//!
//! let conditions = vec![Condition::from_parts("c1", "rpt", Operator::Equals, false)];
//! assert_eq!(
//!     compile_query_string(&conditions, &LogicalOperator::Or),
//!     "rpt=false&rpt_operator=eq&logical_operator=or"
//! );
//! ```

pub mod compiler;
pub mod condition;
pub mod error;
pub mod filter_set;
pub mod registry;

pub use compiler::{
    compile_params, compile_params_with, compile_query_string, compile_query_string_with,
    FilterParams, LogicalOperator, ParamValue,
};
pub use condition::{is_complete, Condition, ConditionValue, DateRange, Operator};
pub use error::{FilterQueryError, Result};
pub use filter_set::FilterSet;
pub use registry::{default_registry, FieldDescriptor, FieldKind, FieldRegistry};
