//! Logical combinator applied across all complete conditions

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// AND/OR tag sent as `logical_operator`
///
/// Anything other than `and`/`or` is kept verbatim as `Custom` and passed
/// through to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
    Custom(String),
}

impl LogicalOperator {
    pub fn parse(s: &str) -> Self {
        match s {
            "and" => LogicalOperator::And,
            "or" => LogicalOperator::Or,
            other => LogicalOperator::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Custom(s) => s.as_str(),
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, LogicalOperator::Custom(_))
    }

    /// Trace a pass-through combinator at compile time
    pub(crate) fn log_if_custom(&self) {
        if let LogicalOperator::Custom(s) = self {
            tracing::debug!(logical_operator = %s, "Passing through non-standard logical operator");
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LogicalOperator {
    fn from(s: &str) -> Self {
        LogicalOperator::parse(s)
    }
}

impl Serialize for LogicalOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogicalOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(LogicalOperator::parse(&s))
    }
}
