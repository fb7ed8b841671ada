//! Field metadata structures

use crate::condition::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value-shape category of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Set of selected ids
    MultiSelect,
    /// Yes/no flag
    Boolean,
    /// ISO date, either matched exactly or bounded by a range
    Date,
    /// Free text, matched by substring
    Text,
}

impl FieldKind {
    /// Operators a field of this kind may ever declare
    pub fn allowed_operators(self) -> &'static [Operator] {
        match self {
            FieldKind::MultiSelect => &[Operator::In, Operator::NotIn],
            FieldKind::Boolean => &[Operator::Equals],
            FieldKind::Date => &[Operator::Equals, Operator::Between],
            FieldKind::Text => &[Operator::Contains],
        }
    }

    #[inline]
    pub fn supports(self, operator: Operator) -> bool {
        self.allowed_operators().contains(&operator)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::MultiSelect => "multi_select",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Text => "text",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one filterable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    /// Human label for pickers; the engine never reads it
    #[serde(default)]
    pub label: String,
    pub kind: FieldKind,
    /// Legal operators, in the order a picker should offer them
    pub operators: Vec<Operator>,
}

impl FieldDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        operators: &[Operator],
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            operators: operators.to_vec(),
        }
    }

    /// Whether `operator` is legal for this field
    #[inline]
    pub fn accepts(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }
}
