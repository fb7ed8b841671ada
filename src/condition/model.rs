//! Condition value model

use crate::error::FilterQueryError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Any of the selected ids (in)
    #[serde(rename = "in")]
    In,
    /// None of the selected ids (not_in)
    #[serde(rename = "not_in")]
    NotIn,
    /// Exact match (eq)
    #[serde(rename = "eq")]
    Equals,
    /// Inclusive date range (between)
    #[serde(rename = "between")]
    Between,
    /// Substring match (contains)
    #[serde(rename = "contains")]
    Contains,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::In,
        Operator::NotIn,
        Operator::Equals,
        Operator::Between,
        Operator::Contains,
    ];

    /// Wire tag used in both compiled outputs
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Equals => "eq",
            Operator::Between => "between",
            Operator::Contains => "contains",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FilterQueryError::UnknownOperator(s.to_string()))
    }
}

/// Ordered date range; either half may still be empty while being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both halves populated
    #[inline]
    pub fn is_filled(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}

/// Raw value entered for a condition
///
/// The variant is whatever the caller supplied; whether it fits the field
/// and operator is decided by the validator, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ConditionValue {
    #[default]
    Absent,
    /// Selected ids of a multi-select field
    Selection(Vec<String>),
    Flag(bool),
    /// Single date or free text
    Text(String),
    Range(DateRange),
}

impl ConditionValue {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, ConditionValue::Absent)
    }
}

/// Loose JSON decoding for upstream records
///
/// Arrays become selections only when every item is a string or a number;
/// an array holding anything else decodes to `Absent` as a whole, so the
/// condition is excluded instead of compiling a subset of what was sent.
/// Object halves that are not strings read as empty.
impl From<Value> for ConditionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConditionValue::Absent,
            Value::Bool(b) => ConditionValue::Flag(b),
            Value::Number(n) => ConditionValue::Text(n.to_string()),
            Value::String(s) => ConditionValue::Text(s),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect::<Option<Vec<String>>>()
                .map_or(ConditionValue::Absent, ConditionValue::Selection),
            Value::Object(mut map) => {
                let mut half = |key: &str| match map.remove(key) {
                    Some(Value::String(s)) => s,
                    _ => String::new(),
                };
                let start = half("start");
                let end = half("end");
                ConditionValue::Range(DateRange { start, end })
            }
        }
    }
}

impl From<ConditionValue> for Value {
    fn from(value: ConditionValue) -> Self {
        match value {
            ConditionValue::Absent => Value::Null,
            ConditionValue::Selection(ids) => {
                Value::Array(ids.into_iter().map(Value::String).collect())
            }
            ConditionValue::Flag(b) => Value::Bool(b),
            ConditionValue::Text(s) => Value::String(s),
            ConditionValue::Range(range) => serde_json::json!({
                "start": range.start,
                "end": range.end,
            }),
        }
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        ConditionValue::Flag(b)
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        ConditionValue::Text(s)
    }
}

impl From<Vec<String>> for ConditionValue {
    fn from(ids: Vec<String>) -> Self {
        ConditionValue::Selection(ids)
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(ids: Vec<&str>) -> Self {
        ConditionValue::Selection(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<DateRange> for ConditionValue {
    fn from(range: DateRange) -> Self {
        ConditionValue::Range(range)
    }
}

/// One user-entered constraint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "lenient_operator")]
    pub operator: Option<Operator>,
    #[serde(default)]
    pub value: ConditionValue,
}

impl Condition {
    /// Fresh condition with field, operator and value unset
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Fully specified condition
    pub fn from_parts(
        id: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            id: id.into(),
            field: Some(field.into()),
            operator: Some(operator),
            value: value.into(),
        }
    }

    /// Change the field; operator and value no longer apply and are reset
    pub fn set_field(&mut self, field: impl Into<String>) {
        self.field = Some(field.into());
        self.operator = None;
        self.value = ConditionValue::Absent;
    }

    pub fn clear_field(&mut self) {
        self.field = None;
        self.operator = None;
        self.value = ConditionValue::Absent;
    }

    /// Change the operator; the value shape may differ so it is reset
    pub fn set_operator(&mut self, operator: Operator) {
        self.operator = Some(operator);
        self.value = ConditionValue::Absent;
    }

    pub fn clear_operator(&mut self) {
        self.operator = None;
        self.value = ConditionValue::Absent;
    }

    pub fn set_value(&mut self, value: impl Into<ConditionValue>) {
        self.value = value.into();
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field: Option<String> = Option::deserialize(deserializer)?;
    Ok(field.filter(|f| !f.is_empty()))
}

/// Unknown or blank operators from upstream become "unset"
fn lenient_operator<'de, D>(deserializer: D) -> Result<Option<Operator>, D::Error>
where
    D: Deserializer<'de>,
{
    let operator: Option<String> = Option::deserialize(deserializer)?;
    Ok(operator.and_then(|op| op.parse().ok()))
}
