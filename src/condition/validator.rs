//! Completeness validation
//!
//! `shape` is the single gate in front of both compilers. A condition that
//! passes comes out as a `ShapedCondition` whose value variant fixes the
//! operator, so an impossible pairing such as a scalar date under `between`
//! cannot be represented past this point.

use crate::condition::model::{Condition, ConditionValue, Operator};
use crate::registry::{FieldKind, FieldRegistry};
use thiserror::Error;

/// Why a condition was left out of the compiled output
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    #[error("no field selected")]
    MissingField,
    #[error("field is not registered")]
    UnknownField,
    #[error("no operator selected")]
    MissingOperator,
    #[error("operator is not legal for the field")]
    IllegalOperator,
    #[error("value is empty")]
    EmptyValue,
    #[error("value shape does not match the field and operator")]
    ValueShapeMismatch,
}

/// Validated value, keyed by field kind and operator together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapedValue<'a> {
    /// MultiSelect + In
    AnyOf(&'a [String]),
    /// MultiSelect + NotIn
    NoneOf(&'a [String]),
    /// Boolean + Equals
    Flag(bool),
    /// Date + Equals
    OnDate(&'a str),
    /// Date + Between
    DateBetween { start: &'a str, end: &'a str },
    /// Text + Contains, already trimmed
    Contains(&'a str),
}

impl ShapedValue<'_> {
    pub const fn operator(&self) -> Operator {
        match self {
            ShapedValue::AnyOf(_) => Operator::In,
            ShapedValue::NoneOf(_) => Operator::NotIn,
            ShapedValue::Flag(_) | ShapedValue::OnDate(_) => Operator::Equals,
            ShapedValue::DateBetween { .. } => Operator::Between,
            ShapedValue::Contains(_) => Operator::Contains,
        }
    }
}

/// A complete condition, borrowed from its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedCondition<'a> {
    pub id: &'a str,
    pub field: &'a str,
    pub value: ShapedValue<'a>,
}

impl ShapedCondition<'_> {
    #[inline]
    pub fn operator(&self) -> Operator {
        self.value.operator()
    }
}

/// Validate a condition and project it onto its compiled shape
pub fn shape<'a>(
    condition: &'a Condition,
    registry: &FieldRegistry,
) -> Result<ShapedCondition<'a>, Exclusion> {
    let field = condition.field.as_deref().ok_or(Exclusion::MissingField)?;
    let descriptor = registry.describe(field).ok_or(Exclusion::UnknownField)?;
    let operator = condition.operator.ok_or(Exclusion::MissingOperator)?;
    if !descriptor.accepts(operator) {
        return Err(Exclusion::IllegalOperator);
    }

    let value = shape_value(descriptor.kind, operator, &condition.value)?;

    Ok(ShapedCondition {
        id: &condition.id,
        field,
        value,
    })
}

fn shape_value(
    kind: FieldKind,
    operator: Operator,
    value: &ConditionValue,
) -> Result<ShapedValue<'_>, Exclusion> {
    use ConditionValue as V;

    match (kind, operator, value) {
        (_, _, V::Absent) => Err(Exclusion::EmptyValue),

        (FieldKind::MultiSelect, _, V::Selection(ids)) if ids.is_empty() => {
            Err(Exclusion::EmptyValue)
        }
        (FieldKind::MultiSelect, Operator::In, V::Selection(ids)) => Ok(ShapedValue::AnyOf(ids)),
        (FieldKind::MultiSelect, Operator::NotIn, V::Selection(ids)) => {
            Ok(ShapedValue::NoneOf(ids))
        }

        // false is a real answer, not an empty one
        (FieldKind::Boolean, Operator::Equals, V::Flag(b)) => Ok(ShapedValue::Flag(*b)),

        (FieldKind::Date, Operator::Equals, V::Text(date)) if date.is_empty() => {
            Err(Exclusion::EmptyValue)
        }
        (FieldKind::Date, Operator::Equals, V::Text(date)) => Ok(ShapedValue::OnDate(date)),
        (FieldKind::Date, Operator::Between, V::Range(range)) => {
            date_between(&range.start, &range.end)
        }
        (FieldKind::Date, Operator::Between, V::Selection(pair)) => match pair.as_slice() {
            [start, end] => date_between(start, end),
            [] | [_] => Err(Exclusion::EmptyValue),
            _ => Err(Exclusion::ValueShapeMismatch),
        },

        (FieldKind::Text, Operator::Contains, V::Text(text)) => match text.trim() {
            "" => Err(Exclusion::EmptyValue),
            trimmed => Ok(ShapedValue::Contains(trimmed)),
        },

        _ => Err(Exclusion::ValueShapeMismatch),
    }
}

fn date_between<'a>(start: &'a str, end: &'a str) -> Result<ShapedValue<'a>, Exclusion> {
    if start.is_empty() || end.is_empty() {
        return Err(Exclusion::EmptyValue);
    }
    Ok(ShapedValue::DateBetween { start, end })
}

/// Whether a condition is ready to be compiled
#[inline]
pub fn is_complete(condition: &Condition, registry: &FieldRegistry) -> bool {
    shape(condition, registry).is_ok()
}

/// Complete conditions in list order, already shaped
///
/// Both compilers consume this iterator; excluded conditions are logged and
/// skipped.
pub fn active_conditions<'a>(
    conditions: &'a [Condition],
    registry: &'a FieldRegistry,
) -> impl Iterator<Item = ShapedCondition<'a>> + 'a {
    conditions
        .iter()
        .filter_map(move |condition| match shape(condition, registry) {
            Ok(shaped) => Some(shaped),
            Err(reason) => {
                tracing::debug!(
                    condition_id = %condition.id,
                    field = condition.field.as_deref().unwrap_or(""),
                    reason = %reason,
                    "Condition excluded"
                );
                None
            }
        })
}
