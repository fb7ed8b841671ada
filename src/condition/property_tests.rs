//! Property tests for the condition module
//!
//! Completeness rules per field kind, checked against the built-in registry.

use proptest::prelude::*;

use crate::condition::{is_complete, shape, Condition, ConditionValue, DateRange, Exclusion, Operator};
use crate::registry::{default_registry, FieldKind};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

fn field_strategy() -> impl Strategy<Value = String> {
    let ids: Vec<String> = default_registry().iter().map(|d| d.id.clone()).collect();
    prop::sample::select(ids)
}

fn value_strategy() -> impl Strategy<Value = ConditionValue> {
    prop_oneof![
        Just(ConditionValue::Absent),
        prop::collection::vec("[a-z0-9]{0,4}", 0..=3).prop_map(ConditionValue::Selection),
        any::<bool>().prop_map(ConditionValue::Flag),
        "[ a-z0-9-]{0,8}".prop_map(ConditionValue::Text),
        ("[0-9-]{0,10}", "[0-9-]{0,10}")
            .prop_map(|(s, e)| ConditionValue::Range(DateRange::new(s, e))),
    ]
}

fn condition_strategy() -> impl Strategy<Value = Condition> {
    (
        proptest::option::of(field_strategy()),
        proptest::option::of(operator_strategy()),
        value_strategy(),
    )
        .prop_map(|(field, operator, value)| Condition {
            id: "c".to_string(),
            field,
            operator,
            value,
        })
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// A shaped condition always carries the operator it was given
    #[test]
    fn prop_shape_preserves_field_and_operator(cond in condition_strategy()) {
        if let Ok(shaped) = shape(&cond, default_registry()) {
            prop_assert_eq!(Some(shaped.field), cond.field.as_deref());
            prop_assert_eq!(Some(shaped.operator()), cond.operator);

            let descriptor = default_registry().describe(shaped.field).unwrap();
            prop_assert!(descriptor.accepts(shaped.operator()));
        }
    }

    /// Missing field, operator or value is never complete
    #[test]
    fn prop_missing_parts_are_incomplete(cond in condition_strategy()) {
        if cond.field.is_none() || cond.operator.is_none() || cond.value.is_absent() {
            prop_assert!(!is_complete(&cond, default_registry()));
        }
    }

    /// An operator outside the field's declared set is excluded
    #[test]
    fn prop_illegal_operator_excluded(
        field in field_strategy(),
        operator in operator_strategy(),
        value in value_strategy()
    ) {
        let descriptor = default_registry().describe(&field).unwrap();
        prop_assume!(!descriptor.accepts(operator));

        let cond = Condition::from_parts("c", field.clone(), operator, value);
        prop_assert_eq!(shape(&cond, default_registry()).unwrap_err(), Exclusion::IllegalOperator);
    }

    /// Ranges are complete only when both halves are filled
    #[test]
    fn prop_range_needs_both_halves(start in "[0-9-]{0,10}", end in "[0-9-]{0,10}") {
        let cond = Condition::from_parts(
            "c",
            "created_at",
            Operator::Between,
            DateRange::new(start.clone(), end.clone()),
        );
        let expected = !start.is_empty() && !end.is_empty();
        prop_assert_eq!(is_complete(&cond, default_registry()), expected);
    }

    /// Boolean fields are complete for either flag value
    #[test]
    fn prop_boolean_complete_for_both_values(flag in any::<bool>()) {
        for descriptor in default_registry().iter().filter(|d| d.kind == FieldKind::Boolean) {
            let cond = Condition::from_parts("c", descriptor.id.clone(), Operator::Equals, flag);
            prop_assert!(is_complete(&cond, default_registry()));
        }
    }

    /// Resetting the field always leaves the condition incomplete
    #[test]
    fn prop_set_field_resets(cond in condition_strategy(), field in field_strategy()) {
        let mut cond = cond;
        cond.set_field(field);
        prop_assert!(!is_complete(&cond, default_registry()));
    }
}
