//! Parameter map compiler

use crate::compiler::emit::{collect_entries, EntryValue, LOGICAL_OPERATOR_KEY};
use crate::compiler::logical::LogicalOperator;
use crate::condition::{active_conditions, Condition};
use crate::registry::{default_registry, FieldRegistry};
use indexmap::IndexMap;
use serde::Serialize;

/// Value of one compiled parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    List(Vec<String>),
    Bool(bool),
    Str(String),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(ids) => Some(ids),
            _ => None,
        }
    }
}

fn to_param_value(value: EntryValue<'_>) -> ParamValue {
    match value {
        EntryValue::List(ids) => ParamValue::List(ids.to_vec()),
        EntryValue::Bool(b) => ParamValue::Bool(b),
        EntryValue::Str(s) => ParamValue::Str(s.to_string()),
        EntryValue::Tag(tag) => ParamValue::Str(tag.to_string()),
    }
}

/// Compiled parameter map, in emission order
///
/// Empty (and without `logical_operator`) when no condition was complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterParams {
    params: IndexMap<String, ParamValue>,
}

impl FilterParams {
    #[inline]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The combinator, present only when at least one condition compiled
    pub fn logical_operator(&self) -> Option<&str> {
        self.get(LOGICAL_OPERATOR_KEY).and_then(ParamValue::as_str)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.params
                .iter()
                .map(|(key, value)| {
                    let json = match value {
                        ParamValue::List(ids) => serde_json::Value::Array(
                            ids.iter().cloned().map(serde_json::Value::String).collect(),
                        ),
                        ParamValue::Bool(b) => serde_json::Value::Bool(*b),
                        ParamValue::Str(s) => serde_json::Value::String(s.clone()),
                    };
                    (key.clone(), json)
                })
                .collect(),
        )
    }

    pub fn into_inner(self) -> IndexMap<String, ParamValue> {
        self.params
    }
}

impl<'a> IntoIterator for &'a FilterParams {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// Compile conditions into a parameter map using the built-in registry
pub fn compile_params(conditions: &[Condition], logical: &LogicalOperator) -> FilterParams {
    compile_params_with(conditions, logical, default_registry())
}

/// Compile conditions into a parameter map
///
/// Later conditions overwrite earlier ones that produce the same key.
pub fn compile_params_with(
    conditions: &[Condition],
    logical: &LogicalOperator,
    registry: &FieldRegistry,
) -> FilterParams {
    let mut params: IndexMap<String, ParamValue> =
        collect_entries(active_conditions(conditions, registry))
            .into_iter()
            .map(|(key, value)| (key, to_param_value(value)))
            .collect();

    if !params.is_empty() {
        logical.log_if_custom();
        params.insert(
            LOGICAL_OPERATOR_KEY.to_string(),
            ParamValue::Str(logical.as_str().to_string()),
        );
    }

    tracing::trace!(params = params.len(), "Compiled filter params");
    FilterParams { params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{DateRange, Operator};
    use serde_json::json;

    #[test]
    fn test_multi_select_params() {
        let conds = vec![Condition::from_parts(
            "c1",
            "categories",
            Operator::In,
            vec!["3", "7"],
        )];
        let params = compile_params(&conds, &LogicalOperator::And);

        assert_eq!(
            params.to_json(),
            json!({
                "categories": ["3", "7"],
                "categories_operator": "in",
                "logical_operator": "and",
            })
        );
    }

    #[test]
    fn test_boolean_false_params() {
        let conds = vec![Condition::from_parts("c1", "rpt", Operator::Equals, false)];
        let params = compile_params(&conds, &LogicalOperator::Or);

        assert_eq!(params.get("rpt"), Some(&ParamValue::Bool(false)));
        assert_eq!(
            params.to_json(),
            json!({"rpt": false, "rpt_operator": "eq", "logical_operator": "or"})
        );
    }

    #[test]
    fn test_date_range_params() {
        let conds = vec![Condition::from_parts(
            "c1",
            "created_at",
            Operator::Between,
            DateRange::new("2024-01-01", "2024-01-31"),
        )];
        let params = compile_params(&conds, &LogicalOperator::And);

        assert!(!params.contains_key("created_at"));
        assert_eq!(
            params.to_json(),
            json!({
                "created_at_start": "2024-01-01",
                "created_at_end": "2024-01-31",
                "created_at_operator": "between",
                "logical_operator": "and",
            })
        );
    }

    #[test]
    fn test_date_equals_params() {
        let conds = vec![Condition::from_parts(
            "c1",
            "updated_at",
            Operator::Equals,
            "2024-02-29",
        )];
        let params = compile_params(&conds, &LogicalOperator::And);

        assert_eq!(params.get("updated_at").and_then(ParamValue::as_str), Some("2024-02-29"));
        assert_eq!(
            params.get("updated_at_operator").and_then(ParamValue::as_str),
            Some("eq")
        );
    }

    #[test]
    fn test_partial_range_is_empty() {
        let conds = vec![Condition::from_parts(
            "c1",
            "created_at",
            Operator::Between,
            DateRange::new("2024-01-01", ""),
        )];
        let params = compile_params(&conds, &LogicalOperator::And);

        assert!(params.is_empty());
        assert_eq!(params.logical_operator(), None);
    }

    #[test]
    fn test_text_trimmed() {
        let conds = vec![Condition::from_parts(
            "c1",
            "ad_name",
            Operator::Contains,
            "  Summer Promo  ",
        )];
        let params = compile_params(&conds, &LogicalOperator::And);

        assert_eq!(params.get("ad_name").and_then(ParamValue::as_str), Some("Summer Promo"));
        assert_eq!(
            params.get("ad_name_operator").and_then(ParamValue::as_str),
            Some("contains")
        );
    }

    #[test]
    fn test_empty_input() {
        let params = compile_params(&[], &LogicalOperator::Or);
        assert!(params.is_empty());
        assert_eq!(params.to_json(), json!({}));
    }

    #[test]
    fn test_key_order_and_last_write_wins() {
        let conds = vec![
            Condition::from_parts("a", "categories", Operator::In, vec!["1"]),
            Condition::from_parts("b", "rpt", Operator::Equals, true),
            Condition::from_parts("c", "categories", Operator::NotIn, vec!["2"]),
        ];
        let params = compile_params(&conds, &LogicalOperator::And);

        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(
            keys,
            vec![
                "categories",
                "categories_operator",
                "rpt",
                "rpt_operator",
                "logical_operator",
            ]
        );
        assert_eq!(
            params.get("categories").and_then(ParamValue::as_list),
            Some(&["2".to_string()][..])
        );
        assert_eq!(
            params.get("categories_operator").and_then(ParamValue::as_str),
            Some("not_in")
        );
    }

    #[test]
    fn test_custom_logical_operator_passes_through() {
        let conds = vec![Condition::from_parts("a", "rpt", Operator::Equals, true)];
        let params = compile_params(&conds, &LogicalOperator::parse("nand"));
        assert_eq!(params.logical_operator(), Some("nand"));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let conds = vec![
            Condition::from_parts("a", "platforms", Operator::In, vec!["web"]),
            Condition::from_parts("b", "is_active", Operator::Equals, true),
        ];
        let params = compile_params(&conds, &LogicalOperator::And);
        assert_eq!(serde_json::to_value(&params).unwrap(), params.to_json());
    }
}
