//! Query-string compiler

use crate::compiler::emit::{collect_entries, EntryValue, LOGICAL_OPERATOR_KEY};
use crate::compiler::logical::LogicalOperator;
use crate::condition::{active_conditions, Condition};
use crate::registry::{default_registry, FieldRegistry};
use urlencoding::encode;

/// Compile conditions into a query string using the built-in registry
pub fn compile_query_string(conditions: &[Condition], logical: &LogicalOperator) -> String {
    compile_query_string_with(conditions, logical, default_registry())
}

/// Compile conditions into a percent-encoded query string
///
/// Returns `""` when no condition was complete. Keys repeated across
/// conditions keep only the last condition's value, as in the parameter map.
pub fn compile_query_string_with(
    conditions: &[Condition],
    logical: &LogicalOperator,
    registry: &FieldRegistry,
) -> String {
    let mut tokens: Vec<String> = Vec::new();

    for (key, value) in collect_entries(active_conditions(conditions, registry)) {
        push_tokens(&mut tokens, &key, value);
    }

    if tokens.is_empty() {
        return String::new();
    }

    logical.log_if_custom();
    let combinator = match logical {
        LogicalOperator::Custom(s) => encode(s).into_owned(),
        standard => standard.as_str().to_string(),
    };
    tokens.push(format!("{}={}", LOGICAL_OPERATOR_KEY, combinator));

    tracing::trace!(tokens = tokens.len(), "Compiled filter query string");
    tokens.join("&")
}

fn push_tokens(tokens: &mut Vec<String>, key: &str, value: EntryValue<'_>) {
    let key = encode(key);

    match value {
        EntryValue::List(ids) => {
            tokens.extend(ids.iter().map(|id| format!("{}[]={}", key, encode(id))));
        }
        EntryValue::Bool(b) => tokens.push(format!("{}={}", key, b)),
        EntryValue::Str(s) => tokens.push(format!("{}={}", key, encode(s))),
        EntryValue::Tag(tag) => tokens.push(format!("{}={}", key, tag)),
    }
}
