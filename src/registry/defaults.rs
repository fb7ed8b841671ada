//! Built-in field table

use crate::condition::Operator;
use crate::registry::field::{FieldDescriptor, FieldKind};
use crate::registry::table::FieldRegistry;
use once_cell::sync::Lazy;

/// (id, label, kind, operators) rows of the built-in table
const DEFAULT_FIELDS: &[(&str, &str, FieldKind, &[Operator])] = &[
    ("categories", "Categories", FieldKind::MultiSelect, &[Operator::In, Operator::NotIn]),
    ("platforms", "Platforms", FieldKind::MultiSelect, &[Operator::In, Operator::NotIn]),
    ("rpt", "Repeat purchase", FieldKind::Boolean, &[Operator::Equals]),
    ("is_active", "Active", FieldKind::Boolean, &[Operator::Equals]),
    ("created_at", "Created at", FieldKind::Date, &[Operator::Equals, Operator::Between]),
    ("updated_at", "Updated at", FieldKind::Date, &[Operator::Equals, Operator::Between]),
    ("ad_name", "Ad name", FieldKind::Text, &[Operator::Contains]),
    ("advertiser_name", "Advertiser name", FieldKind::Text, &[Operator::Contains]),
];

static DEFAULT_REGISTRY: Lazy<FieldRegistry> = Lazy::new(|| {
    let fields = DEFAULT_FIELDS
        .iter()
        .map(|&(id, label, kind, operators)| FieldDescriptor::new(id, label, kind, operators))
        .collect();

    // The table above is checked by test_default_table_is_valid
    match FieldRegistry::new(fields) {
        Ok(registry) => registry,
        Err(err) => panic!("built-in field table is invalid: {}", err),
    }
});

/// Process-wide registry built from the built-in table
#[inline]
pub fn default_registry() -> &'static FieldRegistry {
    &DEFAULT_REGISTRY
}
