//! Field registry lookup table

use crate::condition::Operator;
use crate::error::{FilterQueryError, Result};
use crate::registry::field::FieldDescriptor;
use ahash::AHashMap;
use serde::Deserialize;

/// Immutable table of filterable fields
///
/// Iteration follows insertion order, which callers use to lay out field
/// pickers. Lookups go through a hash index into the ordered list.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    index: AHashMap<String, usize>,
}

/// On-disk registry configuration: `{"fields": [...]}`
#[derive(Debug, Deserialize)]
struct RegistryConfig {
    fields: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    /// Build a registry, rejecting inconsistent descriptors
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(fields.len());

        for (position, descriptor) in fields.iter().enumerate() {
            validate_descriptor(descriptor)?;
            if index.insert(descriptor.id.clone(), position).is_some() {
                return Err(FilterQueryError::DuplicateField(descriptor.id.clone()));
            }
        }

        tracing::debug!(fields = fields.len(), "Field registry built");
        Ok(Self { fields, index })
    }

    /// Load a registry from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        Self::new(config.fields)
    }

    /// Look up a field by id
    #[inline]
    pub fn describe(&self, field: &str) -> Option<&FieldDescriptor> {
        self.index.get(field).map(|&position| &self.fields[position])
    }

    #[inline]
    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Operators legal for `field`, empty for unknown fields
    pub fn operators_for(&self, field: &str) -> &[Operator] {
        self.describe(field)
            .map(|descriptor| descriptor.operators.as_slice())
            .unwrap_or(&[])
    }

    /// All fields in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldRegistry {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_descriptor(descriptor: &FieldDescriptor) -> Result<()> {
    if descriptor.operators.is_empty() {
        return Err(FilterQueryError::EmptyOperators(descriptor.id.clone()));
    }

    for (i, &operator) in descriptor.operators.iter().enumerate() {
        if !descriptor.kind.supports(operator) {
            return Err(FilterQueryError::UnsupportedOperator {
                field: descriptor.id.clone(),
                operator,
                kind: descriptor.kind,
            });
        }
        if descriptor.operators[..i].contains(&operator) {
            return Err(FilterQueryError::RepeatedOperator {
                field: descriptor.id.clone(),
                operator,
            });
        }
    }

    Ok(())
}
