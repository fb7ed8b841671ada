//! FilterSet - editable list of conditions plus the combinator
//!
//! Mirrors what a filter panel holds while the user edits it. Compiling
//! reads a snapshot of the current list and never mutates it.

use crate::compiler::{
    compile_params_with, compile_query_string_with, FilterParams, LogicalOperator,
};
use crate::condition::{active_conditions, is_complete, Condition, ConditionValue, Operator};
use crate::error::{FilterQueryError, Result};
use crate::registry::{default_registry, FieldRegistry};

// ============================================================================
// FilterSet
// ============================================================================

/// Ordered conditions and the logical combinator applied across them
#[derive(Debug, Clone)]
pub struct FilterSet<'r> {
    registry: &'r FieldRegistry,
    conditions: Vec<Condition>,
    logical: LogicalOperator,
    /// Source of `condition-<n>` ids; never reused after removal
    next_id: u64,
}

impl FilterSet<'static> {
    /// Empty set over the built-in registry
    pub fn new() -> Self {
        FilterSet::with_registry(default_registry())
    }
}

impl Default for FilterSet<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> FilterSet<'r> {
    pub fn with_registry(registry: &'r FieldRegistry) -> Self {
        Self {
            registry,
            conditions: Vec::new(),
            logical: LogicalOperator::default(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn registry(&self) -> &'r FieldRegistry {
        self.registry
    }

    #[inline]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[inline]
    pub fn logical_operator(&self) -> &LogicalOperator {
        &self.logical
    }

    /// Set the combinator; anything but `and`/`or` is passed through verbatim
    pub fn set_logical_operator(&mut self, logical: impl Into<LogicalOperator>) {
        let logical = logical.into();
        if let LogicalOperator::Custom(s) = &logical {
            tracing::warn!(logical_operator = %s, "Non-standard logical operator will be passed through");
        }
        self.logical = logical;
    }

    /// Append a blank condition and return its id
    ///
    /// Generated ids skip any `condition-<n>` already taken by a pushed
    /// condition.
    pub fn add_condition(&mut self) -> String {
        let id = loop {
            let candidate = format!("condition-{}", self.next_id);
            self.next_id += 1;
            if !self.contains(&candidate) {
                break candidate;
            }
        };
        self.conditions.push(Condition::new(id.clone()));
        id
    }

    /// Append a caller-built condition, keeping its id
    pub fn push(&mut self, condition: Condition) -> Result<()> {
        if self.contains(&condition.id) {
            return Err(FilterQueryError::DuplicateCondition(condition.id));
        }
        self.conditions.push(condition);
        Ok(())
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.conditions.iter().any(|c| c.id == id)
    }

    pub fn remove_condition(&mut self, id: &str) -> Result<Condition> {
        let position = self
            .conditions
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| FilterQueryError::ConditionNotFound(id.to_string()))?;
        Ok(self.conditions.remove(position))
    }

    /// Drop every condition; the combinator is kept
    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    pub fn condition(&self, id: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    pub fn condition_mut(&mut self, id: &str) -> Result<&mut Condition> {
        self.conditions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| FilterQueryError::ConditionNotFound(id.to_string()))
    }

    pub fn set_field(&mut self, id: &str, field: impl Into<String>) -> Result<()> {
        self.condition_mut(id)?.set_field(field);
        Ok(())
    }

    pub fn set_operator(&mut self, id: &str, operator: Operator) -> Result<()> {
        self.condition_mut(id)?.set_operator(operator);
        Ok(())
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<ConditionValue>) -> Result<()> {
        self.condition_mut(id)?.set_value(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of conditions that would reach the compiled output
    pub fn active_count(&self) -> usize {
        active_conditions(&self.conditions, self.registry).count()
    }

    pub fn has_active_filters(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| is_complete(c, self.registry))
    }

    pub fn to_params(&self) -> FilterParams {
        compile_params_with(&self.conditions, &self.logical, self.registry)
    }

    pub fn to_query_string(&self) -> String {
        compile_query_string_with(&self.conditions, &self.logical, self.registry)
    }
}
