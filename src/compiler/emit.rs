//! Per-condition output entries shared by both compilers
//!
//! Each shaped condition expands into a short, fixed list of keyed entries.
//! The entries of a whole condition list are folded into one key-ordered
//! map, and the parameter map and the query string are two serializations
//! of that map.

use crate::condition::{ShapedCondition, ShapedValue};
use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};

pub(crate) const LOGICAL_OPERATOR_KEY: &str = "logical_operator";

/// Key suffix appended to the field id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Suffix {
    None,
    Start,
    End,
    Operator,
}

impl Suffix {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Suffix::None => "",
            Suffix::Start => "_start",
            Suffix::End => "_end",
            Suffix::Operator => "_operator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryValue<'a> {
    List(&'a [String]),
    Bool(bool),
    /// Caller-supplied text; percent-encoded in the query string
    Str(&'a str),
    /// Operator tag from a fixed safe alphabet; never encoded
    Tag(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry<'a> {
    pub field: &'a str,
    pub suffix: Suffix,
    pub value: EntryValue<'a>,
}

impl Entry<'_> {
    pub(crate) fn key(&self) -> String {
        let suffix = self.suffix.as_str();
        let mut key = String::with_capacity(self.field.len() + suffix.len());
        key.push_str(self.field);
        key.push_str(suffix);
        key
    }
}

/// Expand one complete condition into its output entries, in emission order
pub(crate) fn entries<'a>(condition: &ShapedCondition<'a>) -> SmallVec<[Entry<'a>; 3]> {
    let field = condition.field;
    let entry = |suffix, value| Entry {
        field,
        suffix,
        value,
    };
    let operator = entry(Suffix::Operator, EntryValue::Tag(condition.operator().as_str()));

    match condition.value {
        ShapedValue::AnyOf(ids) | ShapedValue::NoneOf(ids) => {
            smallvec![entry(Suffix::None, EntryValue::List(ids)), operator]
        }
        ShapedValue::Flag(b) => smallvec![entry(Suffix::None, EntryValue::Bool(b)), operator],
        ShapedValue::OnDate(date) => smallvec![entry(Suffix::None, EntryValue::Str(date)), operator],
        ShapedValue::DateBetween { start, end } => smallvec![
            entry(Suffix::Start, EntryValue::Str(start)),
            entry(Suffix::End, EntryValue::Str(end)),
            operator,
        ],
        ShapedValue::Contains(text) => {
            smallvec![entry(Suffix::None, EntryValue::Str(text)), operator]
        }
    }
}

/// Fold the entries of every complete condition into one map
///
/// A later condition overwrites an earlier entry with the same key and the
/// key keeps its first position.
pub(crate) fn collect_entries<'a>(
    conditions: impl Iterator<Item = ShapedCondition<'a>>,
) -> IndexMap<String, EntryValue<'a>> {
    let mut collected = IndexMap::new();
    for condition in conditions {
        for entry in entries(&condition) {
            collected.insert(entry.key(), entry.value);
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_entries() {
        let shaped = ShapedCondition {
            id: "c",
            field: "created_at",
            value: ShapedValue::DateBetween {
                start: "2024-01-01",
                end: "2024-01-31",
            },
        };

        let keys: Vec<String> = entries(&shaped).iter().map(Entry::key).collect();
        assert_eq!(
            keys,
            vec!["created_at_start", "created_at_end", "created_at_operator"]
        );
    }

    #[test]
    fn test_operator_entry_is_last() {
        let shaped = ShapedCondition {
            id: "c",
            field: "rpt",
            value: ShapedValue::Flag(false),
        };

        let out = entries(&shaped);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].value, EntryValue::Bool(false));
        assert_eq!(out[1].value, EntryValue::Tag("eq"));
    }

    #[test]
    fn test_collect_entries_last_write_wins() {
        let first = ["1".to_string()];
        let second = ["2".to_string()];
        let shaped = vec![
            ShapedCondition {
                id: "a",
                field: "categories",
                value: ShapedValue::AnyOf(&first),
            },
            ShapedCondition {
                id: "b",
                field: "rpt",
                value: ShapedValue::Flag(true),
            },
            ShapedCondition {
                id: "c",
                field: "categories",
                value: ShapedValue::NoneOf(&second),
            },
        ];

        let collected = collect_entries(shaped.into_iter());
        let keys: Vec<&str> = collected.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["categories", "categories_operator", "rpt", "rpt_operator"]
        );
        assert_eq!(collected["categories"], EntryValue::List(&second));
        assert_eq!(collected["categories_operator"], EntryValue::Tag("not_in"));
    }
}
