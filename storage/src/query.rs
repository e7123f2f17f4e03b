//! Query builder: typed filters built from partial entities.
//!
//! A [`Filter`] is an ordered list of `(field, Clause)` pairs combined with AND. Scalar
//! fields become [`Clause::Eq`]; array fields (user `team`/`org`, template `tags`) become
//! [`Clause::ContainsAll`], which requires every given value to be present in the stored
//! array regardless of order or extra elements.
//!
//! Drivers either render the filter to their native query language ([`Filter::to_document`]
//! gives the MongoDB shape) or evaluate it in-process with [`Filter::matches`].

use serde_json::{json, Value};

use crate::models::Document;

/// A single field predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Stored value equals the given value.
    Eq(Value),
    /// Stored array contains every given value. Over zero values this matches anything.
    ContainsAll(Vec<String>),
}

impl Clause {
    /// Evaluates the clause against a stored field value (`None` when the field is absent).
    pub fn matches(&self, stored: Option<&Value>) -> bool {
        match self {
            // Scalar equality against an array field matches any element, as MongoDB does.
            Clause::Eq(expected) => match stored {
                Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
                Some(value) => value == expected,
                None => expected.is_null(),
            },
            Clause::ContainsAll(values) => match stored {
                Some(Value::Array(items)) => values
                    .iter()
                    .all(|v| items.iter().any(|item| item.as_str() == Some(v.as_str()))),
                _ => values.is_empty(),
            },
        }
    }
}

/// Conjunction of field clauses. The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Clause)>,
}

impl Filter {
    /// Creates the universal filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a clause for `field`.
    pub fn with_clause(mut self, field: &str, clause: Clause) -> Self {
        match self.clauses.iter_mut().find(|(name, _)| name == field) {
            Some(existing) => existing.1 = clause,
            None => self.clauses.push((field.to_string(), clause)),
        }
        self
    }

    pub fn equals(self, field: &str, value: impl Into<Value>) -> Self {
        self.with_clause(field, Clause::Eq(value.into()))
    }

    /// Adds an equality clause when `value` is present; a no-op otherwise.
    pub fn equals_opt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.equals(field, v),
            None => self,
        }
    }

    pub fn contains_all(self, field: &str, values: &[String]) -> Self {
        self.with_clause(field, Clause::ContainsAll(values.to_vec()))
    }

    /// Adds a contains-all clause when `values` is present, even if it is empty.
    pub fn contains_all_opt(self, field: &str, values: Option<&[String]>) -> Self {
        match values {
            Some(v) => self.contains_all(field, v),
            None => self,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Clause> {
        self.clauses
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, clause)| clause)
    }

    pub fn clauses(&self) -> impl Iterator<Item = (&str, &Clause)> {
        self.clauses.iter().map(|(name, clause)| (name.as_str(), clause))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Renders the filter in MongoDB query syntax: `{field: value}` for equality and
    /// `{field: {"$all": [..]}}` for contains-all.
    ///
    /// An empty contains-all clause is left out: MongoDB's `{"$all": []}` matches nothing,
    /// while the clause itself matches every document.
    pub fn to_document(&self) -> Document {
        self.clauses
            .iter()
            .filter_map(|(field, clause)| {
                let value = match clause {
                    Clause::Eq(value) => value.clone(),
                    Clause::ContainsAll(values) if values.is_empty() => return None,
                    Clause::ContainsAll(values) => json!({ "$all": values }),
                };
                Some((field.clone(), value))
            })
            .collect()
    }

    /// Evaluates the filter against a stored document.
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, clause)| clause.matches(document.get(field)))
    }
}
