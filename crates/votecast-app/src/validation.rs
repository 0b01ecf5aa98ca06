//! Declarative per-field validation.
//!
//! Each field declares an ordered rule list; evaluation short-circuits
//! at the first failing rule, so a field carries at most one message at
//! a time. A validation pass recomputes the whole error map from the
//! current draft; nothing is patched incrementally.

use std::collections::BTreeMap;

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Fails when the trimmed value is empty (or a number is absent).
    Required,
    /// Fails when a text value exceeds this many characters.
    MaxLength(usize),
    /// Fails when a present number falls outside the inclusive range.
    /// An absent number is valid: the field is optional.
    NumericRange {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}

/// A field value adapted for rule evaluation.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// Free-text input.
    Text(&'a str),
    /// Numeric input; `None` when the field was left empty.
    Number(Option<i64>),
}

impl Rule {
    /// Evaluate the rule, returning the failure message if it fails.
    #[must_use]
    pub fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        match (self, value) {
            (Self::Required, FieldValue::Text(text)) => text
                .trim()
                .is_empty()
                .then(|| "This field is required".to_string()),
            (Self::Required, FieldValue::Number(number)) => number
                .is_none()
                .then(|| "This field is required".to_string()),
            (Self::MaxLength(limit), FieldValue::Text(text)) => (text.chars().count() > *limit)
                .then(|| format!("Max length is {limit} characters")),
            // Length has no meaning for numbers.
            (Self::MaxLength(_), FieldValue::Number(_)) => None,
            (Self::NumericRange { min, max }, FieldValue::Number(Some(number))) => {
                (number < min || number > max)
                    .then(|| format!("Must be between {min} and {max}"))
            }
            (Self::NumericRange { .. }, FieldValue::Number(None)) => None,
            // Ranges only apply to numeric fields.
            (Self::NumericRange { .. }, FieldValue::Text(_)) => None,
        }
    }
}

/// Field-path → message map produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Message for a field path, if the field failed.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Record a message for a field path. The first message wins; later
    /// ones for the same path are ignored.
    pub fn set(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_insert_with(|| message.into());
    }

    /// Whether the pass found no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violating fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(path, message)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Accumulates one validation pass over a draft.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    /// Start an empty pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a field's ordered rules, recording at most one message.
    pub fn check(&mut self, path: &str, value: FieldValue<'_>, rules: &[Rule]) {
        for rule in rules {
            if let Some(message) = rule.check(&value) {
                self.errors.set(path, message);
                return;
            }
        }
    }

    /// Finish the pass, yielding the recomputed error map.
    #[must_use]
    pub fn finish(self) -> ValidationErrors {
        self.errors
    }
}
