/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template value and binding context types.
//!
//! A [`TemplateContext`] is built once by the caller for each render call and
//! is only ever borrowed immutably by the engine. Loop iteration does not
//! copy or extend it; see [`crate::evaluator::Scope`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::{TemplateError, TemplateResult};

/// A value that can be bound in a template context.
///
/// Deserializes through [`serde_json::Value`], so JSON input follows the
/// same number rules as `From<serde_json::Value>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum TemplateValue {
    /// A null/missing value.
    #[default]
    Null,

    /// A boolean value.
    Bool(bool),

    /// An integer value.
    Integer(i64),

    /// A floating point value.
    Float(f64),

    /// A string value.
    String(String),

    /// An ordered list of values (loop iteration target).
    List(Vec<TemplateValue>),

    /// A map of string keys to values (dotted-path target).
    Map(HashMap<String, TemplateValue>),
}

impl TemplateValue {
    /// Check if this value is "truthy" for conditional evaluation.
    ///
    /// Falsy values are null, `false`, numeric zero, the empty string, the
    /// empty list and the empty map. Everything else is truthy, including
    /// the strings `"0"` and `"false"`.
    pub fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Null => false,
            TemplateValue::Bool(b) => *b,
            TemplateValue::Integer(n) => *n != 0,
            TemplateValue::Float(f) => *f != 0.0,
            TemplateValue::String(s) => !s.is_empty(),
            TemplateValue::List(items) => !items.is_empty(),
            TemplateValue::Map(m) => !m.is_empty(),
        }
    }

    /// Get a nested field by path.
    ///
    /// An empty path returns `self`. Descending into anything that is not a
    /// map yields `None`.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&TemplateValue> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };

        match self {
            TemplateValue::Map(m) => m.get(first.as_ref()).and_then(|v| v.get_path(rest)),
            _ => None,
        }
    }

    /// Render a scalar as unescaped text.
    ///
    /// Returns `None` for lists and maps, which have no text form. Booleans
    /// follow the ticket app's page conventions: `true` is `"1"` and `false`
    /// is empty.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            TemplateValue::Null => Some(String::new()),
            TemplateValue::Bool(true) => Some("1".to_string()),
            TemplateValue::Bool(false) => Some(String::new()),
            TemplateValue::Integer(n) => Some(n.to_string()),
            TemplateValue::Float(f) => Some(f.to_string()),
            TemplateValue::String(s) => Some(s.clone()),
            TemplateValue::List(_) | TemplateValue::Map(_) => None,
        }
    }

    /// The list elements, if this value is a list.
    pub fn as_list(&self) -> Option<&[TemplateValue]> {
        match self {
            TemplateValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TemplateValue::Null,
            serde_json::Value::Bool(b) => TemplateValue::Bool(b),
            // Integers past `i64::MAX` keep their exact decimal text.
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => TemplateValue::Integer(i),
                None if n.is_u64() => TemplateValue::String(n.to_string()),
                None => TemplateValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => TemplateValue::String(s),
            serde_json::Value::Array(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            serde_json::Value::Object(entries) => TemplateValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for TemplateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(TemplateValue::from)
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::String(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::String(s)
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        TemplateValue::Bool(b)
    }
}

impl From<i64> for TemplateValue {
    fn from(n: i64) -> Self {
        TemplateValue::Integer(n)
    }
}

impl From<f64> for TemplateValue {
    fn from(f: f64) -> Self {
        TemplateValue::Float(f)
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        TemplateValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<TemplateValue>> FromIterator<(K, V)> for TemplateValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TemplateValue::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The top-level bindings for one render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateContext {
    variables: HashMap<String, TemplateValue>,
}

impl TemplateContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON object.
    ///
    /// Each top-level key becomes a binding. Any other JSON root is rejected.
    pub fn from_json(value: serde_json::Value) -> TemplateResult<Self> {
        match TemplateValue::from(value) {
            TemplateValue::Map(variables) => Ok(Self { variables }),
            other => Err(TemplateError::InvalidContext {
                message: format!("expected a JSON object at the root, found {}", kind(&other)),
            }),
        }
    }

    /// Insert a binding, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TemplateValue>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style [`TemplateContext::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Copy every binding of `other` into this context. Keys already present
    /// in `self` are kept.
    pub fn merge_missing(&mut self, other: TemplateContext) {
        for (key, value) in other.variables {
            self.variables.entry(key).or_insert(value);
        }
    }

    /// Get a top-level binding.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.variables.get(key)
    }

    /// Get a binding by dotted path components.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&TemplateValue> {
        let (first, rest) = path.split_first()?;
        self.get(first.as_ref()).and_then(|v| v.get_path(rest))
    }

    /// Number of top-level bindings.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True when the context has no bindings.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>, V: Into<TemplateValue>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn kind(value: &TemplateValue) -> &'static str {
    match value {
        TemplateValue::Null => "null",
        TemplateValue::Bool(_) => "a boolean",
        TemplateValue::Integer(_) | TemplateValue::Float(_) => "a number",
        TemplateValue::String(_) => "a string",
        TemplateValue::List(_) => "an array",
        TemplateValue::Map(_) => "an object",
    }
}
