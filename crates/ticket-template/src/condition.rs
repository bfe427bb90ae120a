/*
 * condition.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conditional expression mini-grammar.
//!
//! Only two forms exist. Adding one means adding a [`Condition`] variant and
//! a branch in [`Condition::parse`] and in the evaluator.

use crate::lexer::parse_dotted_path;

/// A parsed `{% if ... %}` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `name|length == N`: the bound list has exactly `expected` elements.
    LengthEquals { path: Vec<String>, expected: usize },

    /// `name`: the binding exists and is truthy.
    Truthy { path: Vec<String> },

    /// Any other text. Always false.
    Unsupported { text: String },
}

impl Condition {
    /// Parse the text between `{% if ` and ` %}`.
    ///
    /// Forms are tried in order and the first match wins.
    pub fn parse(text: &str) -> Condition {
        let text = text.trim();

        if let Some(condition) = parse_length_equals(text) {
            return condition;
        }

        if let Some(path) = parse_dotted_path(text) {
            return Condition::Truthy { path };
        }

        Condition::Unsupported {
            text: text.to_string(),
        }
    }
}

fn parse_length_equals(text: &str) -> Option<Condition> {
    let (name, rest) = text.split_once("|length")?;
    let path = parse_dotted_path(name)?;
    let digits = rest.trim_start().strip_prefix("==")?.trim_start();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let expected = digits.parse().ok()?;
    Some(Condition::LengthEquals { path, expected })
}
