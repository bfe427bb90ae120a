/*
 * lexer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template tokenizer.
//!
//! Splits template source into literal text and directive tags. A candidate
//! tag that does not match the directive syntax exactly is not an error: the
//! scanner moves one byte past its opening brace and the characters stay in
//! the surrounding text token.
//!
//! Recognized forms (byte-for-byte):
//!
//! - `{{ path }}` where `path` is `identifier(.identifier)*`
//! - `{% if <condition> %}` and `{% endif %}`
//! - `{% for identifier in path %}` and `{% endfor %}`
//!
//! Identifiers are runs of ASCII letters, digits and underscores.

use crate::ast::Span;

const VARIABLE_OPEN: &str = "{{ ";
const VARIABLE_CLOSE: &str = " }}";
const TAG_OPEN: &str = "{% ";
const TAG_CLOSE: &str = " %}";

/// What a token is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text.
    Text,
    /// `{{ path }}`
    Variable(Vec<String>),
    /// `{% if <condition> %}`, carrying the raw condition text.
    IfOpen(String),
    /// `{% endif %}`
    EndIf,
    /// `{% for item in list %}`
    ForOpen { item: String, list: Vec<String> },
    /// `{% endfor %}`
    EndFor,
}

/// A token and the source span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenize template source.
///
/// Adjacent literal text is always merged into one `Text` token, and the
/// spans of all tokens tile the source without gaps.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = source[pos..].find('{') {
        let at = pos + offset;
        match scan_directive(source, at) {
            Some((kind, end)) => {
                if text_start < at {
                    tokens.push(Token {
                        kind: TokenKind::Text,
                        span: Span::new(text_start, at),
                    });
                }
                tokens.push(Token {
                    kind,
                    span: Span::new(at, end),
                });
                pos = end;
                text_start = end;
            }
            // `{` is ASCII, so `at + 1` is a char boundary.
            None => pos = at + 1,
        }
    }

    if text_start < source.len() {
        tokens.push(Token {
            kind: TokenKind::Text,
            span: Span::new(text_start, source.len()),
        });
    }

    tokens
}

/// Try to scan a directive starting at byte `at`, which holds a `{`.
///
/// Returns the token kind and the end offset of the directive.
fn scan_directive(source: &str, at: usize) -> Option<(TokenKind, usize)> {
    let rest = &source[at..];
    if rest.starts_with(VARIABLE_OPEN) {
        scan_variable(rest).map(|(kind, len)| (kind, at + len))
    } else if rest.starts_with(TAG_OPEN) {
        scan_tag(rest).map(|(kind, len)| (kind, at + len))
    } else {
        None
    }
}

fn scan_variable(rest: &str) -> Option<(TokenKind, usize)> {
    let inner = &rest[VARIABLE_OPEN.len()..];
    let path_len = inner
        .bytes()
        .take_while(|&b| is_identifier_byte(b) || b == b'.')
        .count();
    if !inner[path_len..].starts_with(VARIABLE_CLOSE) {
        return None;
    }
    let path = parse_dotted_path(&inner[..path_len])?;
    let len = VARIABLE_OPEN.len() + path_len + VARIABLE_CLOSE.len();
    Some((TokenKind::Variable(path), len))
}

fn scan_tag(rest: &str) -> Option<(TokenKind, usize)> {
    let inner = &rest[TAG_OPEN.len()..];
    let body_len = inner.find(TAG_CLOSE)?;
    let body = &inner[..body_len];
    let len = TAG_OPEN.len() + body_len + TAG_CLOSE.len();

    let kind = match body {
        "endif" => TokenKind::EndIf,
        "endfor" => TokenKind::EndFor,
        _ => {
            if let Some(condition) = body.strip_prefix("if ") {
                if condition.is_empty() {
                    return None;
                }
                TokenKind::IfOpen(condition.to_string())
            } else if let Some(header) = body.strip_prefix("for ") {
                let (item, list) = header.split_once(" in ")?;
                if !is_identifier(item) {
                    return None;
                }
                TokenKind::ForOpen {
                    item: item.to_string(),
                    list: parse_dotted_path(list)?,
                }
            } else {
                return None;
            }
        }
    };

    Some((kind, len))
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True if `s` is a non-empty run of identifier characters.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_identifier_byte)
}

/// Parse `identifier(.identifier)*` into its components.
pub fn parse_dotted_path(s: &str) -> Option<Vec<String>> {
    s.split('.')
        .map(|segment| is_identifier(segment).then(|| segment.to_string()))
        .collect()
}
