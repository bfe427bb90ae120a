/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Recursive-descent parser from tokens to the directive tree.
//!
//! Block tags are paired first with a stack: a close tag pairs with the
//! nearest unpaired open tag of its own kind, and any open tags above that
//! one are left unpaired. Unpaired tags of either kind are literal text, so
//! compiling never fails. Nesting is capped at [`MAX_DEPTH`], which also
//! bounds the recursion depth of parsing and evaluation.

use crate::ast::{Conditional, ForLoop, Span, TemplateNode, Text, VariableRef};
use crate::condition::Condition;
use crate::lexer::{Token, TokenKind, tokenize};

/// A compiled template ready for evaluation.
#[derive(Debug, Clone)]
pub struct Template {
    /// The parsed directive tree.
    pub(crate) nodes: Vec<TemplateNode>,

    /// Original source, needed to re-emit directives verbatim.
    pub(crate) source: String,
}

impl Template {
    /// Compile a template from source text.
    ///
    /// Malformed or unbalanced directive syntax is kept as literal text.
    pub fn compile(source: &str) -> Self {
        let tokens = tokenize(source);
        let partners = pair_blocks(&tokens);
        let nodes = Parser {
            source,
            tokens: &tokens,
            partners: &partners,
        }
        .parse_range(0, tokens.len());

        tracing::trace!(tokens = tokens.len(), nodes = nodes.len(), "compiled template");

        Template {
            nodes,
            source: source.to_string(),
        }
    }

    /// Get the top-level nodes of this template.
    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }

    /// Get the source text this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True if the template contains no directives at all.
    pub fn is_literal(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n, TemplateNode::Text(_)))
    }
}

/// Deepest block nesting that is paired. Blocks opened below this depth
/// are literal text, together with their close tags.
pub const MAX_DEPTH: usize = 256;

/// For each token index, the index of the block tag it pairs with.
fn pair_blocks(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tokens.len()];
    let mut open: Vec<usize> = Vec::new();
    // Open tags past `MAX_DEPTH`, never paired.
    let mut too_deep: Vec<usize> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::IfOpen(_) | TokenKind::ForOpen { .. } => {
                if open.len() < MAX_DEPTH {
                    open.push(index);
                } else {
                    too_deep.push(index);
                }
            }
            TokenKind::EndIf | TokenKind::EndFor => {
                let closes_same_kind = |&o: &usize| closes(&tokens[o].kind, &token.kind);
                if let Some(position) = too_deep.iter().rposition(closes_same_kind) {
                    too_deep.truncate(position);
                    continue;
                }
                if let Some(position) = open.iter().rposition(closes_same_kind) {
                    let opener = open[position];
                    open.truncate(position);
                    too_deep.clear();
                    partners[opener] = Some(index);
                    partners[index] = Some(opener);
                }
            }
            TokenKind::Text | TokenKind::Variable(_) => {}
        }
    }

    partners
}

fn closes(open: &TokenKind, close: &TokenKind) -> bool {
    matches!(
        (open, close),
        (TokenKind::IfOpen(_), TokenKind::EndIf) | (TokenKind::ForOpen { .. }, TokenKind::EndFor)
    )
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    partners: &'a [Option<usize>],
}

impl Parser<'_> {
    /// Build the nodes for tokens in `[start, end)`.
    fn parse_range(&self, start: usize, end: usize) -> Vec<TemplateNode> {
        let mut nodes = Vec::new();
        let mut index = start;

        while index < end {
            let token = &self.tokens[index];
            let partner = self.partners[index];

            match (&token.kind, partner) {
                (TokenKind::Variable(path), _) => {
                    nodes.push(TemplateNode::Variable(VariableRef::new(
                        path.clone(),
                        token.span,
                    )));
                }
                (TokenKind::IfOpen(condition), Some(close)) if close > index => {
                    nodes.push(TemplateNode::Conditional(Conditional {
                        condition: Condition::parse(condition),
                        body: self.parse_range(index + 1, close),
                        open: token.span,
                        close: self.tokens[close].span,
                    }));
                    index = close;
                }
                (TokenKind::ForOpen { item, list }, Some(close)) if close > index => {
                    nodes.push(TemplateNode::ForLoop(ForLoop {
                        item: item.clone(),
                        list: list.clone(),
                        body: self.parse_range(index + 1, close),
                        open: token.span,
                        close: self.tokens[close].span,
                    }));
                    index = close;
                }
                // Literal text, and block tags left unpaired.
                _ => push_text(&mut nodes, token.span, self.source),
            }

            index += 1;
        }

        nodes
    }
}

/// Append literal text, merging with a directly preceding text node.
fn push_text(nodes: &mut Vec<TemplateNode>, span: Span, source: &str) {
    if let Some(TemplateNode::Text(last)) = nodes.last_mut() {
        if last.span.end == span.start {
            last.text.push_str(span.slice(source));
            last.span.end = span.end;
            return;
        }
    }
    nodes.push(TemplateNode::Text(Text {
        text: span.slice(source).to_string(),
        span,
    }));
}
