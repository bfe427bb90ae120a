/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template directive tree.
//!
//! Each node records byte spans into the template source. Stage-restricted
//! evaluation (see [`crate::stages`]) uses them to re-emit directives it does
//! not handle exactly as they were written.

use crate::condition::Condition;

/// A half-open byte range `[start, end)` into the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The source text covered by this span.
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }

    /// The smallest span covering both `self` and `other`.
    pub fn cover(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A node in the directive tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Literal text to be output as-is.
    Text(Text),

    /// Variable interpolation: `{{ name }}` or `{{ obj.field }}`
    Variable(VariableRef),

    /// Conditional block: `{% if condition %}...{% endif %}`
    Conditional(Conditional),

    /// Loop block: `{% for item in list %}...{% endfor %}`
    ForLoop(ForLoop),
}

impl TemplateNode {
    /// The source span of the whole node, including block tags.
    pub fn span(&self) -> Span {
        match self {
            TemplateNode::Text(t) => t.span,
            TemplateNode::Variable(v) => v.span,
            TemplateNode::Conditional(c) => c.open.cover(c.close),
            TemplateNode::ForLoop(f) => f.open.cover(f.close),
        }
    }
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// The literal text content.
    pub text: String,
    pub span: Span,
}

/// A reference to a binding by dotted path.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    /// Path components (e.g., `["ticket", "title"]` for `ticket.title`).
    pub path: Vec<String>,
    pub span: Span,
}

impl VariableRef {
    pub fn new(path: Vec<String>, span: Span) -> Self {
        Self { path, span }
    }

    /// The path joined back with dots.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// Conditional block: `{% if condition %}...{% endif %}`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Condition,
    pub body: Vec<TemplateNode>,
    /// Span of the `{% if ... %}` tag.
    pub open: Span,
    /// Span of the `{% endif %}` tag.
    pub close: Span,
}

/// Loop block: `{% for item in list %}...{% endfor %}`
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// Name bound to each element inside the body.
    pub item: String,
    /// Path of the list to iterate.
    pub list: Vec<String>,
    pub body: Vec<TemplateNode>,
    /// Span of the `{% for ... %}` tag.
    pub open: Span,
    /// Span of the `{% endfor %}` tag.
    pub close: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_slice_and_cover() {
        let source = "ab{% if x %}cd{% endif %}";
        let open = Span::new(2, 12);
        let close = Span::new(14, 25);
        assert_eq!(open.slice(source), "{% if x %}");
        assert_eq!(close.slice(source), "{% endif %}");
        assert_eq!(open.cover(close), Span::new(2, 25));
    }

    #[test]
    fn test_variable_ref_dotted() {
        let var = VariableRef::new(vec!["stats".to_string(), "open".to_string()], Span::default());
        assert_eq!(var.dotted(), "stats.open");
    }
}
