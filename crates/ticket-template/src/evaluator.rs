/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tree-walking template evaluation.
//!
//! The walker runs in one of several [`Mode`]s. [`Mode::Full`] evaluates
//! every directive. The other modes each evaluate a single directive kind
//! and copy the source text of all other directives to the output
//! unchanged; they back the standalone stage functions in
//! [`crate::stages`].
//!
//! Loop bodies are always evaluated in a child [`Scope`] in which the loop
//! variable shadows the enclosing bindings, so `{{ item.field }}` can only
//! ever resolve against the current element.

use crate::ast::{Conditional, ForLoop, TemplateNode, VariableRef};
use crate::condition::Condition;
use crate::context::{TemplateContext, TemplateValue};
use crate::escape::push_html_escaped;
use crate::parser::Template;

/// Which directives a walk evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Evaluate everything.
    Full,
    /// Only `{{ ... }}` outside loop blocks. Conditional tags are kept and
    /// their bodies walked; loop blocks are kept whole.
    Variables,
    /// Only `{% if %}` blocks outside loop blocks. Kept bodies are walked
    /// for nested conditionals; loop blocks are kept whole.
    Conditionals,
    /// Only `{% for %}` blocks, each rendered in full. Conditional tags are
    /// kept and their bodies walked.
    Loops,
}

/// A chain of name lookups: the caller's context at the root, with one
/// link per enclosing loop iteration.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Root(&'a TemplateContext),
    Item {
        name: &'a str,
        value: &'a TemplateValue,
        parent: &'a Scope<'a>,
    },
}

impl<'a> Scope<'a> {
    pub fn root(context: &'a TemplateContext) -> Self {
        Scope::Root(context)
    }

    /// Resolve a dotted path. The first component is looked up from the
    /// innermost scope outwards.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&'a TemplateValue> {
        match *self {
            Scope::Root(context) => context.get_path(path),
            Scope::Item {
                name,
                value,
                parent,
            } => {
                let (first, rest) = path.split_first()?;
                if first.as_ref() == name {
                    value.get_path(rest)
                } else {
                    parent.lookup(path)
                }
            }
        }
    }
}

impl Template {
    /// Render this template with the given context.
    ///
    /// Rendering is total: unresolved bindings produce empty strings and
    /// malformed directives were already kept as text by the parser.
    pub fn render(&self, context: &TemplateContext) -> String {
        self.render_with_mode(context, Mode::Full)
    }

    /// Render evaluating only the directives selected by `mode`.
    pub fn render_with_mode(&self, context: &TemplateContext, mode: Mode) -> String {
        let mut out = String::with_capacity(self.source.len());
        Walker {
            source: &self.source,
            out: &mut out,
        }
        .nodes(&self.nodes, &Scope::root(context), mode);
        out
    }
}

/// Decide a condition in a scope.
pub fn condition_holds(condition: &Condition, scope: &Scope<'_>) -> bool {
    match condition {
        Condition::LengthEquals { path, expected } => {
            let len = scope.lookup(path).and_then(TemplateValue::as_list).map_or(0, <[_]>::len);
            len == *expected
        }
        Condition::Truthy { path } => scope.lookup(path).is_some_and(TemplateValue::is_truthy),
        Condition::Unsupported { text } => {
            tracing::trace!(condition = %text, "unsupported condition treated as false");
            false
        }
    }
}

struct Walker<'s, 'o> {
    source: &'s str,
    out: &'o mut String,
}

impl Walker<'_, '_> {
    fn nodes(&mut self, nodes: &[TemplateNode], scope: &Scope<'_>, mode: Mode) {
        for node in nodes {
            self.node(node, scope, mode);
        }
    }

    fn node(&mut self, node: &TemplateNode, scope: &Scope<'_>, mode: Mode) {
        match (node, mode) {
            (TemplateNode::Text(text), _) => self.out.push_str(&text.text),

            (TemplateNode::Variable(var), Mode::Full | Mode::Variables) => {
                self.variable(var, scope);
            }

            (TemplateNode::Conditional(cond), Mode::Full | Mode::Conditionals) => {
                if condition_holds(&cond.condition, scope) {
                    self.nodes(&cond.body, scope, mode);
                }
            }
            (TemplateNode::Conditional(cond), Mode::Variables | Mode::Loops) => {
                self.keep_tags(cond, scope, mode);
            }

            (TemplateNode::ForLoop(for_loop), Mode::Full | Mode::Loops) => {
                self.for_loop(for_loop, scope);
            }

            // Not evaluated in this mode.
            (TemplateNode::Variable(_) | TemplateNode::ForLoop(_), _) => self.verbatim(node),
        }
    }

    fn variable(&mut self, var: &VariableRef, scope: &Scope<'_>) {
        match scope.lookup(&var.path).and_then(TemplateValue::scalar_text) {
            Some(text) => push_html_escaped(self.out, &text),
            None => {
                tracing::trace!(path = %var.dotted(), "binding has no text, rendered empty");
            }
        }
    }

    fn keep_tags(&mut self, cond: &Conditional, scope: &Scope<'_>, mode: Mode) {
        self.out.push_str(cond.open.slice(self.source));
        self.nodes(&cond.body, scope, mode);
        self.out.push_str(cond.close.slice(self.source));
    }

    fn for_loop(&mut self, for_loop: &ForLoop, scope: &Scope<'_>) {
        let Some(items) = scope.lookup(&for_loop.list).and_then(TemplateValue::as_list) else {
            return;
        };

        for item in items {
            let child = Scope::Item {
                name: &for_loop.item,
                value: item,
                parent: scope,
            };
            self.nodes(&for_loop.body, &child, Mode::Full);
        }
    }

    fn verbatim(&mut self, node: &TemplateNode) {
        self.out.push_str(node.span().slice(self.source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(source: &str, context: serde_json::Value) -> String {
        let context = TemplateContext::from_json(context).expect("context is an object");
        Template::compile(source).render(&context)
    }

    #[test]
    fn test_literal_text() {
        assert_eq!(render("Hello, world!", json!({})), "Hello, world!");
    }

    #[test]
    fn test_simple_variable() {
        assert_eq!(
            render("Hello, {{ name }}!", json!({"name": "Alice"})),
            "Hello, Alice!"
        );
    }

    #[test]
    fn test_missing_variable() {
        assert_eq!(render("Hello, {{ name }}!", json!({})), "Hello, !");
    }

    #[test]
    fn test_nested_variable() {
        assert_eq!(
            render("Open: {{ stats.open }}", json!({"stats": {"open": 3}})),
            "Open: 3"
        );
    }

    #[test]
    fn test_integer_above_i64_renders_exactly() {
        assert_eq!(render("[{{ n }}]", json!({"n": u64::MAX})), "[18446744073709551615]");
    }

    #[test]
    fn test_path_through_scalar_is_empty() {
        assert_eq!(render("[{{ a.b.c }}]", json!({"a": {"b": "x"}})), "[]");
    }

    #[test]
    fn test_map_and_list_values_are_empty() {
        assert_eq!(
            render("[{{ stats }}][{{ tickets }}]", json!({"stats": {"open": 1}, "tickets": [1]})),
            "[][]"
        );
    }

    #[test]
    fn test_variable_is_escaped() {
        assert_eq!(
            render("{{ name }}", json!({"name": "<script>alert('x')</script>"})),
            "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_length_equals() {
        let source = "{% if items|length == 0 %}E{% endif %}";
        assert_eq!(render(source, json!({"items": []})), "E");
        assert_eq!(render(source, json!({"items": [1]})), "");
        assert_eq!(render(source, json!({})), "E");
        assert_eq!(render(source, json!({"items": "abc"})), "E");
    }

    #[test]
    fn test_length_equals_is_exact() {
        let source = "{% if items|length == 2 %}two{% endif %}";
        assert_eq!(render(source, json!({"items": [1, 2]})), "two");
        assert_eq!(render(source, json!({"items": [1, 2, 3]})), "");
    }

    #[test]
    fn test_truthy_conditional() {
        let source = "{% if message %}<p>{{ message }}</p>{% endif %}";
        assert_eq!(
            render(source, json!({"message": "Session expired"})),
            "<p>Session expired</p>"
        );
        assert_eq!(render(source, json!({"message": ""})), "");
        assert_eq!(render(source, json!({})), "");
        assert_eq!(render("{% if n %}y{% endif %}", json!({"n": 0})), "");
        assert_eq!(render("{% if n %}y{% endif %}", json!({"n": 0.5})), "y");
        assert_eq!(render("{% if b %}y{% endif %}", json!({"b": false})), "");
    }

    #[test]
    fn test_unsupported_condition_is_false() {
        assert_eq!(
            render("a{% if x and y %}B{% endif %}c", json!({"x": true, "y": true})),
            "ac"
        );
    }

    #[test]
    fn test_for_loop() {
        let source = "{% for t in items %}{{ t.title }};{% endfor %}";
        assert_eq!(
            render(source, json!({"items": [{"title": "A"}, {"title": "B"}]})),
            "A;B;"
        );
        assert_eq!(render(source, json!({})), "");
        assert_eq!(render(source, json!({"items": {"title": "A"}})), "");
    }

    #[test]
    fn test_for_loop_missing_field_and_escaping() {
        let source = "{% for t in items %}[{{ t.title }}|{{ t.owner }}]{% endfor %}";
        assert_eq!(
            render(source, json!({"items": [{"title": "a<b"}]})),
            "[a&lt;b|]"
        );
    }

    #[test]
    fn test_loop_variable_shadows_outer_binding() {
        let source = "{{ t.title }}|{% for t in items %}{{ t.title }}{% endfor %}|{{ t.title }}";
        assert_eq!(
            render(
                source,
                json!({"t": {"title": "outer"}, "items": [{"title": "inner"}]})
            ),
            "outer|inner|outer"
        );
    }

    #[test]
    fn test_loop_body_sees_outer_bindings() {
        let source = "{% for t in tickets %}{{ t.id }}@{{ user_email }} {% endfor %}";
        assert_eq!(
            render(
                source,
                json!({"user_email": "me@x.io", "tickets": [{"id": 1}, {"id": 2}]})
            ),
            "1@me@x.io 2@me@x.io "
        );
    }

    #[test]
    fn test_conditional_on_loop_variable() {
        let source =
            "{% for t in tickets %}{% if t.description %}<p>{{ t.description }}</p>{% endif %}{% endfor %}";
        assert_eq!(
            render(
                source,
                json!({"tickets": [{"description": "x"}, {"description": ""}, {}]})
            ),
            "<p>x</p>"
        );
    }

    #[test]
    fn test_nested_loops() {
        let source = "{% for g in groups %}{{ g.name }}:{% for t in g.tickets %}{{ t }},{% endfor %};{% endfor %}";
        assert_eq!(
            render(
                source,
                json!({"groups": [
                    {"name": "open", "tickets": ["a", "b"]},
                    {"name": "closed", "tickets": []},
                ]})
            ),
            "open:a,b,;closed:;"
        );
    }

    #[test]
    fn test_values_are_not_reinterpreted() {
        assert_eq!(
            render("{{ a }}", json!({"a": "{{ b }}", "b": "leak"})),
            "{{ b }}"
        );
    }

    #[test]
    fn test_scope_lookup() {
        let context = TemplateContext::new().with("x", "root").with("y", "root_y");
        let value = TemplateValue::from("item");
        let root = Scope::root(&context);
        let child = Scope::Item {
            name: "x",
            value: &value,
            parent: &root,
        };
        assert_eq!(child.lookup(&["x"]), Some(&value));
        assert_eq!(child.lookup(&["y"]), Some(&TemplateValue::from("root_y")));
        assert_eq!(child.lookup(&["x", "field"]), None);
        assert_eq!(root.lookup(&["x"]), Some(&TemplateValue::from("root")));
    }
}
