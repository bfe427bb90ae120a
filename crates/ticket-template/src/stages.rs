/*
 * stages.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Text-to-text pipeline stages.
//!
//! Each stage compiles its input and evaluates one directive kind, leaving
//! the source text of every other directive in place so that the next stage
//! can pick it up. Running [`resolve`], [`evaluate`] and [`expand`] in that
//! order gives the same output as [`Template::render`] for any template
//! whose bound values contain no directive syntax. `render` walks a single
//! tree and never re-scans substituted values; prefer it.
//!
//! Loop blocks are opaque to the first two stages. Placeholders and
//! conditions inside a loop body may refer to the loop variable, so they are
//! only evaluated once the loop itself is expanded.

use crate::context::TemplateContext;
use crate::evaluator::Mode;
use crate::parser::Template;

/// Replace `{{ path }}` placeholders outside loop blocks with their
/// HTML-escaped values.
pub fn resolve(text: &str, context: &TemplateContext) -> String {
    Template::compile(text).render_with_mode(context, Mode::Variables)
}

/// Replace `{% if %}...{% endif %}` blocks outside loop blocks with their body
/// when the condition holds and with nothing otherwise.
pub fn evaluate(text: &str, context: &TemplateContext) -> String {
    Template::compile(text).render_with_mode(context, Mode::Conditionals)
}

/// Replace `{% for %}...{% endfor %}` blocks with their body rendered once
/// per list element.
pub fn expand(text: &str, context: &TemplateContext) -> String {
    Template::compile(text).render_with_mode(context, Mode::Loops)
}
