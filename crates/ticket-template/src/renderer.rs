/*
 * renderer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Renderer: load a named template and render it against a context.

use crate::context::TemplateContext;
use crate::error::TemplateResult;
use crate::loader::TemplateLoader;
use crate::parser::Template;

/// Renders named templates from a [`TemplateLoader`].
///
/// The renderer owns nothing but its loader. Every call gets its own
/// context, and nothing from one call is visible to the next.
#[derive(Debug, Clone, Default)]
pub struct Renderer<L> {
    loader: L,
}

impl<L: TemplateLoader> Renderer<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Load `name` and render it with `context`.
    ///
    /// Fails only if the template cannot be loaded. There is no fallback
    /// template and no partial output.
    pub fn render(&self, name: &str, context: &TemplateContext) -> TemplateResult<String> {
        let source = self.loader.load(name)?;
        let template = Template::compile(&source);
        tracing::debug!(
            template = name,
            bindings = context.len(),
            "rendering template"
        );
        Ok(template.render(context))
    }

    /// Render template text that did not come from the loader.
    pub fn render_str(&self, source: &str, context: &TemplateContext) -> String {
        Template::compile(source).render(context)
    }
}
