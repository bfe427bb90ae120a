/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! HTML page template engine for the ticket app.
//!
//! Templates are text with three kinds of directive:
//!
//! - Variable interpolation: `{{ name }}` or `{{ stats.open }}`, always
//!   HTML-escaped
//! - Conditionals: `{% if message %}...{% endif %}` and
//!   `{% if tickets|length == 0 %}...{% endif %}`
//! - Loops: `{% for ticket in tickets %}{{ ticket.title }}{% endfor %}`
//!
//! Blocks may nest. Anything that does not match the directive syntax
//! exactly is literal text, so rendering never fails once a template has
//! been loaded.
//!
//! # Architecture
//!
//! Source is tokenized ([`lexer`]), parsed into a directive tree
//! ([`parser`], [`ast`]) and walked against an immutable
//! [`TemplateContext`] ([`evaluator`]). Loop bodies see their loop variable
//! through a child [`Scope`], never by modifying the context. The
//! [`stages`] module exposes the variable, conditional and loop passes as
//! separate text-to-text functions.
//!
//! # Example
//!
//! ```ignore
//! use ticket_template::{MemoryLoader, Renderer, TemplateContext};
//!
//! let renderer = Renderer::new(MemoryLoader::with_templates([
//!     ("dashboard", "<p>{{ user_email }}: {{ stats.open }} open</p>"),
//! ]));
//!
//! let ctx = TemplateContext::from_json(serde_json::json!({
//!     "user_email": "ada@example.com",
//!     "stats": {"open": 2},
//! }))?;
//!
//! let html = renderer.render("dashboard", &ctx)?;
//! assert_eq!(html, "<p>ada@example.com: 2 open</p>");
//! ```

pub mod ast;
pub mod condition;
pub mod context;
pub mod error;
pub mod escape;
pub mod evaluator;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod renderer;
pub mod stages;

// Re-export main types at crate root
pub use ast::{Conditional, ForLoop, Span, TemplateNode, Text, VariableRef};
pub use condition::Condition;
pub use context::{TemplateContext, TemplateValue};
pub use error::{TemplateError, TemplateResult};
pub use escape::html_escape;
pub use evaluator::{Mode, Scope};
pub use loader::{FileSystemLoader, MemoryLoader, TemplateLoader};
pub use parser::Template;
pub use renderer::Renderer;
pub use stages::{evaluate, expand, resolve};
