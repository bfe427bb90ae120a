/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Builds the binding context for one page and renders its template.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use ticket_pages::{Config, Page, PageInputs, load_tickets, page_context, page_renderer};
use ticket_template::TemplateContext;

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    pub page: Page,
    pub tickets: Option<PathBuf>,
    pub user_email: Option<String>,
    pub message: Option<String>,
    pub context: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Execute the render command
pub fn execute(config: &Config, args: RenderArgs) -> Result<()> {
    let tickets = if args.page.needs_tickets() {
        let path = args.tickets.unwrap_or_else(|| config.data.tickets.clone());
        load_tickets(&path)?
    } else {
        Vec::new()
    };

    let inputs = PageInputs {
        user_email: args.user_email,
        message: args.message,
        tickets,
    };
    let mut ctx = page_context(args.page, &inputs)?;

    if let Some(path) = &args.context {
        ctx.merge_missing(read_context(path)?);
    }

    let renderer = page_renderer(config, args.templates);
    let name = args.page.template_name();
    let html = renderer
        .render(name, &ctx)
        .with_context(|| format!("Failed to render page '{}'", name))?;
    debug!(page = name, bytes = html.len(), "rendered page");

    match &args.output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(page = name, output = %path.display(), "wrote page");
        }
        None => print!("{}", html),
    }

    Ok(())
}

fn read_context(path: &std::path::Path) -> Result<TemplateContext> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse context file: {}", path.display()))?;
    TemplateContext::from_json(value)
        .with_context(|| format!("Invalid context file: {}", path.display()))
}
