/*
 * embedded.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Embedded template store.
//!
//! The default page templates are compiled into the binary via
//! `include_dir`, so the CLI works without a templates directory.

use include_dir::{Dir, include_dir};
use ticket_template::loader::normalize_name;
use ticket_template::{TemplateError, TemplateLoader, TemplateResult};

/// Embedded page templates directory.
static PAGE_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/resources/templates");

/// Loader that serves the templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLoader;

impl EmbeddedLoader {
    /// Names of all embedded templates, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = PAGE_TEMPLATES
            .files()
            .filter_map(|f| f.path().to_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl TemplateLoader for EmbeddedLoader {
    fn load(&self, name: &str) -> TemplateResult<String> {
        let filename = normalize_name(name);
        tracing::debug!(template = name, file = %filename, "loading embedded template");
        PAGE_TEMPLATES
            .get_file(&filename)
            .and_then(|f| f.contents_utf8())
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }
}
