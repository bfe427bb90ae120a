/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template loading and context construction.
//!
//! Rendering itself never fails: malformed directives pass through as
//! literal text and unresolved bindings render as empty strings. The only
//! fatal conditions are a template that cannot be loaded and a binding
//! context that cannot be built.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template store has no template with this name.
    #[error("Template not found: {name}")]
    NotFound { name: String },

    /// Reading a template file failed for a reason other than absence.
    #[error("I/O error reading template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A binding context could not be built from the supplied data.
    #[error("Invalid binding context: {message}")]
    InvalidContext { message: String },
}

impl TemplateError {
    /// Map an I/O error for a template path, turning `NotFound` into
    /// [`TemplateError::NotFound`] for the given template name.
    pub fn from_io(name: &str, path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            TemplateError::NotFound {
                name: name.to_string(),
            }
        } else {
            TemplateError::Io { path, source }
        }
    }
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
