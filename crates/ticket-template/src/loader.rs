/*
 * loader.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template loading.
//!
//! This module provides the [`TemplateLoader`] trait and implementations for
//! reading named templates from a directory or from memory. Loaders only
//! fetch text; they never parse it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{TemplateError, TemplateResult};

/// Default extension appended to template names that have none.
pub const DEFAULT_EXTENSION: &str = "html";

/// Trait for loading template source by name.
pub trait TemplateLoader {
    /// Load a template by name (e.g., `"dashboard"` or `"404.html"`).
    ///
    /// A template store without the name returns
    /// [`TemplateError::NotFound`].
    fn load(&self, name: &str) -> TemplateResult<String>;
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for &L {
    fn load(&self, name: &str) -> TemplateResult<String> {
        (**self).load(name)
    }
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for Box<L> {
    fn load(&self, name: &str) -> TemplateResult<String> {
        (**self).load(name)
    }
}

/// Loader that reads templates from files under a root directory.
///
/// A name with no extension gets the loader's extension (`html` by default);
/// a name with an extension is used as-is.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    root: PathBuf,
    extension: String,
}

impl FileSystemLoader {
    /// Create a loader for `root` using the default `html` extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different extension for names that have none. An empty
    /// extension means names are used exactly as given.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The file path a template name resolves to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        resolve_template_path(&self.root, name, &self.extension)
    }
}

impl TemplateLoader for FileSystemLoader {
    fn load(&self, name: &str) -> TemplateResult<String> {
        let path = self.path_for(name);
        tracing::debug!(template = name, path = %path.display(), "loading template");
        std::fs::read_to_string(&path).map_err(|e| TemplateError::from_io(name, path, e))
    }
}

/// Loader that serves templates from an in-memory map.
///
/// Useful for testing and for templates bundled into the application.
/// Names are matched exactly, after adding the loader's extension to names
/// that have none.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    templates: HashMap<String, String>,
}

impl MemoryLoader {
    /// Create a new empty memory loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template. A name without an extension is stored with `.html`.
    pub fn add(&mut self, name: impl AsRef<str>, content: impl Into<String>) -> &mut Self {
        self.templates
            .insert(normalize_name(name.as_ref()), content.into());
        self
    }

    /// Create a loader with the given templates.
    pub fn with_templates(
        templates: impl IntoIterator<Item = (impl AsRef<str>, impl Into<String>)>,
    ) -> Self {
        let mut loader = Self::new();
        for (name, content) in templates {
            loader.add(name, content);
        }
        loader
    }
}

impl TemplateLoader for MemoryLoader {
    fn load(&self, name: &str) -> TemplateResult<String> {
        self.templates
            .get(&normalize_name(name))
            .cloned()
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Add the default extension to a bare template name.
pub fn normalize_name(name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.{DEFAULT_EXTENSION}")
    }
}

/// Resolve the path of a named template under `root`.
///
/// # Examples
///
/// ```ignore
/// // root: /templates, name: "login"      → /templates/login.html
/// // root: /templates, name: "404.html"   → /templates/404.html
/// // root: /templates, name: "app/tickets" → /templates/app/tickets.html
/// ```
pub fn resolve_template_path(root: &Path, name: &str, extension: &str) -> PathBuf {
    let path = root.join(name);
    if extension.is_empty() || Path::new(name).extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}
