/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `ticket-pages.toml` configuration.
//!
//! ```toml
//! [templates]
//! dir = "templates"      # omit to use the embedded templates
//! extension = "html"
//!
//! [data]
//! tickets = "data/tickets.json"
//! ```
//!
//! Command-line flags override values from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ticket-pages.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Template directory. `None` selects the embedded templates.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_tickets")]
    pub tickets: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            tickets: default_tickets(),
        }
    }
}

fn default_extension() -> String {
    ticket_template::loader::DEFAULT_EXTENSION.to_string()
}

fn default_tickets() -> PathBuf {
    PathBuf::from("data/tickets.json")
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid ticket-pages configuration")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `ticket-pages.toml` in the
    /// working directory is used if present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?;
        config.resolve_relative_to(path.parent().unwrap_or(Path::new(".")));
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Make relative paths in the file relative to the file's directory.
    fn resolve_relative_to(&mut self, base: &Path) {
        if let Some(dir) = &self.templates.dir {
            if dir.is_relative() {
                self.templates.dir = Some(base.join(dir));
            }
        }
        if self.data.tickets.is_relative() {
            self.data.tickets = base.join(&self.data.tickets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.templates.dir, None);
        assert_eq!(config.templates.extension, "html");
        assert_eq!(config.data.tickets, PathBuf::from("data/tickets.json"));
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
[templates]
dir = "site/templates"
extension = "tpl"

[data]
tickets = "/var/lib/tickets.json"
"#,
        )
        .unwrap();
        assert_eq!(config.templates.dir, Some(PathBuf::from("site/templates")));
        assert_eq!(config.templates.extension, "tpl");
        assert_eq!(config.data.tickets, PathBuf::from("/var/lib/tickets.json"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml("[templates]\ndirectory = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticket-pages.toml");
        std::fs::write(&path, "[templates]\ndir = \"tpl\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.templates.dir, Some(dir.path().join("tpl")));
        assert_eq!(config.data.tickets, dir.path().join("data/tickets.json"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }
}
