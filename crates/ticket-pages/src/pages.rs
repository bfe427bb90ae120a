/*
 * pages.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Binding contexts for the ticket app pages.
//!
//! Each page maps to one template and a fixed set of bindings:
//!
//! | page        | template         | bindings                      |
//! |-------------|------------------|-------------------------------|
//! | `home`      | `home.html`      | none                          |
//! | `login`     | `login.html`     | `message`                     |
//! | `signup`    | `signup.html`    | none                          |
//! | `dashboard` | `dashboard.html` | `stats`, `user_email`         |
//! | `tickets`   | `tickets.html`   | `tickets`                     |
//! | `not-found` | `404.html`       | none                          |

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use ticket_template::{FileSystemLoader, Renderer, TemplateContext, TemplateLoader, TemplateValue};

use crate::config::Config;
use crate::embedded::EmbeddedLoader;
use crate::tickets::{Ticket, TicketStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Page {
    Home,
    Login,
    Signup,
    Dashboard,
    Tickets,
    NotFound,
}

impl Page {
    /// Template name in the template store.
    pub fn template_name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Login => "login",
            Page::Signup => "signup",
            Page::Dashboard => "dashboard",
            Page::Tickets => "tickets",
            Page::NotFound => "404",
        }
    }

    /// Whether building this page's context needs the ticket list.
    pub fn needs_tickets(self) -> bool {
        matches!(self, Page::Dashboard | Page::Tickets)
    }
}

/// Request-scoped data a page context is built from.
#[derive(Debug, Clone, Default)]
pub struct PageInputs {
    pub user_email: Option<String>,
    pub message: Option<String>,
    pub tickets: Vec<Ticket>,
}

/// Build the binding context for `page`.
pub fn page_context(page: Page, inputs: &PageInputs) -> Result<TemplateContext> {
    let mut ctx = TemplateContext::new();

    match page {
        Page::Login => {
            ctx.insert("message", inputs.message.clone().unwrap_or_default());
        }
        Page::Dashboard => {
            ctx.insert(
                "stats",
                TicketStats::from_tickets(&inputs.tickets).to_template_value(),
            );
            if let Some(email) = &inputs.user_email {
                ctx.insert("user_email", email.as_str());
            }
        }
        Page::Tickets => {
            let tickets = inputs
                .tickets
                .iter()
                .map(Ticket::to_template_value)
                .collect::<Result<Vec<_>>>()?;
            ctx.insert("tickets", TemplateValue::List(tickets));
        }
        Page::Home | Page::Signup | Page::NotFound => {}
    }

    Ok(ctx)
}

/// Create a renderer over the configured template store.
///
/// `templates_dir` overrides the configured directory. With neither set the
/// embedded templates are used.
pub fn page_renderer(
    config: &Config,
    templates_dir: Option<PathBuf>,
) -> Renderer<Box<dyn TemplateLoader>> {
    let dir = templates_dir.or_else(|| config.templates.dir.clone());
    let loader: Box<dyn TemplateLoader> = match dir {
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "using template directory");
            Box::new(FileSystemLoader::new(dir).with_extension(config.templates.extension.clone()))
        }
        None => {
            tracing::debug!("using embedded templates");
            Box::new(EmbeddedLoader)
        }
    };
    Renderer::new(loader)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(title: &str, status: &str) -> Ticket {
        serde_json::from_value(serde_json::json!({
            "id": title.to_lowercase(),
            "title": title,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_template_names() {
        assert_eq!(Page::NotFound.template_name(), "404");
        assert_eq!(Page::Dashboard.template_name(), "dashboard");
    }

    #[test]
    fn test_login_context_always_has_message() {
        let ctx = page_context(Page::Login, &PageInputs::default()).unwrap();
        assert_eq!(ctx.get("message"), Some(&TemplateValue::from("")));
    }

    #[test]
    fn test_dashboard_context() {
        let inputs = PageInputs {
            user_email: Some("ada@example.com".to_string()),
            tickets: vec![ticket("A", "open"), ticket("B", "closed")],
            ..Default::default()
        };
        let ctx = page_context(Page::Dashboard, &inputs).unwrap();
        assert_eq!(
            ctx.get_path(&["stats", "total"]),
            Some(&TemplateValue::Integer(2))
        );
        assert_eq!(
            ctx.get_path(&["stats", "in_progress"]),
            Some(&TemplateValue::Integer(0))
        );
        assert_eq!(
            ctx.get("user_email"),
            Some(&TemplateValue::from("ada@example.com"))
        );
        assert!(ctx.get("tickets").is_none());
    }

    #[test]
    fn test_tickets_context() {
        let inputs = PageInputs {
            tickets: vec![ticket("A", "open")],
            ..Default::default()
        };
        let ctx = page_context(Page::Tickets, &inputs).unwrap();
        let list = ctx.get("tickets").and_then(TemplateValue::as_list).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].get_path(&["id"]), Some(&TemplateValue::from("a")));
    }

    #[test]
    fn test_static_pages_have_no_bindings() {
        for page in [Page::Home, Page::Signup, Page::NotFound] {
            assert!(page_context(page, &PageInputs::default()).unwrap().is_empty());
        }
    }

    #[test]
    fn test_page_renderer_prefers_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("home.html"), "custom home").unwrap();

        let renderer = page_renderer(&Config::default(), Some(dir.path().to_path_buf()));
        assert_eq!(
            renderer.render("home", &TemplateContext::new()).unwrap(),
            "custom home"
        );

        let embedded = page_renderer(&Config::default(), None);
        assert!(
            embedded
                .render("home", &TemplateContext::new())
                .unwrap()
                .contains("<h1>TicketApp</h1>")
        );
    }
}
