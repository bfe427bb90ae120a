/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Page rendering for the ticket app.
//!
//! Builds request-scoped binding contexts for each page and renders them
//! through `ticket-template`. HTTP handling, sessions and ticket writes
//! belong to the server and are not part of this crate.

pub mod config;
pub mod embedded;
pub mod pages;
pub mod tickets;

pub use config::Config;
pub use embedded::EmbeddedLoader;
pub use pages::{Page, PageInputs, page_context, page_renderer};
pub use tickets::{Ticket, TicketStats, load_tickets};
