/*
 * stats.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Stats command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use ticket_pages::{Config, TicketStats, load_tickets};

/// Execute the stats command
pub fn execute(config: &Config, tickets: Option<PathBuf>) -> Result<()> {
    let path = tickets.unwrap_or_else(|| config.data.tickets.clone());
    let stats = TicketStats::from_tickets(&load_tickets(&path)?);
    let json = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
    println!("{}", json);
    Ok(())
}
