/*
 * tickets.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Read-only access to the tickets data file, and dashboard statistics.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ticket_template::TemplateValue;

/// One stored ticket.
///
/// Fields this tool does not know about are preserved and passed through to
/// templates unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Ticket {
    /// The ticket as a template map value.
    pub fn to_template_value(&self) -> Result<TemplateValue> {
        let json = serde_json::to_value(self).context("Failed to convert ticket to JSON")?;
        Ok(TemplateValue::from(json))
    }
}

/// Ticket counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl TicketStats {
    /// Count tickets by status. Statuses other than `open`, `in_progress`
    /// and `closed` only count toward the total.
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut stats = TicketStats {
            total: tickets.len(),
            ..Default::default()
        };
        for ticket in tickets {
            match ticket.status.as_str() {
                "open" => stats.open += 1,
                "in_progress" => stats.in_progress += 1,
                "closed" => stats.closed += 1,
                other => {
                    tracing::debug!(id = %ticket.id, status = other, "uncounted ticket status");
                }
            }
        }
        stats
    }

    /// The stats as a template map value.
    pub fn to_template_value(self) -> TemplateValue {
        [
            ("total", self.total),
            ("open", self.open),
            ("in_progress", self.in_progress),
            ("closed", self.closed),
        ]
        .into_iter()
        .map(|(k, v)| (k, TemplateValue::Integer(i64::try_from(v).unwrap_or(i64::MAX))))
        .collect()
    }
}

/// Load all tickets from a JSON array file.
///
/// A missing file is an empty ticket list.
pub fn load_tickets(path: &Path) -> Result<Vec<Ticket>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "tickets file not found, using empty list");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tickets file: {}", path.display()))?;
    let tickets: Vec<Ticket> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tickets file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = tickets.len(), "loaded tickets");
    Ok(tickets)
}
