/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for ticket-template using test fixtures.
 */

use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;
use ticket_template::{FileSystemLoader, Renderer, TemplateContext, TemplateError};

/// Helper to get the fixtures directory
fn fixtures_dir() -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("tests").join("fixtures")
}

fn renderer() -> Renderer<FileSystemLoader> {
    Renderer::new(FileSystemLoader::new(fixtures_dir()))
}

fn ctx(value: serde_json::Value) -> TemplateContext {
    TemplateContext::from_json(value).expect("context is an object")
}

#[test]
fn test_simple_interpolation() {
    let result = renderer()
        .render("greeting", &ctx(json!({"name": "World"})))
        .unwrap();
    assert_eq!(result, "<p>Hello, World!</p>\n");
}

#[test]
fn test_interpolation_escapes_markup() {
    let result = renderer()
        .render("greeting", &ctx(json!({"name": "<b>Eve</b>"})))
        .unwrap();
    assert_eq!(result, "<p>Hello, &lt;b&gt;Eve&lt;/b&gt;!</p>\n");
}

#[test]
fn test_conditional_message() {
    let result = renderer()
        .render(
            "notice",
            &ctx(json!({"message": "Your session has expired — please log in again."})),
        )
        .unwrap();
    assert_eq!(
        result,
        "<div class=\"notice\">Your session has expired — please log in again.</div>\n<form method=\"post\" action=\"/auth/login\"></form>\n"
    );

    let result = renderer().render("notice", &TemplateContext::new()).unwrap();
    assert_eq!(result, "\n<form method=\"post\" action=\"/auth/login\"></form>\n");
}

#[test]
fn test_ticket_list() {
    let result = renderer()
        .render(
            "ticket-list",
            &ctx(json!({
                "tickets": [
                    {"title": "Printer jam", "status": "open", "description": "Floor 2"},
                    {"title": "VPN <down>", "status": "in_progress", "description": ""},
                ]
            })),
        )
        .unwrap();
    assert_eq!(
        result,
        concat!(
            "<ul class=\"tickets\">\n",
            "  <li class=\"status-open\">Printer jam - Floor 2</li>\n",
            "  <li class=\"status-in_progress\">VPN &lt;down&gt;</li>\n",
            "</ul>\n",
        )
    );
}

#[test]
fn test_ticket_list_empty() {
    let expected = "<ul class=\"tickets\">\n  <li class=\"empty\">No tickets yet.</li>\n</ul>\n";
    let result = renderer()
        .render("ticket-list", &ctx(json!({"tickets": []})))
        .unwrap();
    assert_eq!(result, expected);

    // An absent list counts as empty.
    let result = renderer().render("ticket-list", &TemplateContext::new()).unwrap();
    assert_eq!(result, expected);
}

#[test]
fn test_stats_page() {
    let result = renderer()
        .render(
            "stats",
            &ctx(json!({
                "user_email": "ada@example.com",
                "stats": {"total": 4, "open": 2, "in_progress": 1, "closed": 1},
            })),
        )
        .unwrap();
    assert!(result.contains("<p>Signed in as ada@example.com</p>"));
    assert!(result.contains("<dt>Total</dt><dd>4</dd>"));
    assert!(result.contains("<dt>In progress</dt><dd>1</dd>"));
}

#[test]
fn test_directive_free_template_is_unchanged() {
    let source = std::fs::read_to_string(fixtures_dir().join("static.html")).unwrap();
    let result = renderer()
        .render("static", &ctx(json!({"not": "x", "raw": true})))
        .unwrap();
    assert_eq!(result, source);
}

#[test]
fn test_missing_template() {
    let err = renderer()
        .render("dashboard", &TemplateContext::new())
        .unwrap_err();
    assert!(matches!(err, TemplateError::NotFound { ref name } if name == "dashboard"));
}
