//! Output Rendering
//!
//! Renders dispatch reports and fatal errors as text or JSON.

use serde_json::{json, Value};

use crate::dispatch::{DispatchReport, TargetOutcome};
use crate::domain::Operation;
use crate::error::FloopError;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

struct Icons {
    check: &'static str,
    cross: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
        }
    }
}

/// Trait for rendering dispatch reports
pub trait ReportRenderer {
    fn render(&self, operation: Operation, report: &DispatchReport) -> String;
}

/// Text renderer: one line per target, then a summary line
pub struct TextRenderer {
    pub unicode: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { unicode: true }
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, operation: Operation, report: &DispatchReport) -> String {
        let icons = if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        };

        if report.is_empty() {
            return format!("{}: no cores configured\n", operation);
        }

        let mut out = String::new();
        for outcome in report.outcomes() {
            let place = format!("{} ({}, {})", outcome.core, outcome.group, outcome.address);
            match outcome.error() {
                None => out.push_str(&format!("{} {}\n", icons.check, place)),
                Some(err) => out.push_str(&format!(
                    "{} {}: {}: {}\n",
                    icons.cross,
                    place,
                    err.kind(),
                    err
                )),
            }
        }
        out.push_str(&format!(
            "{}: {} succeeded, {} failed\n",
            operation,
            report.successes().count(),
            report.failures().count()
        ));
        out
    }
}

/// JSON renderer: a single `dispatch` event
pub struct JsonRenderer;

fn outcome_json(outcome: &TargetOutcome) -> Value {
    match outcome.error() {
        None => json!({
            "core": outcome.core,
            "group": outcome.group,
            "address": outcome.address,
            "status": "ok",
        }),
        Some(err) => json!({
            "core": outcome.core,
            "group": outcome.group,
            "address": outcome.address,
            "status": "error",
            "kind": err.kind(),
            "message": err.to_string(),
        }),
    }
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, operation: Operation, report: &DispatchReport) -> String {
        let event = json!({
            "event": "dispatch",
            "operation": operation.name(),
            "status": if report.is_success() { "success" } else { "partial" },
            "succeeded": report.successes().count(),
            "failed": report.failures().count(),
            "targets": report.outcomes().iter().map(outcome_json).collect::<Vec<_>>(),
        });
        format!("{}\n", event)
    }
}

/// JSON event for an error that stopped the whole batch
pub fn error_json(err: &anyhow::Error) -> Value {
    let kind = err
        .downcast_ref::<FloopError>()
        .map(FloopError::kind)
        .unwrap_or("Error");
    json!({
        "event": "error",
        "kind": kind,
        "message": format!("{:#}", err),
    })
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
