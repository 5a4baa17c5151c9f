//! Report generation
//!
//! Renders a [`ScanReport`] as a terminal summary, JSON or Markdown.

use crate::diagnostics::Severity;
use crate::scanner::ScanReport;

/// Output formats a report can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Summary,
    Json,
    Markdown,
}

/// Render a report; only JSON serialization can fail
pub fn render_report(report: &ScanReport, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Summary => Ok(generate_summary(report)),
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Violation => "▲",
        Severity::Warning => "○",
    }
}

pub fn generate_summary(report: &ScanReport) -> String {
    let mut lines = vec![format!("Dependency check results for {}", report.file), String::new()];

    for diag in &report.diagnostics {
        lines.push(format!(
            "  {} line {}: {} ({})",
            severity_icon(diag.severity),
            diag.line,
            diag.message,
            diag.explanation
        ));
    }
    if !report.diagnostics.is_empty() {
        lines.push(String::new());
    }

    lines.push(format!("  Dependencies: {}", report.dependencies));
    lines.push(format!("  ▲ Outdated:   {}", report.violations()));
    lines.push(format!("  ○ Warnings:   {}", report.warnings()));
    lines.push(String::new());

    if report.violations() == 0 {
        lines.push("[OK] All dependencies are up to date!".to_string());
    } else {
        lines.push(format!("▲ {} outdated dependencies found!", report.violations()));
    }

    lines.join("\n")
}

pub fn generate_json_report(report: &ScanReport) -> serde_json::Result<String> {
    let value = serde_json::json!({
        "file": report.file,
        "summary": {
            "dependencies": report.dependencies,
            "violations": report.violations(),
            "warnings": report.warnings(),
        },
        "diagnostics": report.diagnostics,
    });
    serde_json::to_string_pretty(&value)
}

pub fn generate_markdown_report(report: &ScanReport) -> String {
    let mut lines = vec![
        "# Dependency Report".to_string(),
        String::new(),
        format!("**File**: {}", report.file),
        format!("**Date**: {}", chrono::Local::now().format("%Y-%m-%d")),
        String::new(),
        "## Summary".to_string(),
        "| Kind | Count |".to_string(),
        "|------|-------|".to_string(),
        format!("| Dependencies | {} |", report.dependencies),
        format!("| ▲ Outdated | {} |", report.violations()),
        format!("| ○ Warnings | {} |", report.warnings()),
        String::new(),
    ];

    if report.diagnostics.is_empty() {
        lines.push("## No findings".to_string());
        lines.push(String::new());
        lines.push("✅ All dependencies are up to date.".to_string());
        return lines.join("\n");
    }

    lines.push("## Findings".to_string());
    lines.push(String::new());
    lines.push("| Line | Severity | Declaration | Details |".to_string());
    lines.push("|------|----------|-------------|---------|".to_string());
    for diag in &report.diagnostics {
        lines.push(format!(
            "| {} | {} {} | `{}` | {} |",
            diag.line,
            severity_icon(diag.severity),
            diag.severity.as_str().to_uppercase(),
            diag.code_fragment.replace('|', "\\|"),
            diag.explanation
        ));
    }

    lines.join("\n")
}
