// SPDX-License-Identifier: Apache-2.0

use dockhand_model::{AnalysisReport, SizeReport};
use serde_json::json;

use crate::summary::human_size;

pub const NO_SUGGESTIONS_LINE: &str = "No significant optimization opportunities found!";

pub fn render_analysis_text(report: &AnalysisReport) -> String {
    if report.suggestions.is_empty() {
        return NO_SUGGESTIONS_LINE.to_string();
    }
    report
        .suggestions
        .iter()
        .enumerate()
        .map(|(idx, message)| format!("{}. {message}", idx + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_analysis_json(report: &AnalysisReport) -> Result<String, String> {
    let payload = json!({
        "schema_version": 1,
        "source": report.source,
        "total": report.suggestions.len(),
        "suggestions": report.suggestions,
    });
    serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())
}

pub fn render_analysis_jsonl(report: &AnalysisReport) -> Result<String, String> {
    let mut lines = Vec::new();
    for suggestion in &report.suggestions {
        let row = json!({"source": report.source, "suggestion": suggestion});
        lines.push(serde_json::to_string(&row).map_err(|err| err.to_string())?);
    }
    Ok(lines.join("\n"))
}

pub fn render_size_text(report: &SizeReport) -> String {
    let mut lines = Vec::new();
    for layer in &report.layers {
        lines.push(format!("{:>10}  {}", layer.human_size, layer.command));
    }
    lines.push(format!(
        "total: {} ({} bytes)",
        human_size(report.total_bytes),
        report.total_bytes
    ));
    lines.join("\n")
}

pub fn render_size_json(report: &SizeReport) -> Result<String, String> {
    let payload = json!({
        "schema_version": 1,
        "total_bytes": report.total_bytes,
        "total_human": human_size(report.total_bytes),
        "layers": report.layers,
    });
    serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())
}

pub fn render_size_jsonl(report: &SizeReport) -> Result<String, String> {
    let mut lines = Vec::new();
    for layer in &report.layers {
        lines.push(serde_json::to_string(layer).map_err(|err| err.to_string())?);
    }
    Ok(lines.join("\n"))
}
