// SPDX-License-Identifier: Apache-2.0

//! `dockhand` is the CLI over the Dockerfile analysis engine.
//!
//! Every command helper returns `Result<(String, i32), String>`: the rendered
//! report plus the exit code, or a one-line error. The dispatcher owns all
//! printing, so helpers stay testable without capturing streams.

#![forbid(unsafe_code)]

mod cli;

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::{CheckCommand, Cli, Command, FormatArg, ReportArg};
use dockhand_adapters::RealFs;
use dockhand_core::checks::{catalog, lint_catalog, Check};
use dockhand_core::render::{
    render_analysis_json, render_analysis_jsonl, render_analysis_text, render_size_json,
    render_size_jsonl, render_size_text,
};
use dockhand_core::{
    analyze_outcomes, collect_suggestions, load_source, summarize_layers, AnalyzeRequest,
};
use dockhand_model::{analysis_report_schema, size_report_schema, AnalysisReport, LayerRecord};

struct AnalyzeOptions {
    dockerfile: PathBuf,
    context: Option<PathBuf>,
    strict: bool,
    verbose: bool,
    format: FormatArg,
    out: Option<PathBuf>,
}

fn run_analyze(options: AnalyzeOptions) -> Result<(String, i32), String> {
    let (text, source, request) = if options.dockerfile.as_path() == Path::new("-") {
        let request = AnalyzeRequest {
            recipe_dir: None,
            context_root: options.context,
        };
        (read_stdin()?, "-".to_string(), request)
    } else {
        let text = load_source(&RealFs, &options.dockerfile).map_err(|err| err.to_string())?;
        let request = AnalyzeRequest::for_file(&options.dockerfile, options.context);
        (text, options.dockerfile.display().to_string(), request)
    };

    let outcomes = analyze_outcomes(&RealFs, &text, &request);
    if options.verbose {
        for outcome in &outcomes {
            eprintln!(
                "check {}: {} triggered={}",
                outcome.id, outcome.name, outcome.triggered
            );
        }
    }
    let report = AnalysisReport {
        source,
        suggestions: collect_suggestions(&outcomes),
    };
    let rendered = match options.format {
        FormatArg::Text => render_analysis_text(&report),
        FormatArg::Json => render_analysis_json(&report)?,
        FormatArg::Jsonl => render_analysis_jsonl(&report)?,
    };
    write_output_if_requested(options.out, &rendered)?;
    let code = if options.strict && !report.suggestions.is_empty() {
        1
    } else {
        0
    };
    Ok((rendered, code))
}

fn run_layers(
    history: PathBuf,
    format: FormatArg,
    out: Option<PathBuf>,
) -> Result<(String, i32), String> {
    let text = if history.as_path() == Path::new("-") {
        read_stdin()?
    } else {
        std::fs::read_to_string(&history)
            .map_err(|err| format!("cannot read {}: {err}", history.display()))?
    };
    let records: Vec<LayerRecord> =
        serde_json::from_str(&text).map_err(|err| format!("cannot parse layer history: {err}"))?;
    let report = summarize_layers(&records);
    let rendered = match format {
        FormatArg::Text => render_size_text(&report),
        FormatArg::Json => render_size_json(&report)?,
        FormatArg::Jsonl => render_size_jsonl(&report)?,
    };
    write_output_if_requested(out, &rendered)?;
    Ok((rendered, 0))
}

fn render_check_rows(checks: &[Check], format: FormatArg) -> Result<String, String> {
    match format {
        FormatArg::Text => Ok(checks
            .iter()
            .map(|check| {
                format!(
                    "{}\t{}\t{}\t{}",
                    check.id,
                    check.name,
                    check.kind.as_str(),
                    check.title
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        FormatArg::Json => {
            let rows: Vec<serde_json::Value> = checks
                .iter()
                .map(|check| {
                    json!({
                        "id": check.id,
                        "name": check.name,
                        "kind": check.kind.as_str(),
                        "title": check.title,
                        "message": check.message,
                    })
                })
                .collect();
            let payload = json!({"schema_version": 1, "checks": rows});
            serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())
        }
        FormatArg::Jsonl => Err("jsonl output is not supported for list".to_string()),
    }
}

fn run_check_list(format: FormatArg, out: Option<PathBuf>) -> Result<(String, i32), String> {
    let checks = catalog();
    let lints = lint_catalog(&checks);
    if !lints.is_empty() {
        return Err(format!("catalog lint failed: {}", lints.join("; ")));
    }
    let rendered = render_check_rows(&checks, format)?;
    write_output_if_requested(out, &rendered)?;
    Ok((rendered, 0))
}

fn run_check_explain(
    check_id: &str,
    format: FormatArg,
    out: Option<PathBuf>,
) -> Result<(String, i32), String> {
    let checks = catalog();
    let check = checks
        .iter()
        .find(|check| check.id.eq_ignore_ascii_case(check_id))
        .ok_or_else(|| format!("unknown check id `{check_id}` (valid ids are DF-001..DF-013)"))?;
    let rendered = match format {
        FormatArg::Text => format!(
            "id: {}\nname: {}\nkind: {}\ntitle: {}\nmessage: {}",
            check.id,
            check.name,
            check.kind.as_str(),
            check.title,
            check.message
        ),
        FormatArg::Json => {
            let payload = json!({
                "schema_version": 1,
                "id": check.id,
                "name": check.name,
                "kind": check.kind.as_str(),
                "title": check.title,
                "message": check.message,
            });
            serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())?
        }
        FormatArg::Jsonl => return Err("jsonl output is not supported for explain".to_string()),
    };
    write_output_if_requested(out, &rendered)?;
    Ok((rendered, 0))
}

fn run_schema(report: ReportArg, out: Option<PathBuf>) -> Result<(String, i32), String> {
    let schema = match report {
        ReportArg::Analysis => analysis_report_schema(),
        ReportArg::Size => size_report_schema(),
    };
    let rendered = serde_json::to_string_pretty(&schema).map_err(|err| err.to_string())?;
    write_output_if_requested(out, &rendered)?;
    Ok((rendered, 0))
}

fn read_stdin() -> Result<String, String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|err| format!("cannot read stdin: {err}"))?;
    Ok(text)
}

fn write_output_if_requested(out: Option<PathBuf>, rendered: &str) -> Result<(), String> {
    if let Some(path) = out {
        std::fs::write(&path, format!("{rendered}\n"))
            .map_err(|err| format!("cannot write {}: {err}", path.display()))?;
    }
    Ok(())
}

fn emit(quiet: bool, label: &str, outcome: Result<(String, i32), String>) -> i32 {
    match outcome {
        Ok((rendered, code)) => {
            if !quiet && !rendered.is_empty() {
                if code == 0 {
                    println!("{rendered}");
                } else {
                    eprintln!("{rendered}");
                }
            }
            code
        }
        Err(err) => {
            eprintln!("dockhand {label} failed: {err}");
            1
        }
    }
}

pub(crate) fn run_command(cli: Cli) -> i32 {
    let quiet = cli.quiet;
    let verbose = cli.verbose;
    match cli.command {
        Command::Analyze {
            dockerfile,
            context,
            strict,
            format,
            out,
        } => emit(
            quiet,
            "analyze",
            run_analyze(AnalyzeOptions {
                dockerfile,
                context,
                strict,
                verbose,
                format,
                out,
            }),
        ),
        Command::Layers {
            history,
            format,
            out,
        } => emit(quiet, "layers", run_layers(history, format, out)),
        Command::Check { command } => match command {
            CheckCommand::List { format, out } => {
                emit(quiet, "check list", run_check_list(format, out))
            }
            CheckCommand::Explain {
                check_id,
                format,
                out,
            } => emit(
                quiet,
                "check explain",
                run_check_explain(&check_id, format, out),
            ),
        },
        Command::Schema { report, out } => emit(quiet, "schema", run_schema(report, out)),
    }
}

fn main() {
    std::process::exit(cli::run());
}
