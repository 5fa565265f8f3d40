//! Output rendering for extract and aggregate commands.
//!
//! Supports `human` (default) and `json` outputs. In human mode the per-file
//! lines are printed while the run progresses; the printers here emit the
//! closing diagnostics and summary. The JSON form is one document with the
//! per-item fields and a top-level summary.

use crate::models::{AggregateReport, ExtractReport, FileFailure};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && utils::color_enabled()
}

/// Confirmation line for one written chunk file.
pub fn converted_line(file: &str) -> String {
    format!("{} successfully converted to jira", file)
}

fn print_failures(failures: &[FileFailure]) {
    for f in failures {
        eprintln!("{} {}", utils::error_prefix(), f.message);
    }
}

fn print_summary(line: String, color: bool) {
    if color {
        println!("{}", line.bold());
    } else {
        println!("{}", line);
    }
}

/// Print the closing part of an extract run.
pub fn print_extract(res: &ExtractReport, output: &str) {
    match output {
        "json" => println!("{}", render_json(&compose_extract_json(res))),
        _ => {
            for s in &res.skipped {
                eprintln!(
                    "{} {} holds no issues; nothing written",
                    utils::note_prefix(),
                    s
                );
            }
            print_failures(&res.failures);
            let summary = format!(
                "— Summary — files_written={} skipped={} failed={}",
                res.written.len(),
                res.skipped.len(),
                res.failures.len()
            );
            print_summary(summary, use_colors(output));
        }
    }
}

/// Print the closing part of an aggregate run.
pub fn print_aggregate(res: &AggregateReport, output: &str) {
    match output {
        "json" => println!("{}", render_json(&compose_aggregate_json(res))),
        _ => {
            for n in &res.nonconforming {
                eprintln!(
                    "{} {} does not follow Page_Name-Component_Name.txt",
                    utils::warn_prefix(),
                    n
                );
            }
            print_failures(&res.failures);
            let summary = format!(
                "— Summary — tickets={} failed={} csv={}",
                res.tickets.len(),
                res.failures.len(),
                res.csv
            );
            print_summary(summary, use_colors(output));
        }
    }
}

/// Pretty-printed JSON document as written to stdout.
pub fn render_json(value: &JsonVal) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Compose extract JSON object (pure) for testing/snapshot purposes.
pub fn compose_extract_json(res: &ExtractReport) -> JsonVal {
    json!({
        "results": res.written,
        "skipped": res.skipped,
        "failures": res.failures,
        "summary": {
            "written": res.written.len(),
            "issues": res.written.iter().map(|w| w.issues).sum::<usize>(),
            "skipped": res.skipped.len(),
            "failed": res.failures.len(),
        },
    })
}

/// Compose aggregate JSON object (pure) for testing/snapshot purposes.
pub fn compose_aggregate_json(res: &AggregateReport) -> JsonVal {
    json!({
        "csv": res.csv,
        "tickets": res.tickets,
        "nonconforming": res.nonconforming,
        "failures": res.failures,
        "summary": {
            "rows": res.tickets.len() + 1,
            "tickets": res.tickets.len(),
            "failed": res.failures.len(),
        },
    })
}
