//! Ticket aggregation: Jira text chunks to a single CSV import.
//!
//! Walks the input directory recursively in file-name order, turns each
//! `.txt` file into a `Ticket` and writes all tickets at once. The summary
//! comes from the file name (`Home_Page-Nav_Bar.txt` becomes
//! `Home Page - Nav Bar`); the description is the configured template
//! followed by the raw file body.

use crate::error::{Axe2JiraError, Axe2JiraResult};
use crate::models::{AggregateReport, FileFailure, Ticket};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

pub const CSV_HEADER: [&str; 4] = ["Summary", "Issue Type", "Epic Link", "Description"];

/// Constant ticket fields applied to every row.
pub struct TicketTemplate<'a> {
    pub issue_type: &'a str,
    pub epic_link: &'a str,
    pub description_template: &'a str,
}

/// Tickets collected from one traversal, in traversal order.
#[derive(Default)]
pub struct Collected {
    pub tickets: Vec<Ticket>,
    pub nonconforming: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Aggregate all text chunks under `input` into the CSV at `csv_path`.
///
/// `on_ticket` runs with each derived summary during traversal.
pub fn run_aggregate(
    input: &Path,
    csv_path: &Path,
    template: &TicketTemplate,
    on_ticket: impl FnMut(&str),
) -> Axe2JiraResult<AggregateReport> {
    let collected = collect_tickets(input, template, Collected::default(), on_ticket)?;
    write_csv(csv_path, &collected.tickets)?;
    Ok(AggregateReport {
        csv: csv_path.to_string_lossy().to_string(),
        tickets: collected
            .tickets
            .into_iter()
            .map(|t| t.summary)
            .collect(),
        nonconforming: collected.nonconforming,
        failures: collected.failures,
    })
}

/// Walk `root` and append one ticket per readable `.txt` file to `acc`.
///
/// Unreadable files are recorded in `acc.failures`; an unreadable root is
/// an error.
pub fn collect_tickets(
    root: &Path,
    template: &TicketTemplate,
    mut acc: Collected,
    mut on_ticket: impl FnMut(&str),
) -> Axe2JiraResult<Collected> {
    fs::read_dir(root).map_err(|source| Axe2JiraError::DirectoryAccess {
        path: root.to_path_buf(),
        source,
    })?;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let source = std::io::Error::from(err);
                acc.failures.push(FileFailure::from_error(&Axe2JiraError::FileRead {
                    path,
                    source,
                }));
                continue;
            }
        };
        if entry.file_type().is_dir() || !has_txt_extension(entry.path()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let body = match fs::read_to_string(entry.path()) {
            Ok(s) => s,
            Err(source) => {
                acc.failures.push(FileFailure::from_error(&Axe2JiraError::FileRead {
                    path: entry.path().to_path_buf(),
                    source,
                }));
                continue;
            }
        };
        if !is_conforming_name(&name) {
            acc.nonconforming.push(entry.path().to_string_lossy().to_string());
        }
        let ticket = build_ticket(&name, &body, template);
        on_ticket(&ticket.summary);
        acc.tickets.push(ticket);
    }
    Ok(acc)
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension() == Some(std::ffi::OsStr::new("txt"))
}

/// Build a ticket from a chunk file name and its body.
pub fn build_ticket(file_name: &str, body: &str, template: &TicketTemplate) -> Ticket {
    Ticket {
        summary: summary_from_file_name(file_name),
        issue_type: template.issue_type.to_string(),
        epic_link: template.epic_link.to_string(),
        description: format!("{}{}", template.description_template, body),
    }
}

/// `Page_Name-Component_Name.ext` to `Page Name - Component Name`.
///
/// Only the final extension is stripped. Names of any other shape are
/// translated the same way.
pub fn summary_from_file_name(file_name: &str) -> String {
    crate::extract::base_name(file_name)
        .replace('_', " ")
        .replace('-', " - ")
}

/// Whether `file_name` has the `Page_Name-Component_Name.ext` shape,
/// optionally followed by a `-N` chunk suffix.
pub fn is_conforming_name(file_name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^-\s.][^-]*-[^-]+(-[0-9]+)?\.[^.\-]+$").expect("valid file name regex")
    });
    re.is_match(file_name)
}

/// Write header plus one row per ticket, replacing `path` atomically.
///
/// The temporary sibling file is removed whenever the write fails.
pub fn write_csv(path: &Path, tickets: &[Ticket]) -> Axe2JiraResult<()> {
    let tmp = tmp_sibling(path);
    let res = write_csv_to(&tmp, path, tickets).and_then(|()| {
        fs::rename(&tmp, path).map_err(|source| Axe2JiraError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    });
    if res.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    res
}

fn write_csv_to(tmp: &Path, path: &Path, tickets: &[Ticket]) -> Axe2JiraResult<()> {
    let csv_err = |source: csv::Error| Axe2JiraError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::WriterBuilder::new()
        .from_path(tmp)
        .map_err(csv_err)?;
    wtr.write_record(CSV_HEADER).map_err(csv_err)?;
    for t in tickets {
        wtr.write_record([
            t.summary.as_str(),
            t.issue_type.as_str(),
            t.epic_link.as_str(),
            t.description.as_str(),
        ])
        .map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| Axe2JiraError::FileWrite {
        path: tmp.to_path_buf(),
        source,
    })
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
