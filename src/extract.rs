//! Issue extraction: axe JSON exports to Jira-formatted text chunks.
//!
//! Every `*.json` file directly inside the input directory holds an array of
//! issues. The array is split into consecutive chunks of at most
//! `chunk_size` issues and each chunk is written as `{base}.txt`,
//! `{base}-2.txt`, `{base}-3.txt`, ...
//!
//! A file that cannot be read or parsed is recorded as a failure and the
//! batch continues. An unreadable input directory or a failed chunk write
//! aborts the run.

use crate::error::{Axe2JiraError, Axe2JiraResult};
use crate::models::{ExtractReport, FileFailure, Issue, WrittenChunk};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Settings for one extract run.
pub struct ExtractOptions<'a> {
    pub chunk_size: usize,
    pub fix_placeholder: &'a str,
    /// Where chunk files go; `None` writes them next to their JSON source.
    pub out_dir: Option<&'a Path>,
}

/// Extract every JSON export in `dir` into chunk files.
///
/// `on_written` runs after each chunk file lands on disk.
pub fn run_extract(
    dir: &Path,
    opts: &ExtractOptions,
    mut on_written: impl FnMut(&WrittenChunk),
) -> Axe2JiraResult<ExtractReport> {
    let sources = list_json_files(dir)?;
    let mut report = ExtractReport::default();
    for path in sources {
        let issues = match read_issues(&path) {
            Ok(v) => v,
            Err(e) if !e.is_fatal() => {
                report.failures.push(FileFailure::from_error(&e));
                continue;
            }
            Err(e) => return Err(e),
        };
        if issues.is_empty() {
            report.skipped.push(path.to_string_lossy().to_string());
            continue;
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let target_dir = opts
            .out_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.parent().unwrap_or(dir).to_path_buf());
        let written = write_chunks(
            &path,
            &target_dir,
            base_name(&file_name),
            &issues,
            opts,
            &mut on_written,
        )?;
        report.written.extend(written);
    }
    Ok(report)
}

/// List `*.json` entries directly inside `dir`, in lexicographic order.
pub fn list_json_files(dir: &Path) -> Axe2JiraResult<Vec<PathBuf>> {
    // Surface a missing or unreadable directory explicitly; glob would
    // otherwise just yield nothing.
    fs::read_dir(dir).map_err(|source| Axe2JiraError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    })?;
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*.json");
    let entries = glob::glob_with(
        &pattern.to_string_lossy(),
        glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        },
    )
    .map_err(|e| Axe2JiraError::DirectoryAccess {
        path: dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.msg),
    })?;
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(p) if p.is_file() => files.push(p),
            Ok(_) => {}
            Err(e) => {
                return Err(Axe2JiraError::DirectoryAccess {
                    path: e.path().to_path_buf(),
                    source: e.into(),
                })
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse one JSON export.
pub fn read_issues(path: &Path) -> Axe2JiraResult<Vec<Issue>> {
    let data = fs::read_to_string(path).map_err(|source| Axe2JiraError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| Axe2JiraError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_chunks(
    source: &Path,
    target_dir: &Path,
    base: &str,
    issues: &[Issue],
    opts: &ExtractOptions,
    on_written: &mut impl FnMut(&WrittenChunk),
) -> Axe2JiraResult<Vec<WrittenChunk>> {
    let mut written = Vec::new();
    for (i, range) in chunk_ranges(issues.len(), opts.chunk_size).enumerate() {
        let index = i + 1;
        let out = target_dir.join(chunk_file_name(base, index));
        let chunk = &issues[range];
        fs::write(&out, render_chunk(chunk, opts.fix_placeholder)).map_err(|source| {
            Axe2JiraError::FileWrite {
                path: out.clone(),
                source,
            }
        })?;
        let w = WrittenChunk {
            source: source.to_string_lossy().to_string(),
            file: out.to_string_lossy().to_string(),
            index,
            issues: chunk.len(),
        };
        on_written(&w);
        written.push(w);
    }
    Ok(written)
}

/// Ranges covering `0..n` in order, each at most `size` long.
///
/// Yields `ceil(n / size)` ranges; none when `n == 0`.
pub fn chunk_ranges(n: usize, size: usize) -> impl Iterator<Item = Range<usize>> {
    let size = size.max(1);
    (0..n)
        .step_by(size)
        .map(move |start| start..(start + size).min(n))
}

/// Output name for 1-based chunk `index`: no suffix for the first chunk.
pub fn chunk_file_name(base: &str, index: usize) -> String {
    if index > 1 {
        format!("{}-{}.txt", base, index)
    } else {
        format!("{}.txt", base)
    }
}

/// File name without its final extension.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => &file_name[..pos],
        _ => file_name,
    }
}

/// Render one issue in Jira wiki markup, ending with a `----` rule.
pub fn format_issue(ordinal: usize, issue: &Issue, fix_placeholder: &str) -> String {
    format!(
        "Issue {}.\n\
*Summary:*  {}\n\
*Description:*  _{}_\n\
*Source:*  {{code:html}}{}{{code}}\n\
*Selector:*  {{code:css}}{}{{code}}\n\
*Help:*  _{}_\n\
*Help URL:*  {}\n\
*Fix:* {}\n\
----\n",
        ordinal,
        issue.summary,
        issue.description,
        issue.source,
        issue.first_selector(),
        issue.help_text,
        issue.help_url,
        fix_placeholder,
    )
}

/// Render a chunk; ordinals restart at 1 in every chunk.
pub fn render_chunk(issues: &[Issue], fix_placeholder: &str) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| format_issue(i + 1, issue, fix_placeholder))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FIX_PLACEHOLDER;
    use tempfile::tempdir;

    fn issue(n: usize) -> Issue {
        Issue {
            id: format!("rule-{}", n),
            summary: format!("summary {}", n),
            description: format!("description {}", n),
            source: format!("<div id=\"n{}\"></div>", n),
            help_text: "Elements must have sufficient color contrast".into(),
            help_url: "https://dequeuniversity.com/rules/axe/4.4/color-contrast".into(),
            selectors: vec![format!("#n{}", n), "body".into()],
        }
    }

    fn opts() -> ExtractOptions<'static> {
        ExtractOptions {
            chunk_size: 50,
            fix_placeholder: DEFAULT_FIX_PLACEHOLDER,
            out_dir: None,
        }
    }

    fn write_export(dir: &Path, name: &str, count: usize) {
        let items: Vec<serde_json::Value> = (1..=count)
            .map(|n| {
                serde_json::json!({
                    "id": format!("rule-{}", n),
                    "summary": format!("summary {}", n),
                    "description": "d",
                    "source": "<a></a>",
                    "help": "h",
                    "help_url": "u",
                    "selector": [format!("#n{}", n)]
                })
            })
            .collect();
        fs::write(dir.join(name), serde_json::to_string(&items).unwrap()).unwrap();
    }

    #[test]
    fn test_chunk_ranges_partition_in_order() {
        for (n, expected) in [(0, 0), (1, 1), (49, 1), (50, 1), (51, 2), (100, 2), (120, 3)] {
            let ranges: Vec<_> = chunk_ranges(n, 50).collect();
            assert_eq!(ranges.len(), expected, "n={}", n);
            let flat: Vec<usize> = ranges.iter().cloned().flatten().collect();
            assert_eq!(flat, (0..n).collect::<Vec<_>>());
            assert!(ranges.iter().all(|r| r.len() <= 50 && !r.is_empty()));
        }
        let sizes: Vec<usize> = chunk_ranges(120, 50).map(|r| r.len()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
    }

    #[test]
    fn test_chunk_file_names_have_no_first_suffix() {
        let names: Vec<String> = (1..=3)
            .map(|k| chunk_file_name("Home_Page-Nav_Bar", k))
            .collect();
        assert_eq!(
            names,
            vec!["Home_Page-Nav_Bar.txt", "Home_Page-Nav_Bar-2.txt", "Home_Page-Nav_Bar-3.txt"]
        );
    }

    #[test]
    fn test_base_name_strips_only_final_extension() {
        assert_eq!(base_name("A_B-C_D.json"), "A_B-C_D");
        assert_eq!(base_name("report.v2.json"), "report.v2");
        assert_eq!(base_name("noext"), "noext");
        assert_eq!(base_name(".json"), ".json");
    }

    #[test]
    fn test_format_issue_layout() {
        let out = format_issue(1, &issue(7), DEFAULT_FIX_PLACEHOLDER);
        let expected = "Issue 1.\n\
*Summary:*  summary 7\n\
*Description:*  _description 7_\n\
*Source:*  {code:html}<div id=\"n7\"></div>{code}\n\
*Selector:*  {code:css}#n7{code}\n\
*Help:*  _Elements must have sufficient color contrast_\n\
*Help URL:*  https://dequeuniversity.com/rules/axe/4.4/color-contrast\n\
*Fix:* _very generally state how it was addressed_\n\
----\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_selectors_render_empty_code_block() {
        let mut is = issue(1);
        is.selectors.clear();
        let out = format_issue(3, &is, DEFAULT_FIX_PLACEHOLDER);
        assert!(out.starts_with("Issue 3.\n"));
        assert!(out.contains("*Selector:*  {code:css}{code}\n"));
    }

    #[test]
    fn test_render_chunk_restarts_ordinals() {
        let issues: Vec<Issue> = (1..=3).map(issue).collect();
        let out = render_chunk(&issues[1..], "x");
        assert!(out.starts_with("Issue 1.\n*Summary:*  summary 2\n"));
        assert!(out.contains("Issue 2.\n*Summary:*  summary 3\n"));
        assert_eq!(out.matches("----\n").count(), 2);
    }

    #[test]
    fn test_run_extract_splits_120_issues_into_three_files() {
        let dir = tempdir().unwrap();
        write_export(dir.path(), "Home_Page-Nav_Bar.json", 120);
        let mut seen = Vec::new();
        let report = run_extract(dir.path(), &opts(), |w: &WrittenChunk| {
            seen.push(w.file.clone())
        })
        .unwrap();

        let counts: Vec<usize> = report.written.iter().map(|w| w.issues).collect();
        assert_eq!(counts, vec![50, 50, 20]);
        assert_eq!(seen.len(), 3);
        assert!(report.failures.is_empty());

        let mut all = String::new();
        for name in ["Home_Page-Nav_Bar.txt", "Home_Page-Nav_Bar-2.txt", "Home_Page-Nav_Bar-3.txt"] {
            all.push_str(&fs::read_to_string(dir.path().join(name)).unwrap());
        }
        assert!(!dir.path().join("Home_Page-Nav_Bar-1.txt").exists());
        assert!(!dir.path().join("Home_Page-Nav_Bar-4.txt").exists());
        // Every issue appears exactly once, in original order
        let summaries: Vec<&str> = all
            .lines()
            .filter_map(|l| l.strip_prefix("*Summary:*  "))
            .collect();
        let expected: Vec<String> = (1..=120).map(|n| format!("summary {}", n)).collect();
        assert_eq!(summaries, expected);
    }

    #[test]
    fn test_run_extract_isolates_bad_files_and_skips_empty() {
        let dir = tempdir().unwrap();
        write_export(dir.path(), "b_page-ok.json", 2);
        fs::write(dir.path().join("a_page-broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("c_page-object.json"), r#"{"id":"x"}"#).unwrap();
        fs::write(dir.path().join("d_page-empty.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let report = run_extract(dir.path(), &opts(), |_: &WrittenChunk| {}).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(report.written[0].file.ends_with("b_page-ok.txt"));
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures[0].file.ends_with("a_page-broken.json"));
        assert!(report.failures[0].message.starts_with("cannot parse"));
        assert!(report.failures[1].file.ends_with("c_page-object.json"));
        assert_eq!(report.skipped.len(), 1);
        assert!(!dir.path().join("d_page-empty.txt").exists());
    }

    #[test]
    fn test_run_extract_out_dir_and_missing_dir() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_export(dir.path(), "P-C.json", 51);
        let o = ExtractOptions {
            out_dir: Some(out.path()),
            ..opts()
        };
        let report = run_extract(dir.path(), &o, |_: &WrittenChunk| {}).unwrap();
        assert_eq!(report.written.len(), 2);
        assert!(out.path().join("P-C.txt").exists());
        assert!(out.path().join("P-C-2.txt").exists());

        let missing = dir.path().join("missing");
        let err = run_extract(&missing, &opts(), |_: &WrittenChunk| {}).unwrap_err();
        assert!(matches!(err, Axe2JiraError::DirectoryAccess { .. }));
    }
}
