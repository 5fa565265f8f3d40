//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "axe2jira",
    version,
    about = "Convert axe accessibility exports into Jira tickets",
    long_about = "axe2jira — turn axe browser extension JSON exports into Jira-formatted text chunks, then aggregate the chunks into one CSV for bulk import.\n\nConfiguration precedence: CLI > axe2jira.toml > defaults.",
    after_help = "Examples:\n  axe2jira extract exports/\n  axe2jira aggregate\n  axe2jira aggregate --input issues --csv import.csv --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for extraction and aggregation.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current axe2jira version.")]
    Version,
    /// Split JSON exports into Jira text chunks
    #[command(
        about = "Convert axe JSON exports to Jira text files",
        long_about = "Read every *.json export in DIR and write its issues as Jira-formatted text files of at most 50 issues each: NAME.txt, NAME-2.txt, ...",
        after_help = "Examples:\n  axe2jira extract exports/\n  axe2jira extract exports --out-dir issues"
    )]
    Extract {
        #[arg(help = "Directory holding the exported .json files")]
        dir: String,
        #[arg(long, help = "Directory for the text files (default: next to each .json)")]
        out_dir: Option<String>,
        #[arg(long, help = "Repository root used to find axe2jira.toml (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Aggregate text chunks into one CSV
    #[command(
        about = "Build a Jira import CSV from text files",
        long_about = "Recursively read *.txt files under the input directory and write one CSV row per file with columns Summary, Issue Type, Epic Link, Description.",
        after_help = "Examples:\n  axe2jira aggregate\n  axe2jira aggregate --input issues --csv import.csv"
    )]
    Aggregate {
        #[arg(long, help = "Directory of .txt tickets (default: ./issues)")]
        input: Option<String>,
        #[arg(long, help = "CSV file to write (default: import.csv)")]
        csv: Option<String>,
        #[arg(long, help = "Repository root used to find axe2jira.toml (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
