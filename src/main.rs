//! axe2jira CLI binary entry point.
//! Delegates to the library for extract/aggregate and prints results.

use axe2jira::aggregate::{self, TicketTemplate};
use axe2jira::cli::{Cli, Commands};
use axe2jira::config::{self, Effective};
use axe2jira::error::Axe2JiraError;
use axe2jira::extract::{self, ExtractOptions};
use axe2jira::models::WrittenChunk;
use axe2jira::{output, utils};
use clap::Parser;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Extract {
            dir,
            out_dir,
            repo_root,
            output,
        } => {
            let eff = effective_or_exit(repo_root.as_deref(), output.as_deref(), None, None);
            let human = eff.output != "json";
            let opts = ExtractOptions {
                chunk_size: eff.chunk_size,
                fix_placeholder: &eff.fix_placeholder,
                out_dir: out_dir.as_deref().map(Path::new),
            };
            let res = extract::run_extract(Path::new(&dir), &opts, |w: &WrittenChunk| {
                if human {
                    println!("{}", output::converted_line(&w.file));
                }
            });
            match res {
                Ok(report) => {
                    output::print_extract(&report, &eff.output);
                    if !report.failures.is_empty() {
                        std::process::exit(1);
                    }
                }
                Err(e) => fatal(&e),
            }
        }
        Commands::Aggregate {
            input,
            csv,
            repo_root,
            output,
        } => {
            let eff = effective_or_exit(
                repo_root.as_deref(),
                output.as_deref(),
                input.as_deref(),
                csv.as_deref(),
            );
            let human = eff.output != "json";
            let template = TicketTemplate {
                issue_type: &eff.issue_type,
                epic_link: &eff.epic_link,
                description_template: &eff.description_template,
            };
            let res = aggregate::run_aggregate(&eff.input, &eff.csv, &template, |summary: &str| {
                if human {
                    println!("{}", summary);
                }
            });
            match res {
                Ok(report) => {
                    output::print_aggregate(&report, &eff.output);
                    if !report.failures.is_empty() {
                        std::process::exit(1);
                    }
                }
                Err(e) => fatal(&e),
            }
        }
    }
}

fn effective_or_exit(
    repo_root: Option<&str>,
    output: Option<&str>,
    input: Option<&str>,
    csv: Option<&str>,
) -> Effective {
    match config::resolve_effective(repo_root, output, input, csv) {
        Ok(eff) => {
            if !eff.config_found && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No axe2jira.toml found; using defaults."
                );
            }
            eff
        }
        Err(e) => fatal(&e),
    }
}

fn fatal(e: &Axe2JiraError) -> ! {
    eprintln!("{} {}", utils::error_prefix(), e);
    std::process::exit(2);
}
