//! Configuration discovery and effective settings resolution.
//!
//! axe2jira reads `axe2jira.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Without a config file the fixed defaults apply:
//! - `output`: `human`
//! - `extract.chunk_size`: 50
//! - `extract.fix_placeholder`: `_very generally state how it was addressed_`
//! - `aggregate.input`: `./issues`
//! - `aggregate.csv`: `import.csv`
//! - `aggregate.issue_type`, `aggregate.epic_link`,
//!   `aggregate.description_template`: see the constants below
//!
//! Overrides precedence: CLI > config file > defaults. Relative paths from
//! the config file resolve against the repository root; CLI paths and the
//! built-in defaults resolve against the working directory.

use crate::error::{Axe2JiraError, Axe2JiraResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CHUNK_SIZE: usize = 50;
pub const DEFAULT_FIX_PLACEHOLDER: &str = "_very generally state how it was addressed_";
pub const DEFAULT_INPUT_DIR: &str = "./issues";
pub const DEFAULT_CSV_FILE: &str = "import.csv";
pub const DEFAULT_ISSUE_TYPE: &str = "Improvement";
pub const DEFAULT_EPIC_LINK: &str = "ADS - Web Content Accessibility Guidelines";
pub const DEFAULT_DESCRIPTION_TEMPLATE: &str = "+Need:+\n\
-update the Home page of ADS to be WCAG 2.1 AAA compliant and address Axe violations\n\
+Steps:+\n\
- run the Axe tools against the page\n\
- fix any issues reported by axe or denote / justify any issue that is not valid or applicable\n";

const CONFIG_NAMES: [&str; 3] = ["axe2jira.toml", "axe2jira.yaml", "axe2jira.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Extraction settings under `[extract]`.
pub struct ExtractCfg {
    pub chunk_size: Option<usize>,
    pub fix_placeholder: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Aggregation settings under `[aggregate]`.
pub struct AggregateCfg {
    pub input: Option<String>,
    pub csv: Option<String>,
    pub issue_type: Option<String>,
    pub epic_link: Option<String>,
    pub description_template: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `axe2jira.toml|yaml`.
pub struct Axe2JiraConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub extract: Option<ExtractCfg>,
    #[serde(default)]
    pub aggregate: Option<AggregateCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub chunk_size: usize,
    pub fix_placeholder: String,
    pub input: PathBuf,
    pub csv: PathBuf,
    pub issue_type: String,
    pub epic_link: String,
    pub description_template: String,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when an `axe2jira.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `Axe2JiraConfig` from `axe2jira.toml` or `axe2jira.yaml|yml` if present.
///
/// A config file that exists but cannot be read or parsed is an error.
pub fn load_config(root: &Path) -> Axe2JiraResult<Option<Axe2JiraConfig>> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if !p.is_file() {
            continue;
        }
        let s = fs::read_to_string(&p)
            .map_err(|e| Axe2JiraError::Config(format!("{}: {}", p.display(), e)))?;
        let cfg = if name.ends_with(".toml") {
            toml::from_str::<Axe2JiraConfig>(&s)
                .map_err(|e| Axe2JiraError::Config(format!("{}: {}", p.display(), e)))?
        } else {
            serde_yaml::from_str::<Axe2JiraConfig>(&s)
                .map_err(|e| Axe2JiraError::Config(format!("{}: {}", p.display(), e)))?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_input: Option<&str>,
    cli_csv: Option<&str>,
) -> Axe2JiraResult<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let ext = cfg.extract.unwrap_or_default();
    let agg = cfg.aggregate.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(Axe2JiraError::Config(format!(
            "output must be human or json, got '{}'",
            output
        )));
    }

    let chunk_size = ext.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
    if chunk_size == 0 {
        return Err(Axe2JiraError::Config(
            "extract.chunk_size must be at least 1".into(),
        ));
    }

    let input = match (cli_input, agg.input.as_deref()) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => repo_root.join(p),
        (None, None) => PathBuf::from(DEFAULT_INPUT_DIR),
    };
    let csv = match (cli_csv, agg.csv.as_deref()) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => repo_root.join(p),
        (None, None) => PathBuf::from(DEFAULT_CSV_FILE),
    };

    Ok(Effective {
        repo_root,
        config_found,
        output,
        chunk_size,
        fix_placeholder: ext
            .fix_placeholder
            .unwrap_or_else(|| DEFAULT_FIX_PLACEHOLDER.to_string()),
        input,
        csv,
        issue_type: agg
            .issue_type
            .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
        epic_link: agg.epic_link.unwrap_or_else(|| DEFAULT_EPIC_LINK.to_string()),
        description_template: agg
            .description_template
            .unwrap_or_else(|| DEFAULT_DESCRIPTION_TEMPLATE.to_string()),
    })
}
