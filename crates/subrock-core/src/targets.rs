//! Where targets come from: one on the command line, or a list file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Targets requested for this run. Precedence: positional domain, `--url`, `--list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    Single(String),
    List(PathBuf),
    Missing,
}

impl TargetSource {
    pub fn select(domain: Option<String>, url: Option<String>, list: Option<PathBuf>) -> Self {
        if let Some(domain) = domain.filter(|d| !d.is_empty()) {
            TargetSource::Single(domain)
        } else if let Some(url) = url.filter(|u| !u.is_empty()) {
            TargetSource::Single(url)
        } else if let Some(list) = list {
            TargetSource::List(list)
        } else {
            TargetSource::Missing
        }
    }
}

/// One target per line; lines are trimmed and blank lines dropped.
pub fn parse_target_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn read_target_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read target list: {}", path.display()))?;
    Ok(parse_target_list(&contents))
}
