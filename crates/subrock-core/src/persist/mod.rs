//! Persist fetched URLs as `{target}_urls.{json,html,txt}`.

mod filename;
mod format;

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::model::ApiResponse;

pub use filename::{output_filename, sanitize_target};
pub use format::render_document;

/// File format requested with `-o/--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
    Txt,
}

impl OutputFormat {
    /// File extension, also the CLI spelling.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "txt" => Ok(OutputFormat::Txt),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Where and how output files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    pub dir: PathBuf,
    /// Replace an existing file of the same name (the default).
    pub overwrite: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            overwrite: true,
        }
    }
}

/// What [`save`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// Response had no `data`; nothing written.
    NoData,
    /// File exists and overwriting is disabled; nothing written.
    Exists(PathBuf),
}

/// Write `response.data` for `target` in `format`. Writes at most one file.
pub fn save(
    response: &ApiResponse,
    target: &str,
    format: OutputFormat,
    opts: &SaveOptions,
) -> Result<SaveOutcome> {
    let Some(data) = &response.data else {
        tracing::warn!("No data to save for {}", target);
        return Ok(SaveOutcome::NoData);
    };

    let name = output_filename(target, format);
    let path = if opts.dir.as_os_str().is_empty() || opts.dir == Path::new(".") {
        PathBuf::from(name)
    } else {
        opts.dir.join(name)
    };
    if path.exists() {
        if !opts.overwrite {
            tracing::warn!("refusing to overwrite {}", path.display());
            return Ok(SaveOutcome::Exists(path));
        }
        tracing::warn!("overwriting existing {}", path.display());
    }

    let contents = render_document(data, format)?;
    write_file(&path, &contents)?;
    tracing::info!("URLs saved to {}", path.display());
    Ok(SaveOutcome::Saved(path))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
