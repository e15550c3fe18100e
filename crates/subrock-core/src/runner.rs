//! Per-target pipeline: check → fetch → render → save.
//!
//! Targets are processed one at a time; nothing a target does (failed probe,
//! failed fetch, failed write) stops the ones after it.

use anyhow::Result;
use std::io::Write;

use crate::client::UrlSource;
use crate::fetcher;
use crate::persist::{self, OutputFormat, SaveOptions, SaveOutcome};
use crate::probe;
use crate::render::{self, RenderMode};
use crate::targets::{self, TargetSource};

pub const MISSING_TARGET_MESSAGE: &str =
    "Please provide either a domain, a URL, or a list of URLs.";

/// Options shared by every target of a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub mode: RenderMode,
    /// Persist results in this format; `None` = print only.
    pub output: Option<OutputFormat>,
    /// Require HTTP 200 from the target before querying the API.
    pub check: bool,
    pub save: SaveOptions,
}

/// Result of processing one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// Reachability check failed; the API was not queried.
    Unreachable,
    /// API request failed.
    FetchFailed,
    /// Response rendered; `saved` is set when an output format was requested.
    Rendered { saved: Option<SaveOutcome> },
    /// Response rendered but the output file could not be written.
    SaveFailed,
}

/// Counts over a batch, logged when the batch ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub unreachable: usize,
    pub failed: usize,
    pub saved: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &TargetOutcome) {
        self.processed += 1;
        match outcome {
            TargetOutcome::Unreachable => self.unreachable += 1,
            TargetOutcome::FetchFailed | TargetOutcome::SaveFailed => self.failed += 1,
            TargetOutcome::Rendered {
                saved: Some(SaveOutcome::Saved(_)),
            } => self.saved += 1,
            TargetOutcome::Rendered { .. } => {}
        }
    }
}

/// Run the full pipeline for one target.
///
/// Network and file failures are reported on `out` and become an outcome;
/// `Err` means `out` itself could not be written.
pub fn process_target<S: UrlSource + ?Sized>(
    source: &S,
    target: &str,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> Result<TargetOutcome> {
    if opts.check {
        let url = probe::probe_url(target);
        tracing::info!("checking accessibility of {}", url);
        if !probe::is_accessible(source, &url) {
            tracing::error!("Domain {} is not accessible.", target);
            writeln!(out, "Domain {} is not accessible.", target)?;
            return Ok(TargetOutcome::Unreachable);
        }
    }

    let Some(response) = fetcher::fetch_urls(source, target, out)? else {
        return Ok(TargetOutcome::FetchFailed);
    };

    render::render(&response, opts.mode, out)?;

    let saved = match opts.output {
        Some(format) => {
            let outcome = match persist::save(&response, target, format, &opts.save) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Failed to save URLs for {}: {:#}", target, e);
                    writeln!(out, "Failed to save URLs for {}: {:#}", target, e)?;
                    return Ok(TargetOutcome::SaveFailed);
                }
            };
            match &outcome {
                SaveOutcome::Saved(path) => writeln!(out, "URLs saved to {}", path.display())?,
                SaveOutcome::NoData => writeln!(out, "No data to save.")?,
                SaveOutcome::Exists(path) => {
                    writeln!(out, "Refusing to overwrite {}", path.display())?
                }
            }
            Some(outcome)
        }
        None => None,
    };

    Ok(TargetOutcome::Rendered { saved })
}

/// Run every target in order. A failing target is counted and the batch
/// moves on; only a failure to write `out` stops it.
pub fn process_targets<S: UrlSource + ?Sized>(
    source: &S,
    targets: &[String],
    opts: &RunOptions,
    out: &mut dyn Write,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for target in targets {
        let outcome = process_target(source, target, opts, out)?;
        summary.record(&outcome);
    }
    tracing::info!(
        processed = summary.processed,
        unreachable = summary.unreachable,
        failed = summary.failed,
        saved = summary.saved,
        "batch finished"
    );
    Ok(summary)
}

/// Resolve `selection` into targets and process them.
pub fn run<S: UrlSource + ?Sized>(
    source: &S,
    selection: &TargetSource,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> Result<BatchSummary> {
    match selection {
        TargetSource::Single(target) => {
            process_targets(source, std::slice::from_ref(target), opts, out)
        }
        TargetSource::List(path) => {
            if !path.is_file() {
                tracing::error!("The file {} does not exist.", path.display());
                writeln!(out, "The file {} does not exist.", path.display())?;
                return Ok(BatchSummary::default());
            }
            match targets::read_target_list(path) {
                Ok(list) => {
                    tracing::info!("read {} targets from {}", list.len(), path.display());
                    process_targets(source, &list, opts, out)
                }
                Err(e) => {
                    tracing::error!("{:#}", e);
                    writeln!(out, "Could not read {}: {:#}", path.display(), e)?;
                    Ok(BatchSummary::default())
                }
            }
        }
        TargetSource::Missing => {
            tracing::warn!("{}", MISSING_TARGET_MESSAGE);
            writeln!(out, "{}", MISSING_TARGET_MESSAGE)?;
            Ok(BatchSummary::default())
        }
    }
}
