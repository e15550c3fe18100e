//! Terminal rendering of an API response.

use std::io::Write;

use anyhow::Result;

use crate::model::{to_pretty_json, ApiResponse};

pub const NO_URLS_MESSAGE: &str = "No URLs found in the response.";
pub const NO_DATA_MESSAGE: &str = "No data found in the response.";

/// How a response is shown on standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One URL per line.
    #[default]
    Compact,
    /// The whole `data` object as indented JSON.
    Verbose,
}

impl RenderMode {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            RenderMode::Verbose
        } else {
            RenderMode::Compact
        }
    }
}

pub fn render(response: &ApiResponse, mode: RenderMode, out: &mut dyn Write) -> Result<()> {
    match (mode, &response.data) {
        (RenderMode::Compact, Some(data)) => {
            for url in data.urls() {
                writeln!(out, "{}", url)?;
            }
        }
        (RenderMode::Compact, None) => writeln!(out, "{}", NO_URLS_MESSAGE)?,
        (RenderMode::Verbose, Some(data)) => writeln!(out, "{}", to_pretty_json(data)?)?,
        (RenderMode::Verbose, None) => writeln!(out, "{}", NO_DATA_MESSAGE)?,
    }
    Ok(())
}
