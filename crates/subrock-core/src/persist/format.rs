//! Serializers for the three output formats.

use anyhow::Result;
use std::fmt::Write as _;

use super::OutputFormat;
use crate::model::{to_pretty_json, UrlData};

/// Full file contents for `data` in `format`.
pub fn render_document(data: &UrlData, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => to_pretty_json(data)?,
        OutputFormat::Html => to_html(data)?,
        OutputFormat::Txt => to_txt(data)?,
    })
}

fn to_html(data: &UrlData) -> Result<String> {
    let json = to_pretty_json(data)?;
    Ok(format!(
        "<html><body><pre>{}</pre></body></html>",
        escape_html(&json)
    ))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn to_txt(data: &UrlData) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for group in data.groups() {
        writeln!(out, "{} URLs:", group.key)?;
        for record in &group.records {
            writeln!(
                out,
                "Occurrence: {}, Type: {}, URL: {}",
                record.occurrence(),
                record.kind(),
                record.url()
            )?;
        }
        out.push('\n');
    }
    Ok(out)
}
