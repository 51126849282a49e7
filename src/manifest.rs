//! Gallery output: the static HTML manifest and the JSON run summary.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::{GalleryEntry, RunReport};

/// Escape text for HTML element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the gallery page: one linked thumbnail plus caption per entry, in entry order.
pub fn render_html(entries: &[GalleryEntry]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Album</title>\n</head>\n<body>\n<h1>Album</h1>\n",
    );
    for e in entries {
        let _ = write!(
            html,
            "<h2>{caption}</h2>\n<a href=\"{href}\"><img src=\"{src}\" alt=\"{caption}\" border=\"1\"></a>\n",
            caption = html_escape(&e.caption),
            href = html_escape(&e.final_path),
            src = html_escape(&e.thumbnail),
        );
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Write the gallery page to `path`, replacing any previous one.
pub fn write_html(path: &Path, entries: &[GalleryEntry]) -> Result<()> {
    fs::write(path, render_html(entries))
        .with_context(|| format!("write manifest {}", path.display()))
}

/// Write the run summary (entries, skipped images, counts) as pretty JSON.
pub fn write_summary(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize run summary")?;
    fs::write(path, json).with_context(|| format!("write summary {}", path.display()))
}
