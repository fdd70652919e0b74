//! Report export
//!
//! Materializes an AggregateReport as a flat CSV file (single `Links`
//! column), a flat newline-joined text file, or a ZIP archive holding one
//! CSV per bucket. Buckets are written in sorted-key order so exports are
//! deterministic; link order within a bucket is preserved.

use crate::config::{ExportFormat, OutputConfig};
use crate::crawler::{AggregateReport, Link};
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Writes the report to the configured output path
///
/// # Arguments
///
/// * `report` - The aggregated crawl results
/// * `output` - Output path, format, and archive settings
pub fn export_report(report: &AggregateReport, output: &OutputConfig) -> crate::Result<()> {
    let path = Path::new(&output.path);

    if output.separate_files {
        let file = std::fs::File::create(path)?;
        write_archive(report, file)?;
    } else {
        let rendered = match output.format {
            ExportFormat::Csv => render_csv(report),
            ExportFormat::Txt => render_txt(report),
        };
        std::fs::write(path, rendered)?;
    }

    tracing::info!(path = %path.display(), "Report exported");
    Ok(())
}

/// Renders the whole report as one CSV document
pub fn render_csv(report: &AggregateReport) -> String {
    let mut out = String::from("Links\n");
    for key in report.sorted_keys() {
        push_rows(&mut out, &report.buckets[key]);
    }
    out
}

/// Renders the whole report as newline-joined plain text
pub fn render_txt(report: &AggregateReport) -> String {
    let mut lines = Vec::new();
    for key in report.sorted_keys() {
        for link in &report.buckets[key] {
            lines.push(link.url.as_str());
        }
    }
    lines.join("\n")
}

/// Writes a ZIP archive with one CSV entry per bucket
pub fn write_archive<W: Write + Seek>(report: &AggregateReport, writer: W) -> crate::Result<()> {
    let mut archive = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();

    for key in report.sorted_keys() {
        archive.start_file(archive_entry_name(key), options)?;

        let mut entry = String::from("Links\n");
        push_rows(&mut entry, &report.buckets[key]);
        archive.write_all(entry.as_bytes())?;
    }

    archive.finish()?;
    Ok(())
}

/// Derives a ZIP entry name from a bucket key
///
/// The key is truncated to 50 characters first, then scheme prefixes are
/// stripped and path separators replaced, matching the flat-name exports
/// users already have.
pub fn archive_entry_name(key: &str) -> String {
    let truncated: String = key.chars().take(50).collect();
    let name = truncated
        .replace("http://", "")
        .replace("https://", "")
        .replace('/', "_");
    format!("{}.csv", name)
}

fn push_rows(out: &mut String, links: &[Link]) {
    for link in links {
        out.push_str(&csv_field(&link.url));
        out.push('\n');
    }
}

/// Quotes a CSV field only when it needs it
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
