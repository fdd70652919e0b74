//! Run summary output
//!
//! Prints per-bucket link counts and the file-type tally after a run.

use crate::crawler::AggregateReport;

/// Per-bucket link counts, in sorted-key order
pub fn bucket_counts(report: &AggregateReport) -> Vec<(String, usize)> {
    report
        .sorted_keys()
        .into_iter()
        .map(|key| (key.clone(), report.buckets[key].len()))
        .collect()
}

/// Prints the run summary to stdout
///
/// # Arguments
///
/// * `report` - The aggregated results
/// * `show_counts` - Whether to list per-source link counts
pub fn print_summary(report: &AggregateReport, show_counts: bool) {
    println!("=== Harvest Summary ===\n");

    println!(
        "Extracted {} links from {} sources.",
        report.total_links(),
        report.buckets.len()
    );

    if show_counts {
        println!("\nLinks per source:");
        for (key, count) in bucket_counts(report) {
            println!("  {}: {}", key, count);
        }
    }

    if !report.type_counts.is_empty() {
        println!("\nLinks by file type:");
        // Sort by count (descending), then by suffix
        let mut counts: Vec<_> = report.type_counts.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (suffix, count) in counts {
            println!("  {}: {}", suffix, count);
        }
    }
}
