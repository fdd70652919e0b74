//! Output module for exporting harvested links
//!
//! This module materializes an AggregateReport as flat or per-bucket files
//! and prints the end-of-run summary. The crawl core hands the report over
//! unmodified; everything format-specific lives here.

mod export;
mod stats;

pub use export::{archive_entry_name, export_report, render_csv, render_txt, write_archive};
pub use stats::{bucket_counts, print_summary};
