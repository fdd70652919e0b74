//! Linkharvest main entry point
//!
//! Command-line interface for the bounded-depth hyperlink extractor.

use anyhow::Context;
use clap::Parser;
use linkharvest::config::{load_config, load_seeds_file, validate_seeds, Config};
use linkharvest::crawler::{build_fetcher, crawl_seeds_with_fetcher};
use linkharvest::diagnostics::TracingSink;
use linkharvest::output::{export_report, print_summary};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Linkharvest: a bounded-depth hyperlink extractor
///
/// Crawls seed URLs up to a configurable depth, filters discovered links
/// by file type, keyword, and domain scope, and exports the results as
/// flat or per-source files.
#[derive(Parser, Debug)]
#[command(name = "linkharvest")]
#[command(version)]
#[command(about = "A bounded-depth hyperlink extractor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Additional seed URL, appended after the config's seeds (repeatable)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// File of seed URLs (line-delimited text or CSV)
    #[arg(long, value_name = "FILE")]
    seeds_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config).context("failed to load configuration")?;

    // Assemble the seed list: config file, then --seed, then --seeds-file
    let mut seed_strings = config.seeds.clone();
    seed_strings.extend(cli.seeds.iter().cloned());
    if let Some(path) = &cli.seeds_file {
        let from_file = load_seeds_file(path)
            .with_context(|| format!("failed to read seeds file {}", path.display()))?;
        seed_strings.extend(from_file);
    }
    let seeds = validate_seeds(&seed_strings).context("invalid seed list")?;

    if cli.dry_run {
        handle_dry_run(&config, &seeds);
        return Ok(());
    }

    run_harvest(config, seeds).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkharvest=info,warn"),
            1 => EnvFilter::new("linkharvest=debug,info"),
            2 => EnvFilter::new("linkharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, seeds: &[Url]) {
    println!("=== Linkharvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Depth: {}", config.crawler.depth);
    println!("  Retries: {}", config.crawler.retries);
    println!("  Rate limit: {}ms", config.crawler.rate_limit_ms);
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!("  Fetch mode: {:?}", config.crawler.fetch_mode);

    println!("\nFilters:");
    println!("  Include types: {:?}", config.filters.include_types);
    println!("  Exclude types: {:?}", config.filters.exclude_types);
    println!("  Include keywords: {:?}", config.filters.include_keywords);
    println!("  Exclude keywords: {:?}", config.filters.exclude_keywords);
    println!("  Case sensitive: {}", config.filters.case_sensitive);
    println!("  Include external: {}", config.filters.include_external);

    println!("\nAggregation:");
    println!("  Group by domain: {}", config.aggregation.group_by_domain);
    println!("  Unique links: {}", config.aggregation.unique_links);

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);
    println!("  Format: {:?}", config.output.format);
    println!("  Separate files: {}", config.output.separate_files);

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling {} seed URLs", seeds.len());
}

/// Runs the crawl, exports the report, and prints the summary
async fn run_harvest(config: Config, seeds: Vec<Url>) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let fetcher = build_fetcher(&config).context("failed to build fetcher")?;

    // Ctrl-C stops the run at the next fetch boundary
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping at the next fetch boundary");
            interrupt.cancel();
        }
    });

    tracing::info!(
        "Starting harvest: {} seeds, depth {}",
        seeds.len(),
        config.crawler.depth
    );

    let report = crawl_seeds_with_fetcher(
        &seeds,
        Arc::clone(&config),
        fetcher,
        Arc::new(TracingSink),
        cancel,
    )
    .await;

    tracing::info!(
        "Harvest complete: {} links in {} buckets",
        report.total_links(),
        report.buckets.len()
    );

    export_report(&report, &config.output).context("failed to export report")?;
    println!(
        "Extracted {} links -> {}",
        report.total_links(),
        config.output.path
    );

    print_summary(&report, config.output.show_counts);

    Ok(())
}
