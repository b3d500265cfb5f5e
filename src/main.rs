//! Javadoc-Crawler main entry point
//!
//! This is the command-line interface for crawling a Javadoc site into JSON.

use anyhow::Context;
use clap::Parser;
use javadoc_crawler::cache::open_cache;
use javadoc_crawler::config::{load_config_with_hash, validate, Config, OutputFormat};
use javadoc_crawler::crawler::{Coordinator, EntryPointDiscovery};
use javadoc_crawler::output::writer_for;
use javadoc_crawler::CrawlPhase;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Javadoc-Crawler: structured API documentation from Javadoc websites
///
/// Finds an index page on the documentation site, fetches every type page
/// through a bounded worker pool, and writes the parsed types as JSON.
#[derive(Parser, Debug)]
#[command(name = "javadoc-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Crawls Javadoc HTML into structured JSON", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the documentation root from the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Override the output path from the config file
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Override the output format (per-type or aggregate)
    #[arg(long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Crawl without reading or writing the type cache
    #[arg(long)]
    no_cache: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "cache_stats")]
    dry_run: bool,

    /// Show type cache statistics and exit
    #[arg(long, conflicts_with = "dry_run")]
    cache_stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration after command-line overrides")?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.cache_stats {
        handle_cache_stats(&config);
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("javadoc_crawler=info,warn"),
            1 => EnvFilter::new("javadoc_crawler=debug,info"),
            2 => EnvFilter::new("javadoc_crawler=trace,debug"),
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

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }
}

/// Handles the --dry-run mode: shows the validated config and the entry points
fn handle_dry_run(config: &Config) {
    println!("=== Javadoc-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Worker pool size: {}", config.crawler.thread_pool_size);
    println!("  Progress interval: {}ms", config.crawler.progress_interval_ms);
    println!("  Shutdown grace: {}ms", config.crawler.shutdown_grace_ms);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}ms", config.http.timeout_ms);
    match &config.proxy {
        Some(proxy) => println!(
            "  Proxy: {}{}",
            proxy.url(),
            if proxy.username.is_some() { " (with credentials)" } else { "" }
        ),
        None => println!("  Proxy: none"),
    }

    println!("\nPackage Filters ({}):", config.crawler.package_filters.len());
    for filter in &config.crawler.package_filters {
        println!("  - {}", filter);
    }

    let discovery = EntryPointDiscovery::from_config(config.crawler.entry_points.as_deref());
    println!("\nEntry Points ({}):", discovery.candidates().len());
    for candidate in discovery.candidates() {
        println!("  - {} [{}]", candidate.name, candidate.group);
    }

    println!("\nCache:");
    if config.cache.enabled {
        println!("  Directory: {}", config.cache.directory.display());
    } else {
        println!("  Disabled");
    }

    println!("\nOutput:");
    println!("  Path: {}", config.output.path.display());
    println!("  Format: {:?}", config.output.format);
    println!("  MCP compatible: {}", config.output.mcp_compatible);

    println!("\n✓ Configuration is valid");
}

/// Handles the --cache-stats mode: shows what the type cache holds
fn handle_cache_stats(config: &Config) {
    let cache = open_cache(&config.cache);
    println!("{}", cache.stats());
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let output = config.output.clone();
    let coordinator = Coordinator::new(config).context("Failed to initialize crawler")?;
    let base_url = coordinator.config().crawler.base_url.clone();

    let result = match coordinator.run().await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if result.phase == CrawlPhase::Failed {
        tracing::error!("No documentation was extracted from {}", base_url);
    }

    let summary = writer_for(&output)
        .write(&result.packages, &base_url)
        .with_context(|| format!("Failed to write output to {}", output.path.display()))?;

    tracing::info!(
        "Crawl finished: {} types in {} packages ({} files written to {})",
        result.type_count(),
        result.packages.len(),
        summary.files,
        summary.location.display()
    );
    Ok(())
}
