// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr so stdout stays a record stream)
// 3. Load the seed hosts and build the crawler
// 4. Run the crawl while a separate task writes records out
// 5. Print a summary and exit (0 = crawl finished, 2 = error)
//
// Individual fetch failures never change the exit code: they are logged and
// the crawl moves on.
// =============================================================================

mod cli;
mod crawl;
mod extract;
mod fetch;
mod mangle;
mod output;
mod seeds;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, CrawlArgs};
use crawl::{CrawlSettings, CrawlStats, Crawler};
use extract::HtmlLinkExtractor;
use fetch::{FailureKind, HttpFetcher};

// How many records may queue up between the crawler and the writer
const RECORD_BUFFER: usize = 1024;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
    }
}

async fn handle_crawl(args: CrawlArgs) -> Result<()> {
    let hosts = seeds::load_seeds(&args.seeds)?;
    let seed_urls = seeds::seed_urls(&hosts)?;

    info!(
        seeds = seed_urls.len(),
        prob_404 = args.prob_404,
        concurrency = args.concurrency,
        "starting crawl"
    );

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs), args.max_redirects)
        .context("Failed to create HTTP client")?;

    let rng = match args.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let settings = CrawlSettings {
        prob_404: args.prob_404,
        concurrency: usize::try_from(args.concurrency).unwrap_or(usize::MAX),
        max_depth: args.max_depth,
    };

    let mut crawler = Crawler::new(Arc::new(fetcher), HtmlLinkExtractor::new(), settings, rng);

    let writer = output::open_output(args.output.as_deref()).await?;
    let (tx, rx) = mpsc::channel(RECORD_BUFFER);
    let sink = tokio::spawn(output::write_records(rx, writer));

    let stats = crawler.run(seed_urls, &tx).await;
    drop(tx);

    let written = sink.await.context("Record writer task panicked")??;

    print_summary(&stats, written);
    Ok(())
}

fn print_summary(stats: &CrawlStats, written: usize) {
    info!(
        issued = stats.issued,
        mangled = stats.mangled_issued,
        emitted = stats.emitted,
        written,
        skipped = stats.skipped,
        duplicates = stats.duplicates,
        too_deep = stats.too_deep,
        failed = stats.failed(),
        "crawl finished"
    );

    for kind in FailureKind::ALL {
        let count = stats.failures_of(kind);
        if count > 0 {
            info!("{}: {}", kind, count);
        }
    }
}
