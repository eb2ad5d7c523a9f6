// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "fault-crawler",
    version,
    about = "Crawl seed hosts, follow every link, and sprinkle in deliberate 404s",
    long_about = "fault-crawler fetches a list of seed hosts, recursively follows the links it finds \
                  and writes one JSON record per fetched page. A configurable fraction of links is \
                  also requested with a slightly mangled path, to exercise 404 handling downstream."
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl every host in the seed list
    ///
    /// Example: fault-crawler crawl --seeds sites.txt --prob-404 0.05 --output pages.jl
    Crawl(CrawlArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct CrawlArgs {
    /// File with one bare hostname per line
    #[arg(long, default_value = "sites.txt")]
    pub seeds: PathBuf,

    /// Probability (0.0 to 1.0) of also requesting a mangled copy of each link
    #[arg(long = "prob-404", env = "PROB_404", default_value_t = 0.0, value_parser = parse_probability)]
    pub prob_404: f64,

    /// Maximum number of requests in flight at once
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: u64,

    /// Total timeout per request, in seconds
    #[arg(long = "timeout-secs", default_value_t = 10)]
    pub timeout_secs: u64,

    /// How many redirects to follow before giving up
    #[arg(long = "max-redirects", default_value_t = 10)]
    pub max_redirects: usize,

    /// Don't follow links more than this many hops away from a seed
    #[arg(long = "max-depth")]
    pub max_depth: Option<usize>,

    /// Seed for the random source, for reproducible fault injection
    #[arg(long = "rng-seed")]
    pub rng_seed: Option<u64>,

    /// Write records here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

// Accepts a float in [0, 1]
fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;

    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{} is outside the range 0.0 to 1.0", p))
    }
}
