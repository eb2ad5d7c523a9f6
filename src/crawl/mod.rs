// src/crawl/mod.rs
// =============================================================================
// This module drives the crawl.
//
// Features:
// - Follows every link it finds, starting from the seed hosts
// - Fault injection: with probability prob_404, also requests a mangled
//   variant of a link that should come back as a 404
// - Classifies failed fetches (DNS, timeout, HTTP error, other) and logs
//   them without ever stopping the crawl
// - Emits one PageRecord per fetched text page, 404s included
//
// Submodules:
// - request: CrawlRequest and PageRecord
// - frontier: the scheduling queue
// - stats: counters reported at the end of a crawl
// - crawler: the loop itself
// =============================================================================

mod crawler;
mod frontier;
mod request;
mod stats;

pub use crawler::{CrawlSettings, Crawler};
pub use request::{CrawlRequest, PageRecord};
pub use stats::CrawlStats;
