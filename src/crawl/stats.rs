// src/crawl/stats.rs
// Counters kept by the crawl loop. When a crawl finishes every issued request
// is accounted for exactly once: emitted + skipped + failed == issued.

use std::collections::BTreeMap;

use crate::fetch::FailureKind;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// Requests handed to the fetcher
    pub issued: usize,
    /// Of those, how many were deliberately mangled
    pub mangled_issued: usize,
    /// Page records produced
    pub emitted: usize,
    /// Responses without a text body
    pub skipped: usize,
    /// Scheduling attempts refused because the URL was already scheduled
    pub duplicates: usize,
    /// Scheduling attempts refused by the depth limit
    pub too_deep: usize,
    pub failures: BTreeMap<FailureKind, usize>,
}

impl CrawlStats {
    pub fn record_failure(&mut self, kind: FailureKind) {
        *self.failures.entry(kind).or_insert(0) += 1;
    }

    pub fn failed(&self) -> usize {
        self.failures.values().sum()
    }

    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    pub fn resolved(&self) -> usize {
        self.emitted + self.skipped + self.failed()
    }
}
