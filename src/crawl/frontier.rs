// src/crawl/frontier.rs
// =============================================================================
// The frontier: requests that have been scheduled but not yet issued.
//
// How it works:
// - FIFO queue, so the crawl is roughly breadth-first
// - Every URL is scheduled at most once (seen-set keyed on the full URL)
// - Optional depth limit: requests deeper than max_depth are refused
//
// Rust concepts:
// - VecDeque: double-ended queue, push_back / pop_front for BFS
// - HashSet: O(1) "have we scheduled this already?"
// =============================================================================

use std::collections::{HashSet, VecDeque};

use super::CrawlRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Queued,
    Duplicate,
    TooDeep,
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CrawlRequest>,
    seen: HashSet<String>,
    max_depth: Option<usize>,
}

impl Frontier {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn push(&mut self, request: CrawlRequest) -> Admission {
        if self.max_depth.map_or(false, |max| request.depth() > max) {
            return Admission::TooDeep;
        }

        if !self.seen.insert(request.url().to_string()) {
            return Admission::Duplicate;
        }

        self.queue.push_back(request);
        Admission::Queued
    }

    pub fn pop(&mut self) -> Option<CrawlRequest> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(None);
        frontier.push(CrawlRequest::seed(url("http://a.test/")));
        frontier.push(CrawlRequest::seed(url("http://b.test/")));

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop().unwrap().url().as_str(), "http://a.test/");
        assert_eq!(frontier.pop().unwrap().url().as_str(), "http://b.test/");
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_duplicate_urls_refused() {
        let mut frontier = Frontier::new(None);

        assert_eq!(frontier.push(CrawlRequest::seed(url("http://a.test/x"))), Admission::Queued);
        assert_eq!(frontier.push(CrawlRequest::follow(url("http://a.test/x"), 3)), Admission::Duplicate);

        // Still refused after the first one has been popped
        frontier.pop();
        assert_eq!(frontier.push(CrawlRequest::follow(url("http://a.test/x"), 1)), Admission::Duplicate);
    }

    #[test]
    fn test_depth_limit() {
        let mut frontier = Frontier::new(Some(1));

        assert_eq!(frontier.push(CrawlRequest::follow(url("http://a.test/1"), 1)), Admission::Queued);
        assert_eq!(frontier.push(CrawlRequest::follow(url("http://a.test/2"), 2)), Admission::TooDeep);
        assert_eq!(frontier.len(), 1);
    }
}
