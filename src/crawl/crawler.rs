// src/crawl/crawler.rs
// =============================================================================
// The crawl loop: fetch -> extract links -> schedule follow-ups, forever,
// until nothing is left to fetch.
//
// How it works:
// 1. Every seed URL is scheduled as a normal (unmangled) request
// 2. Up to `concurrency` requests are in flight at once, each in its own
//    tokio task
// 3. Each completed request is handled exactly once:
//    - response with a text body -> emit a PageRecord, extract links
//      (404 included: it's a valid page, not a failure)
//    - response without a text body -> counted as skipped
//    - failure -> classified and logged as "<FailureKind> on <url>"
// 4. For every extracted link:
//    - schedule a normal follow-up
//    - independently, with probability prob_404, schedule a mangled copy of
//      the link whose path has one extra random letter (fault injection)
//
// Failures never stop the crawl and are never retried.
//
// The orchestrator is a single task that owns the random source, so every
// draw (fault-injection roll and path mangling) is serialised without a lock.
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};
use url::Url;

use super::frontier::{Admission, Frontier};
use super::{CrawlRequest, CrawlStats, PageRecord};
use crate::extract::LinkExtractor;
use crate::fetch::{FailureKind, FetchError, Fetcher, Response};
use crate::mangle::{is_mangleable, mangle_path};

#[derive(Debug, Clone, PartialEq)]
pub struct CrawlSettings {
    /// Probability of attempting fault injection for each discovered link
    pub prob_404: f64,
    /// Maximum number of in-flight fetches
    pub concurrency: usize,
    /// Links found deeper than this many hops from a seed are not followed
    pub max_depth: Option<usize>,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            prob_404: 0.0,
            concurrency: 32,
            max_depth: None,
        }
    }
}

// What handling one response produced
#[derive(Debug, Default)]
pub struct Parsed {
    pub record: Option<PageRecord>,
    pub follow_ups: Vec<CrawlRequest>,
}

pub struct Crawler<F, E, R = StdRng> {
    fetcher: Arc<F>,
    extractor: E,
    settings: CrawlSettings,
    rng: R,
}

impl<F, E, R> Crawler<F, E, R>
where
    F: Fetcher + 'static,
    E: LinkExtractor,
    R: Rng,
{
    pub fn new(fetcher: Arc<F>, extractor: E, settings: CrawlSettings, rng: R) -> Self {
        Self {
            fetcher,
            extractor,
            settings,
            rng,
        }
    }

    // Runs the crawl until the frontier is exhausted
    //
    // Records are pushed into `sink` as they are produced (arrival order, not
    // crawl order). If the receiving end goes away the crawl keeps going; the
    // records are just no longer delivered.
    pub async fn run(&mut self, seeds: Vec<Url>, sink: &mpsc::Sender<PageRecord>) -> CrawlStats {
        let mut stats = CrawlStats::default();
        let mut frontier = Frontier::new(self.settings.max_depth);
        let mut in_flight = FuturesUnordered::new();
        let mut sink_open = true;
        let concurrency = self.settings.concurrency.max(1);

        for request in start_requests(seeds) {
            schedule(&mut frontier, &mut stats, request);
        }

        loop {
            while in_flight.len() < concurrency && !frontier.is_empty() {
                let Some(request) = frontier.pop() else {
                    break;
                };

                stats.issued += 1;
                if request.is_mangled() {
                    stats.mangled_issued += 1;
                }
                debug!(
                    url = %request.url(),
                    mangled = request.is_mangled(),
                    depth = request.depth(),
                    queued = frontier.len(),
                    "fetching"
                );

                // Fetches progress on their own task, even while we wait on the sink
                in_flight.push(tokio::spawn(dispatch(Arc::clone(&self.fetcher), request)));
            }

            let Some(joined) = in_flight.next().await else {
                break;
            };

            let (request, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    // The fetch task panicked or was aborted; its request is gone
                    error!("{} on {}", FailureKind::Other, e);
                    stats.record_failure(FailureKind::Other);
                    continue;
                }
            };

            match result {
                Ok(response) => {
                    let parsed = self.on_response(response, &request);

                    match parsed.record {
                        Some(record) => {
                            stats.emitted += 1;
                            if sink_open && sink.send(record).await.is_err() {
                                warn!("record sink closed; further page records are discarded");
                                sink_open = false;
                            }
                        }
                        None => stats.skipped += 1,
                    }

                    for follow_up in parsed.follow_ups {
                        schedule(&mut frontier, &mut stats, follow_up);
                    }
                }
                Err(e) => {
                    let kind = self.on_failure(&e, request.url());
                    stats.record_failure(kind);
                }
            }
        }

        stats
    }

    // Handles one response: record + follow-up requests
    //
    // Any status that reaches here is a page (the transport already turned
    // unacceptable statuses into failures), so a 404 is emitted and scanned
    // for links like any other page.
    pub fn on_response(&mut self, response: Response, request: &CrawlRequest) -> Parsed {
        let Some(record) = PageRecord::from_response(&response, request.is_mangled()) else {
            debug!("NonTextResponse on {}", response.url);
            return Parsed::default();
        };

        let links = self.extractor.extract_links(&record.html, &response.url);
        let follow_ups = self.follow_ups(links, request.depth() + 1);

        debug!(
            url = %record.url,
            status = record.status,
            mangled = record.mangled,
            follow_ups = follow_ups.len(),
            "page"
        );

        Parsed {
            record: Some(record),
            follow_ups,
        }
    }

    // Classifies and logs a failed fetch; never panics, never retries
    pub fn on_failure(&self, error: &FetchError, request_url: &Url) -> FailureKind {
        let kind = error.kind();
        debug!(url = %request_url, error = %error, "fetch failed");
        error!("{} on {}", kind, error.target(request_url.as_str()));
        kind
    }

    fn follow_ups(&mut self, links: Vec<Url>, depth: usize) -> Vec<CrawlRequest> {
        let mut requests = Vec::with_capacity(links.len());

        for link in links {
            // The fault-injection roll is independent of the normal follow-up
            let mangled = if self.rng.gen::<f64>() < self.settings.prob_404 {
                self.mangle_link(&link)
            } else {
                None
            };

            requests.push(CrawlRequest::follow(link, depth));
            if let Some(url) = mangled {
                requests.push(CrawlRequest::mangled(url, depth));
            }
        }

        requests
    }

    // Same URL with one extra letter in the last path segment, or None when
    // the path is too short to mangle
    fn mangle_link(&mut self, link: &Url) -> Option<Url> {
        if !is_mangleable(link.path()) {
            return None;
        }

        let mut mangled = link.clone();
        let path = mangle_path(link.path(), &mut self.rng);
        mangled.set_path(&path);
        Some(mangled)
    }
}

// The initial requests: one unmangled request per seed, in order
pub fn start_requests(seeds: Vec<Url>) -> Vec<CrawlRequest> {
    seeds.into_iter().map(CrawlRequest::seed).collect()
}

async fn dispatch<F: Fetcher + ?Sized + 'static>(
    fetcher: Arc<F>,
    request: CrawlRequest,
) -> (CrawlRequest, Result<Response, FetchError>) {
    let result = fetcher.fetch(request.url()).await;
    (request, result)
}

fn schedule(frontier: &mut Frontier, stats: &mut CrawlStats, request: CrawlRequest) {
    match frontier.push(request.clone()) {
        Admission::Queued => {}
        Admission::Duplicate => {
            stats.duplicates += 1;
            debug!(url = %request.url(), "already scheduled");
        }
        Admission::TooDeep => {
            stats.too_deep += 1;
            debug!(url = %request.url(), depth = request.depth(), "beyond max depth");
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is FuturesUnordered?
//    - A set of futures that yields each result as soon as it is ready
//    - Unlike buffer_unordered, we can keep pushing new futures into it
//      while others are still running, which is what a crawl needs
//    - Here the futures are JoinHandles from tokio::spawn: the fetch itself
//      runs on the runtime, the handle just reports when it's finished
//
// 2. Why Arc<F> for the fetcher?
//    - Every in-flight future needs its own handle to the fetcher
//    - Arc::clone just bumps a reference count
//    - The futures then don't borrow `self`, so the loop can still call
//      &mut self methods (which use the random source) while they run
//
// 3. What is let-else?
//    - `let Some(x) = expr else { break; };`
//    - Binds x when the pattern matches, otherwise runs the else block
//      (which must leave the scope: break, continue, return)
//
// 4. Why is R a generic parameter?
//    - Production uses StdRng seeded from entropy
//    - Tests pass StdRng::seed_from_u64(...) to get the same draws every run
// -----------------------------------------------------------------------------
