// src/fetch/mod.rs
// =============================================================================
// This module is the crawler's transport layer.
//
// Submodules:
// - response: the Response / Body model the crawl loop consumes
// - error: FetchError and its FailureKind classification
// - http: HttpFetcher, the reqwest-backed implementation
//
// The crawl loop only ever talks to the Fetcher trait, so tests can swap in
// an in-memory transport.
// =============================================================================

mod error;
mod http;
mod response;

use async_trait::async_trait;
use url::Url;

pub use error::{FailureKind, FetchError};
pub use http::HttpFetcher;
pub use response::{Body, Response};

// Anything that can turn a URL into a response or a classified failure
//
// Send + Sync because one fetcher is shared by every in-flight request.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Response, FetchError>;
}
